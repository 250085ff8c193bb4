//! Audit logger for the append-only audit log
//!
//! Provides the AuditLogger struct that appends entries to a text log file,
//! one `[timestamp] KIND: detail` line per entry, and reads them back.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{InventoryError, InventoryResult};

use super::entry::{AuditEntry, Operation};

/// Handles writing audit entries to the audit log file
///
/// Prior content is never rewritten: every write opens the file in append
/// mode. Cloning yields another handle on the same file.
#[derive(Debug, Clone)]
pub struct AuditLogger {
    /// Path to the audit log file
    log_path: PathBuf,
}

impl AuditLogger {
    /// Create a new AuditLogger that writes to the specified path
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append an entry for `operation` stamped with the current time
    pub fn append(&self, operation: Operation, detail: impl Into<String>) -> InventoryResult<()> {
        self.log(&AuditEntry::new(operation, detail))
    }

    /// Append a prepared entry
    ///
    /// Each write is flushed immediately.
    pub fn log(&self, entry: &AuditEntry) -> InventoryResult<()> {
        if let Some(parent) = self.log_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    InventoryError::Io(format!("Failed to create audit log directory: {}", e))
                })?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| InventoryError::Io(format!("Failed to open audit log: {}", e)))?;

        writeln!(file, "{}", entry.to_line())
            .map_err(|e| InventoryError::Io(format!("Failed to write audit entry: {}", e)))?;

        file.flush()
            .map_err(|e| InventoryError::Io(format!("Failed to flush audit log: {}", e)))?;

        Ok(())
    }

    /// Append an entry, downgrading a failure to a warning
    ///
    /// Used after a data operation has already succeeded: the audit trail is
    /// a side effect and must not turn a completed write into an error.
    pub fn record(&self, operation: Operation, detail: impl Into<String>) {
        if let Err(e) = self.append(operation, detail) {
            tracing::warn!(
                path = %self.log_path.display(),
                operation = %operation,
                error = %e,
                "failed to append audit entry"
            );
        }
    }

    /// Return the last `max_lines` lines of the log, or all of it for 0
    ///
    /// A missing log is reported as `NotFound` and a log without any line as
    /// `EmptyAuditLog`, so callers can tell the two apart.
    pub fn tail(&self, max_lines: usize) -> InventoryResult<String> {
        let lines = self.read_lines()?;
        if lines.is_empty() {
            return Err(InventoryError::EmptyAuditLog);
        }

        let start = if max_lines == 0 {
            0
        } else {
            lines.len().saturating_sub(max_lines)
        };

        let mut output = String::new();
        for line in &lines[start..] {
            output.push_str(line);
            output.push('\n');
        }
        Ok(output)
    }

    /// Read all audit entries from the log file
    ///
    /// Returns entries in chronological order (oldest first). Lines that do
    /// not follow the entry format are skipped. A missing log yields no
    /// entries.
    pub fn read_all(&self) -> InventoryResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for (line_num, line) in self.read_lines()?.into_iter().enumerate() {
            match line.parse::<AuditEntry>() {
                Ok(entry) => entries.push(entry),
                Err(e) => tracing::debug!(line = line_num + 1, error = %e, "skipping audit line"),
            }
        }

        Ok(entries)
    }

    /// Read the most recent N entries from the log
    pub fn read_recent(&self, count: usize) -> InventoryResult<Vec<AuditEntry>> {
        let all_entries = self.read_all()?;
        let start = all_entries.len().saturating_sub(count);
        Ok(all_entries[start..].to_vec())
    }

    /// Get the number of lines in the audit log
    pub fn entry_count(&self) -> InventoryResult<usize> {
        if !self.log_path.exists() {
            return Ok(0);
        }
        Ok(self.read_lines()?.len())
    }

    /// Check if the audit log file exists
    pub fn exists(&self) -> bool {
        self.log_path.exists()
    }

    /// Get the path to the audit log file
    pub fn path(&self) -> &Path {
        &self.log_path
    }

    fn read_lines(&self) -> InventoryResult<Vec<String>> {
        let file = File::open(&self.log_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                InventoryError::NotFound {
                    entity_type: "Audit log",
                    identifier: self.log_path.display().to_string(),
                }
            } else {
                InventoryError::Io(format!("Failed to open audit log: {}", e))
            }
        })?;

        let reader = BufReader::new(file);
        let mut lines = Vec::new();
        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                InventoryError::Io(format!(
                    "Failed to read audit log line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;
            if !line.trim().is_empty() {
                lines.push(line);
            }
        }
        Ok(lines)
    }
}
