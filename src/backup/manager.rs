//! Backup manager for the inventory
//!
//! Snapshots are byte-for-byte copies of the inventory file named
//! `<prefix>_<YYYY-MM-DD>.txt`, with `_1`, `_2`, ... appended when that day
//! already has one. Snapshots are never overwritten or deleted.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

use crate::audit::{AuditLogger, Operation};
use crate::config::settings::WriteMode;
use crate::error::{InventoryError, InventoryResult};
use crate::storage::file_io::write_file;

const EXTENSION: &str = ".txt";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Metadata about a snapshot
#[derive(Debug, Clone)]
pub struct BackupInfo {
    /// Snapshot filename
    pub name: String,
    /// Full path to the snapshot
    pub path: PathBuf,
    /// Date encoded in the name
    pub date: NaiveDate,
    /// Same-day counter, 0 for the first snapshot of the day
    pub sequence: u32,
    /// Size in bytes
    pub size_bytes: u64,
}

/// Count and total size of the snapshots on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BackupSummary {
    pub count: usize,
    pub total_bytes: u64,
}

/// Result of a restore
#[derive(Debug)]
pub struct RestoreOutcome {
    /// Snapshot whose bytes now form the inventory file
    pub restored: String,
    /// Name of the safety snapshot taken first, or why it could not be taken
    pub safety_snapshot: Result<String, String>,
}

impl RestoreOutcome {
    /// Name of the safety snapshot, if one was taken
    pub fn safety_snapshot_name(&self) -> Option<&str> {
        self.safety_snapshot.as_deref().ok()
    }
}

/// Creates, lists and restores snapshots of the inventory file
pub struct BackupManager {
    /// Directory holding the snapshots
    backup_dir: PathBuf,
    /// The inventory file being copied
    source: PathBuf,
    prefix: String,
    write_mode: WriteMode,
    audit: AuditLogger,
}

impl BackupManager {
    /// Create a new BackupManager
    pub fn new(
        backup_dir: PathBuf,
        source: PathBuf,
        prefix: impl Into<String>,
        write_mode: WriteMode,
        audit: AuditLogger,
    ) -> Self {
        Self {
            backup_dir,
            source,
            prefix: prefix.into(),
            write_mode,
            audit,
        }
    }

    /// Snapshot the inventory file under today's date
    ///
    /// Returns the name of the created file.
    pub fn snapshot(&self) -> InventoryResult<String> {
        self.snapshot_on(Local::now().date_naive())
    }

    /// Snapshot the inventory file under `date`
    pub fn snapshot_on(&self, date: NaiveDate) -> InventoryResult<String> {
        let contents = fs::read(&self.source).map_err(|e| {
            InventoryError::Io(format!(
                "Failed to read inventory file {} for backup: {}",
                self.source.display(),
                e
            ))
        })?;

        fs::create_dir_all(&self.backup_dir).map_err(|e| {
            InventoryError::Io(format!("Failed to create backup directory: {}", e))
        })?;

        for sequence in 0..=u32::MAX {
            let name = snapshot_name(&self.prefix, date, sequence);
            let path = self.backup_dir.join(&name);

            // create_new makes the existence check and the creation one step
            let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(InventoryError::Io(format!(
                        "Failed to create backup file {}: {}",
                        path.display(),
                        e
                    )))
                }
            };

            file.write_all(&contents)
                .and_then(|_| file.sync_all())
                .map_err(|e| {
                    InventoryError::Io(format!("Failed to write backup file {}: {}", name, e))
                })?;

            tracing::debug!(backup = %name, bytes = contents.len(), "created snapshot");
            self.audit
                .record(Operation::Backup, format!("Backup created: {}", name));
            return Ok(name);
        }

        Err(InventoryError::Io(format!(
            "No free backup name left for {}",
            date.format(DATE_FORMAT)
        )))
    }

    /// Names of all snapshots, sorted lexicographically
    pub fn list_snapshots(&self) -> InventoryResult<Vec<String>> {
        Ok(self.list_backups()?.into_iter().map(|b| b.name).collect())
    }

    /// All snapshots with their metadata, sorted by name
    ///
    /// Files in the directory that do not follow the naming convention are
    /// ignored. A missing directory yields an empty list.
    pub fn list_backups(&self) -> InventoryResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.backup_dir).map_err(|e| {
            InventoryError::Io(format!("Failed to read backup directory: {}", e))
        })?;

        let mut backups = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                InventoryError::Io(format!("Failed to read directory entry: {}", e))
            })?;

            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                continue;
            };
            let Some((date, sequence)) = parse_snapshot_name(&self.prefix, &name) else {
                continue;
            };
            let metadata = entry.metadata().map_err(|e| {
                InventoryError::Io(format!("Failed to read metadata of {}: {}", name, e))
            })?;
            if !metadata.is_file() {
                continue;
            }

            backups.push(BackupInfo {
                path: entry.path(),
                name,
                date,
                sequence,
                size_bytes: metadata.len(),
            });
        }

        backups.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(backups)
    }

    /// Replace the inventory file with the content of snapshot `name`
    ///
    /// The current inventory is snapshotted first. Failing to take that
    /// safety snapshot does not stop the restore; the failure is reported
    /// in the outcome.
    pub fn restore(&self, name: &str) -> InventoryResult<RestoreOutcome> {
        let path = self.snapshot_path(name)?;

        let contents = fs::read(&path).map_err(|e| {
            InventoryError::Io(format!("Failed to read backup file {}: {}", name, e))
        })?;

        let safety_snapshot = self.snapshot().map_err(|e| {
            tracing::warn!(error = %e, "could not take safety snapshot before restore");
            e.to_string()
        });

        write_file(&self.source, &contents, self.write_mode)?;

        self.audit
            .record(Operation::Backup, format!("Restored backup: {}", name));

        Ok(RestoreOutcome {
            restored: name.to_string(),
            safety_snapshot,
        })
    }

    /// Sum of the sizes of all snapshots, 0 if the directory is missing
    pub fn total_backup_bytes(&self) -> InventoryResult<u64> {
        Ok(self.list_backups()?.iter().map(|b| b.size_bytes).sum())
    }

    /// Count and total size of all snapshots
    pub fn summary(&self) -> InventoryResult<BackupSummary> {
        let backups = self.list_backups()?;
        Ok(BackupSummary {
            count: backups.len(),
            total_bytes: backups.iter().map(|b| b.size_bytes).sum(),
        })
    }

    /// Get backup directory path
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Resolve `name` to an existing snapshot path
    ///
    /// Only names following the convention are accepted, which also keeps
    /// the lookup inside the backup directory.
    fn snapshot_path(&self, name: &str) -> InventoryResult<PathBuf> {
        if parse_snapshot_name(&self.prefix, name).is_none() {
            return Err(InventoryError::backup_not_found(name));
        }

        let path = self.backup_dir.join(name);
        if !path.is_file() {
            return Err(InventoryError::backup_not_found(name));
        }
        Ok(path)
    }
}

/// Build the file name for the `sequence`-th snapshot of `date`
pub fn snapshot_name(prefix: &str, date: NaiveDate, sequence: u32) -> String {
    if sequence == 0 {
        format!("{}_{}{}", prefix, date.format(DATE_FORMAT), EXTENSION)
    } else {
        format!(
            "{}_{}_{}{}",
            prefix,
            date.format(DATE_FORMAT),
            sequence,
            EXTENSION
        )
    }
}

/// Recover the date and counter from a snapshot file name
///
/// Only the exact form produced by [`snapshot_name`] is accepted.
pub fn parse_snapshot_name(prefix: &str, name: &str) -> Option<(NaiveDate, u32)> {
    let rest = name.strip_prefix(prefix)?.strip_prefix('_')?;
    let rest = rest.strip_suffix(EXTENSION)?;

    let date = NaiveDate::parse_from_str(rest.get(..10)?, DATE_FORMAT).ok()?;
    let sequence = match rest.get(10..)? {
        "" => 0,
        counter => counter.strip_prefix('_')?.parse::<u32>().ok()?,
    };

    // Rejects "_0", "_01" and other non-canonical spellings
    (snapshot_name(prefix, date, sequence) == name).then_some((date, sequence))
}
