//! Audit entry data structures
//!
//! Defines the operation kinds and the one-line textual entry format
//! `[YYYY-MM-DD HH:MM:SS] KIND: detail`.

use chrono::{Local, NaiveDateTime, Timelike};
use std::fmt;
use std::str::FromStr;

/// Timestamp layout used inside the brackets of every entry
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// A product was created
    Create,
    /// A product was deleted
    Delete,
    /// A product was updated
    Update,
    /// A filtered lookup was run
    Search,
    /// The whole inventory was listed
    List,
    /// A backup was taken or restored
    Backup,
    /// The inventory file or the application was initialized
    Initialize,
    /// The audit trail itself was consulted
    History,
}

impl Operation {
    /// Every operation kind, in declaration order
    pub const ALL: [Operation; 8] = [
        Operation::Create,
        Operation::Delete,
        Operation::Update,
        Operation::Search,
        Operation::List,
        Operation::Backup,
        Operation::Initialize,
        Operation::History,
    ];

    /// Tag written to the log file
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "CREATE",
            Operation::Delete => "DELETE",
            Operation::Update => "UPDATE",
            Operation::Search => "SEARCH",
            Operation::List => "LIST",
            Operation::Backup => "BACKUP",
            Operation::Initialize => "INITIALIZE",
            Operation::History => "HISTORY",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| format!("Unknown operation: {}", s))
    }
}

/// A single audit log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    /// When the operation occurred (local time, second precision)
    pub timestamp: NaiveDateTime,

    /// Type of operation performed
    pub operation: Operation,

    /// Free-text description
    pub detail: String,
}

impl AuditEntry {
    /// Create an entry stamped with the current local time
    pub fn new(operation: Operation, detail: impl Into<String>) -> Self {
        Self::at(Local::now().naive_local(), operation, detail)
    }

    /// Create an entry with an explicit timestamp
    pub fn at(timestamp: NaiveDateTime, operation: Operation, detail: impl Into<String>) -> Self {
        // Sub-second precision is not representable in the file format
        let timestamp = timestamp.with_nanosecond(0).unwrap_or(timestamp);
        Self {
            timestamp,
            operation,
            detail: detail.into(),
        }
    }

    /// Render the entry as one log line (without the trailing newline)
    ///
    /// Line breaks inside the detail are flattened so one entry is always
    /// one line.
    pub fn to_line(&self) -> String {
        let detail = self.detail.replace(['\r', '\n'], " ");
        format!(
            "[{}] {}: {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.operation,
            detail
        )
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line())
    }
}

impl FromStr for AuditEntry {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let rest = line
            .strip_prefix('[')
            .ok_or_else(|| format!("Missing timestamp in audit line: {}", line))?;
        let (stamp, rest) = rest
            .split_once("] ")
            .ok_or_else(|| format!("Unterminated timestamp in audit line: {}", line))?;
        let timestamp = NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT)
            .map_err(|e| format!("Invalid timestamp '{}': {}", stamp, e))?;
        let (kind, detail) = rest
            .split_once(": ")
            .ok_or_else(|| format!("Missing operation in audit line: {}", line))?;

        Ok(Self {
            timestamp,
            operation: kind.parse()?,
            detail: detail.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(12, 30, 5)
            .unwrap()
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "CREATE");
        assert_eq!(Operation::Initialize.to_string(), "INITIALIZE");
        assert_eq!("BACKUP".parse::<Operation>().unwrap(), Operation::Backup);
        assert!("ALTA".parse::<Operation>().is_err());
    }

    #[test]
    fn test_line_format() {
        let entry = AuditEntry::at(noon(), Operation::Create, "Product ID=1, Name='Widget'");
        assert_eq!(
            entry.to_line(),
            "[2024-01-01 12:30:05] CREATE: Product ID=1, Name='Widget'"
        );
    }

    #[test]
    fn test_parse_line() {
        let entry: AuditEntry = "[2024-01-01 12:30:05] UPDATE: Product ID=1 - Changes: Precio: 9.99 -> 12.50"
            .parse()
            .unwrap();
        assert_eq!(entry.timestamp, noon());
        assert_eq!(entry.operation, Operation::Update);
        assert_eq!(entry.detail, "Product ID=1 - Changes: Precio: 9.99 -> 12.50");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("no brackets here".parse::<AuditEntry>().is_err());
        assert!("[yesterday] LIST: x".parse::<AuditEntry>().is_err());
        assert!("[2024-01-01 12:30:05] NOPE: x".parse::<AuditEntry>().is_err());
    }

    #[test]
    fn test_detail_newlines_are_flattened() {
        let entry = AuditEntry::at(noon(), Operation::Search, "a\nb");
        assert_eq!(entry.to_line(), "[2024-01-01 12:30:05] SEARCH: a b");
    }
}
