//! Audit logging system for the inventory
//!
//! Records every create, update, delete, lookup and backup operation in an
//! append-only text log, one line per entry:
//!
//! ```text
//! [2024-01-01 10:15:00] UPDATE: Product ID=1 - Changes: Precio: 9.99 -> 12.50
//! ```
//!
//! # Architecture
//!
//! - `Operation`: closed set of operation kinds, so entries stay
//!   machine-parseable.
//! - `AuditEntry`: one timestamped entry; renders to and parses from a line.
//! - `AuditLogger`: appends entries to the log file and reads them back.
//!
//! # Example
//!
//! ```rust,ignore
//! use inventory::audit::{AuditLogger, Operation};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.append(Operation::Backup, "Backup created: inventario_backup_2024-01-01.txt")?;
//! println!("{}", logger.tail(20)?);
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation, TIMESTAMP_FORMAT};
pub use logger::AuditLogger;
