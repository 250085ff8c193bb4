//! Backup system for the inventory
//!
//! Point-in-time copies of the inventory file, kept in `data/backups/`.
//!
//! # Naming
//!
//! - `<prefix>_<YYYY-MM-DD>.txt` for the first snapshot of a day
//! - `<prefix>_<YYYY-MM-DD>_<n>.txt` for later ones, `n` starting at 1
//!
//! Snapshots are never deleted or overwritten. Restoring one first takes a
//! fresh snapshot of the current file, so a restore can always be undone.
//!
//! # Example
//!
//! ```rust,ignore
//! use inventory::storage::Inventory;
//!
//! let inventory = Inventory::open(paths, &settings)?;
//! let name = inventory.backups.snapshot()?;
//! let outcome = inventory.backups.restore(&name)?;
//! ```

mod manager;

pub use manager::{
    parse_snapshot_name, snapshot_name, BackupInfo, BackupManager, BackupSummary, RestoreOutcome,
};
