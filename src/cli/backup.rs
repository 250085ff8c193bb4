//! Backup CLI commands
//!
//! Implements CLI commands for backup management.

use clap::Subcommand;

use crate::display::backup::{format_backup_list, format_backup_summary};
use crate::error::{InventoryError, InventoryResult};
use crate::storage::Inventory;

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Snapshot the inventory file
    Create,

    /// List all available backups
    List,

    /// Restore the inventory file from a backup
    Restore {
        /// Backup filename (use 'latest' for the most recent)
        backup: String,

        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Show backup count and total size
    Info,
}

/// Handle a backup command
pub fn handle_backup_command(inventory: &Inventory, cmd: BackupCommands) -> InventoryResult<()> {
    let manager = &inventory.backups;

    match cmd {
        BackupCommands::Create => {
            let name = manager.snapshot()?;
            println!("Backup created: {}", name);
            println!("Location: {}", manager.backup_dir().join(&name).display());
        }

        BackupCommands::List => {
            let backups = manager.list_backups()?;
            print!("{}", format_backup_list(&backups));
        }

        BackupCommands::Restore { backup, force } => {
            let name = resolve_backup_name(inventory, &backup)?;

            if !force {
                println!("WARNING: This will overwrite the current inventory with {}", name);
                println!("A backup of the current inventory is taken first.");
                println!("To proceed, run again with --force flag:");
                println!("  inventory backup restore {} --force", name);
                return Ok(());
            }

            let outcome = manager.restore(&name)?;
            match &outcome.safety_snapshot {
                Ok(safety) => println!("Pre-restore backup saved: {}", safety),
                Err(e) => println!("Warning: could not back up the current inventory: {}", e),
            }
            println!("Restored inventory from {}", outcome.restored);
        }

        BackupCommands::Info => {
            let summary = manager.summary()?;
            println!("Backup directory: {}", manager.backup_dir().display());
            print!("{}", format_backup_summary(&summary));
        }
    }

    Ok(())
}

/// Resolve "latest" to the newest snapshot name, pass anything else through
fn resolve_backup_name(inventory: &Inventory, backup: &str) -> InventoryResult<String> {
    if !backup.eq_ignore_ascii_case("latest") {
        return Ok(backup.to_string());
    }

    // By date and counter, not by name: `_10` sorts before `_2`
    inventory
        .backups
        .list_backups()?
        .into_iter()
        .max_by_key(|b| (b.date, b.sequence))
        .map(|b| b.name)
        .ok_or_else(|| InventoryError::backup_not_found("latest"))
}
