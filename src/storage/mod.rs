//! Storage layer for the inventory
//!
//! The inventory is a `;`-separated text file with a header line. Full
//! rewrites go through [`file_io::write_file`], honouring the configured
//! [`WriteMode`].

pub mod codec;
pub mod file_io;
pub mod products;

pub use codec::{decode_line, encode_line, HEADER, SEPARATOR};
pub use file_io::{append_line, write_file};
pub use products::{InventoryStats, ProductRepository};

use crate::audit::AuditLogger;
use crate::backup::BackupManager;
use crate::config::paths::InventoryPaths;
use crate::config::settings::{Settings, WriteMode};
use crate::error::InventoryError;

/// Main storage coordinator wiring the repository, backups and audit log
pub struct Inventory {
    paths: InventoryPaths,
    pub products: ProductRepository,
    pub backups: BackupManager,
    pub audit: AuditLogger,
}

impl Inventory {
    /// Open the inventory, creating the data directory and an empty
    /// inventory file if needed
    pub fn open(paths: InventoryPaths, settings: &Settings) -> Result<Self, InventoryError> {
        paths.ensure_directories()?;

        let audit = AuditLogger::new(paths.audit_log());
        let products = ProductRepository::open(
            paths.inventory_file(),
            audit.clone(),
            settings.write_mode,
        )?;
        let backups = BackupManager::new(
            paths.backup_dir(),
            paths.inventory_file(),
            settings.backup_prefix.clone(),
            settings.write_mode,
            audit.clone(),
        );

        Ok(Self {
            paths,
            products,
            backups,
            audit,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &InventoryPaths {
        &self.paths
    }

    /// Rewrite strategy in effect
    pub fn write_mode(&self) -> WriteMode {
        self.products.write_mode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::models::{NewProduct, Price, ProductUpdate};
    use std::fs;
    use tempfile::TempDir;

    fn open_inventory() -> (TempDir, Inventory) {
        let temp_dir = TempDir::new().unwrap();
        let paths = InventoryPaths::with_base_dir(temp_dir.path().to_path_buf());
        let inventory = Inventory::open(paths, &Settings::default()).unwrap();
        (temp_dir, inventory)
    }

    #[test]
    fn test_open_creates_layout() {
        let (temp_dir, inventory) = open_inventory();

        assert!(temp_dir.path().join("data").join("inventario.txt").exists());
        assert!(temp_dir.path().join("data").join("registro.txt").exists());
        assert!(!inventory.paths().backup_dir().exists());
        assert_eq!(inventory.write_mode(), WriteMode::Atomic);
    }

    #[test]
    fn test_create_update_backup_restore() {
        let (_temp, inventory) = open_inventory();

        let widget = inventory
            .products
            .create(NewProduct::new("Widget", "Tools", Price::from_cents(999), 5))
            .unwrap();
        let snapshot = inventory.backups.snapshot().unwrap();

        inventory
            .products
            .update(widget.id, &ProductUpdate::default().quantity(0))
            .unwrap();
        assert_eq!(inventory.products.find_by_id(widget.id).unwrap().quantity, 0);

        let outcome = inventory.backups.restore(&snapshot).unwrap();
        assert!(outcome.safety_snapshot_name().is_some());
        assert_eq!(inventory.products.find_by_id(widget.id).unwrap().quantity, 5);
        assert_eq!(inventory.backups.list_snapshots().unwrap().len(), 2);
    }

    #[test]
    fn test_audit_trail_is_chronological() {
        let (_temp, inventory) = open_inventory();

        inventory
            .products
            .create(NewProduct::new("Widget", "Tools", Price::from_cents(999), 5))
            .unwrap();
        inventory.products.list_all().unwrap();
        inventory.backups.snapshot().unwrap();

        let ops: Vec<Operation> = inventory
            .audit
            .read_all()
            .unwrap()
            .into_iter()
            .map(|e| e.operation)
            .collect();
        assert_eq!(
            ops,
            vec![
                Operation::Initialize,
                Operation::Create,
                Operation::List,
                Operation::Backup
            ]
        );

        let text = fs::read_to_string(inventory.paths().audit_log()).unwrap();
        assert_eq!(text.lines().count(), 4);
    }
}
