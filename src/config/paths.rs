//! Path management for the inventory
//!
//! Resolves where the inventory file, the audit log, the backups and the
//! settings live.
//!
//! ## Path Resolution Order
//!
//! 1. `INVENTORY_CLI_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory + `inventory-cli`
//!    (`~/.config/inventory-cli` on Linux, `%APPDATA%\inventory-cli` on Windows)
//!
//! ## Layout
//!
//! ```text
//! <base>/config.json
//! <base>/data/inventario.txt
//! <base>/data/registro.txt
//! <base>/data/backups/
//! ```

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::InventoryError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "INVENTORY_CLI_DATA_DIR";

/// Manages all paths used by the inventory
#[derive(Debug, Clone)]
pub struct InventoryPaths {
    /// Base directory for all inventory data
    base_dir: PathBuf,
}

impl InventoryPaths {
    /// Create a new InventoryPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home/config directory can be determined.
    pub fn new() -> Result<Self, InventoryError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create InventoryPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (`<base>/data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the backup directory (`<base>/data/backups/`)
    pub fn backup_dir(&self) -> PathBuf {
        self.data_dir().join("backups")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the inventory file
    pub fn inventory_file(&self) -> PathBuf {
        self.data_dir().join("inventario.txt")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.data_dir().join("registro.txt")
    }

    /// Ensure the base and data directories exist
    ///
    /// The backup directory is created lazily by the first snapshot.
    pub fn ensure_directories(&self) -> Result<(), InventoryError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| InventoryError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| InventoryError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if the inventory has been initialized (settings file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default base directory for the current platform
fn resolve_default_path() -> Result<PathBuf, InventoryError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| InventoryError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("inventory-cli"))
}
