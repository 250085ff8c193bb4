//! User settings for the inventory
//!
//! Manages preferences such as the backup file prefix, the file rewrite
//! strategy and the default low-stock threshold.

use serde::{Deserialize, Serialize};

use super::paths::InventoryPaths;
use crate::error::InventoryError;

/// How full-file rewrites (update, delete, restore) reach the disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Write a sibling temp file, sync it, then rename it over the target
    #[default]
    Atomic,
    /// Truncate the target and write into it directly; a failure mid-write
    /// can leave the file truncated
    InPlace,
}

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Prefix of backup file names (`<prefix>_<YYYY-MM-DD>.txt`)
    #[serde(default = "default_backup_prefix")]
    pub backup_prefix: String,

    /// Rewrite strategy for the inventory file
    #[serde(default)]
    pub write_mode: WriteMode,

    /// Threshold used by `low-stock` when none is given
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: i64,

    /// Currency symbol shown after prices
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_backup_prefix() -> String {
    "inventario_backup".to_string()
}

fn default_low_stock_threshold() -> i64 {
    5
}

fn default_currency() -> String {
    "€".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            backup_prefix: default_backup_prefix(),
            write_mode: WriteMode::default(),
            low_stock_threshold: default_low_stock_threshold(),
            currency_symbol: default_currency(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &InventoryPaths) -> Result<Self, InventoryError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                InventoryError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents)?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &InventoryPaths) -> Result<(), InventoryError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            InventoryError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Reject settings that would break backup naming
    pub fn validate(&self) -> Result<(), InventoryError> {
        let prefix = &self.backup_prefix;
        if prefix.is_empty() || prefix.contains(['/', '\\']) || prefix.contains("..") {
            return Err(InventoryError::Config(format!(
                "Invalid backup prefix: '{}'",
                prefix
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.backup_prefix, "inventario_backup");
        assert_eq!(settings.write_mode, WriteMode::Atomic);
        assert_eq!(settings.low_stock_threshold, 5);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = InventoryPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.write_mode = WriteMode::InPlace;
        settings.low_stock_threshold = 12;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.write_mode, WriteMode::InPlace);
        assert_eq!(loaded.low_stock_threshold, 12);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"write_mode": "in_place"}"#).unwrap();
        assert_eq!(settings.write_mode, WriteMode::InPlace);
        assert_eq!(settings.backup_prefix, "inventario_backup");
        assert_eq!(settings.currency_symbol, "€");
    }

    #[test]
    fn test_unparseable_file_is_a_json_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = InventoryPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "{ not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, InventoryError::Json(_)));
    }

    #[test]
    fn test_rejects_path_like_prefix() {
        let temp_dir = TempDir::new().unwrap();
        let paths = InventoryPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"backup_prefix": "../escape"}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, InventoryError::Config(_)));
    }
}
