//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the storage and backup layers.

pub mod backup;
pub mod history;
pub mod product;

pub use backup::{handle_backup_command, BackupCommands};
pub use history::handle_history_command;
pub use product::{handle_product_command, ProductCommands};
