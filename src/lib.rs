//! Inventory - flat-file product inventory with backups and an audit log
//!
//! Products live in a semicolon-separated text file. The crate reads and
//! rewrites that file, takes dated snapshots of it and records every
//! operation in an append-only audit log.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Products, prices and ids
//! - `storage`: Line codec, file writes and the product repository
//! - `audit`: Audit logging system
//! - `backup`: Snapshot and restore of the inventory file
//! - `cli`, `display`: Command handlers and terminal formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use inventory::config::{paths::InventoryPaths, settings::Settings};
//! use inventory::storage::Inventory;
//!
//! let paths = InventoryPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let inventory = Inventory::open(paths, &settings)?;
//! let products = inventory.products.list_all()?;
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod storage;

pub use error::{InventoryError, InventoryResult};
