//! Display formatting for terminal output
//!
//! Products and backups are rendered as `tabled` tables; single records and
//! summaries as aligned key/value lines.

pub mod backup;
pub mod product;

pub use backup::{format_backup_list, format_backup_summary, format_size};
pub use product::{format_product_details, format_product_table, format_stats};
