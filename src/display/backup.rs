//! Backup display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::backup::{BackupInfo, BackupSummary};

#[derive(Tabled)]
struct BackupRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Size")]
    size: String,
}

/// Format snapshots as a table
pub fn format_backup_list(backups: &[BackupInfo]) -> String {
    if backups.is_empty() {
        return "No backups found.\nCreate one with: inventory backup create\n".to_string();
    }

    let rows = backups.iter().enumerate().map(|(i, b)| BackupRow {
        index: i + 1,
        name: b.name.clone(),
        date: b.date.format("%Y-%m-%d").to_string(),
        size: format_size(b.size_bytes),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::sharp())
        .modify(Columns::new(3..), Alignment::right());

    format!("{}\nTotal: {} backup(s)\n", table, backups.len())
}

pub fn format_backup_summary(summary: &BackupSummary) -> String {
    format!(
        "Backups:    {}\nTotal size: {}\n",
        summary.count,
        format_size(summary.total_bytes)
    )
}

/// Format a file size in human-readable form
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
