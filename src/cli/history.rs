//! Audit history command

use crate::audit::Operation;
use crate::error::{InventoryError, InventoryResult};
use crate::storage::Inventory;

/// Print the last `lines` audit entries (all of them for 0)
///
/// The consultation itself is recorded after printing, so it shows up the
/// next time.
pub fn handle_history_command(inventory: &Inventory, lines: usize) -> InventoryResult<()> {
    match inventory.audit.tail(lines) {
        Ok(text) => print!("{}", text),
        Err(InventoryError::EmptyAuditLog) => println!("The audit log is empty."),
        Err(e) if e.is_not_found() => println!("No audit log yet."),
        Err(e) => return Err(e),
    }

    let scope = if lines == 0 {
        "all entries".to_string()
    } else {
        format!("last {} entries", lines)
    };
    inventory
        .audit
        .record(Operation::History, format!("Viewed {}", scope));

    Ok(())
}
