use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn inventory(base: &Path) -> Command {
    let mut cmd = Command::cargo_bin("inventory").unwrap();
    cmd.env("INVENTORY_CLI_DATA_DIR", base).env_remove("RUST_LOG");
    cmd
}

fn add_widget(base: &Path) {
    inventory(base)
        .args(["product", "add", "Widget", "-c", "Tools", "-p", "9.99", "-q", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ID: 1"));
}

fn audit_log(base: &Path) -> String {
    fs::read_to_string(base.join("data").join("registro.txt")).unwrap()
}

#[test]
fn init_creates_files() {
    let temp = TempDir::new().unwrap();

    inventory(temp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));

    assert_eq!(
        fs::read_to_string(temp.path().join("data").join("inventario.txt")).unwrap(),
        "id_producto;nombre;categoria;precio;stock\n"
    );
    assert!(temp.path().join("config.json").exists());
    assert!(audit_log(temp.path()).contains("INITIALIZE:"));
}

#[test]
fn add_then_list() {
    let temp = TempDir::new().unwrap();
    add_widget(temp.path());

    inventory(temp.path())
        .args(["product", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Widget").and(predicate::str::contains("9.99")));

    let log = audit_log(temp.path());
    assert!(log.contains("CREATE: Product ID=1, Name='Widget'"));
    assert!(log.contains("LIST: Listed 1 products"));
}

#[test]
fn edit_records_price_change() {
    let temp = TempDir::new().unwrap();
    add_widget(temp.path());

    inventory(temp.path())
        .args(["product", "edit", "1", "--price", "12.50"])
        .assert()
        .success();

    assert!(audit_log(temp.path()).contains("Precio: 9.99 -> 12.50"));
    assert!(
        fs::read_to_string(temp.path().join("data").join("inventario.txt"))
            .unwrap()
            .contains("1;Widget;Tools;12.50;5")
    );
}

#[test]
fn negative_quantity_is_rejected() {
    let temp = TempDir::new().unwrap();

    inventory(temp.path())
        .args(["product", "add", "Widget", "-c", "Tools", "-p", "1.00", "-q", "-3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));
}

#[test]
fn delete_requires_force() {
    let temp = TempDir::new().unwrap();
    add_widget(temp.path());

    inventory(temp.path())
        .args(["product", "delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"));
    assert!(!audit_log(temp.path()).contains("DELETE:"));

    inventory(temp.path())
        .args(["product", "delete", "1", "--force"])
        .assert()
        .success();
    assert!(audit_log(temp.path()).contains("DELETE: Product ID=1, Name='Widget'"));
}

#[test]
fn show_missing_product_fails() {
    let temp = TempDir::new().unwrap();

    inventory(temp.path())
        .args(["product", "show", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Product not found: 42"));
}

#[test]
fn backup_and_restore() {
    let temp = TempDir::new().unwrap();
    add_widget(temp.path());

    inventory(temp.path())
        .args(["backup", "create"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup created: inventario_backup_"));

    inventory(temp.path())
        .args(["product", "edit", "1", "-q", "0"])
        .assert()
        .success();

    inventory(temp.path())
        .args(["backup", "restore", "latest", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pre-restore backup saved"));

    assert!(
        fs::read_to_string(temp.path().join("data").join("inventario.txt"))
            .unwrap()
            .contains("1;Widget;Tools;9.99;5")
    );

    inventory(temp.path())
        .args(["backup", "info"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Backups:    2"));
}

#[test]
fn history_shows_entries_and_is_logged() {
    let temp = TempDir::new().unwrap();
    add_widget(temp.path());

    inventory(temp.path())
        .args(["history", "-n", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE:"));

    assert!(audit_log(temp.path()).contains("HISTORY: Viewed last 1 entries"));
}

#[test]
fn stats_summarize_inventory() {
    let temp = TempDir::new().unwrap();
    add_widget(temp.path());

    inventory(temp.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total value: 49.95"));
}
