//! File I/O utilities with atomic writes
//!
//! Whole-file replacement either goes through a temp file and a rename
//! (`WriteMode::Atomic`) or truncates the target in place
//! (`WriteMode::InPlace`).

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::config::settings::WriteMode;
use crate::error::InventoryError;

/// Replace the whole content of `path` with `contents`
pub fn write_file<P: AsRef<Path>>(
    path: P,
    contents: &[u8],
    mode: WriteMode,
) -> Result<(), InventoryError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                InventoryError::Io(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    match mode {
        WriteMode::Atomic => write_atomic(path, contents),
        WriteMode::InPlace => write_in_place(path, contents),
    }
}

/// Write to a sibling temp file, then rename it over `path`
fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), InventoryError> {
    // Temp file must live in the same directory for the rename to be atomic
    let temp_path = temp_path_for(path);

    let mut file = File::create(&temp_path)
        .map_err(|e| InventoryError::Io(format!("Failed to create temp file: {}", e)))?;

    let written = file
        .write_all(contents)
        .and_then(|_| file.flush())
        .and_then(|_| file.sync_all());
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(InventoryError::Io(format!(
            "Failed to write temp file {}: {}",
            temp_path.display(),
            e
        )));
    }
    drop(file);

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        InventoryError::Io(format!("Failed to rename temp file: {}", e))
    })?;

    tracing::debug!(path = %path.display(), bytes = contents.len(), "replaced file atomically");
    Ok(())
}

fn write_in_place(path: &Path, contents: &[u8]) -> Result<(), InventoryError> {
    let mut file = File::create(path).map_err(|e| {
        InventoryError::Io(format!("Failed to open {}: {}", path.display(), e))
    })?;

    file.write_all(contents)
        .and_then(|_| file.flush())
        .map_err(|e| InventoryError::Io(format!("Failed to write {}: {}", path.display(), e)))?;

    tracing::debug!(path = %path.display(), bytes = contents.len(), "rewrote file in place");
    Ok(())
}

/// Append one line to `path`, which must already exist
///
/// If the file does not end with a newline (hand-edited files often don't),
/// one is written first so the new line never merges into the last one.
pub fn append_line<P: AsRef<Path>>(path: P, line: &str) -> Result<(), InventoryError> {
    let path = path.as_ref();

    let mut file = OpenOptions::new()
        .read(true)
        .append(true)
        .open(path)
        .map_err(|e| InventoryError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    let needs_newline = ends_without_newline(&mut file)
        .map_err(|e| InventoryError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    let mut buffer = String::with_capacity(line.len() + 2);
    if needs_newline {
        buffer.push('\n');
    }
    buffer.push_str(line);
    buffer.push('\n');

    file.write_all(buffer.as_bytes())
        .and_then(|_| file.flush())
        .map_err(|e| InventoryError::Io(format!("Failed to append to {}: {}", path.display(), e)))?;

    Ok(())
}

fn ends_without_newline(file: &mut File) -> std::io::Result<bool> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("inventory"));
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("inventario.txt");

        write_file(&path, b"header\n1;a;b;1.00;1\n", WriteMode::Atomic).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "header\n1;a;b;1.00;1\n");
    }

    #[test]
    fn test_atomic_write_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("inventario.txt");

        write_file(&path, b"one\n", WriteMode::Atomic).unwrap();
        write_file(&path, b"two\n", WriteMode::Atomic).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "two\n");
        assert!(!temp_dir.path().join("inventario.txt.tmp").exists());
    }

    #[test]
    fn test_in_place_write_truncates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("inventario.txt");

        write_file(&path, b"a much longer first version\n", WriteMode::InPlace).unwrap();
        write_file(&path, b"short\n", WriteMode::InPlace).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "short\n");
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("x.txt");

        write_file(&path, b"x", WriteMode::Atomic).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_append_line() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("x.txt");
        fs::write(&path, "header\n").unwrap();

        append_line(&path, "first").unwrap();
        append_line(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "header\nfirst\nsecond\n");
    }

    #[test]
    fn test_append_line_repairs_missing_newline() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("x.txt");
        fs::write(&path, "header\n1;a;b;1.00;1").unwrap();

        append_line(&path, "2;c;d;2.00;2").unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "header\n1;a;b;1.00;1\n2;c;d;2.00;2\n"
        );
    }

    #[test]
    fn test_append_line_requires_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        assert!(append_line(temp_dir.path().join("missing.txt"), "x").is_err());
    }
}
