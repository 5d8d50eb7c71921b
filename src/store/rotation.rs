//! Size-triggered rotation
//!
//! Rotation is best effort: any I/O failure leaves the file as it is and the
//! pending write goes ahead against it.

use eyre::{Context, Result};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{Seek, SeekFrom};
use std::path::{Path, PathBuf};

use super::LogStore;

/// `<path>.old`, where a rotated file is kept
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".old");
    PathBuf::from(name)
}

/// Rotate the store's file if it has grown past `max_size` bytes.
///
/// A `max_size` of 0 disables rotation. Returns whether a rotation happened;
/// errors are swallowed.
pub fn rotate_if_needed(store: &dyn LogStore, max_size: u64) -> bool {
    if max_size == 0 {
        return false;
    }

    rotate(store, max_size).unwrap_or(false)
}

fn rotate(store: &dyn LogStore, max_size: u64) -> Result<bool> {
    let path = store.path();

    let mut file = File::open(path).with_context(|| format!("Failed to open log file: {}", path.display()))?;
    let size = file.seek(SeekFrom::End(0)).context("Failed to measure log file")?;
    drop(file);

    if size <= max_size {
        return Ok(false);
    }

    // fs::rename replaces an existing backup
    fs::rename(path, backup_path(path)).context("Failed to move log file aside")?;
    store.reset()?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{JsonArrayStore, TextStore};
    use tempfile::TempDir;

    #[test]
    fn test_backup_path() {
        assert_eq!(backup_path(Path::new("/tmp/app.log")), PathBuf::from("/tmp/app.log.old"));
        assert_eq!(backup_path(Path::new("t.json")), PathBuf::from("t.json.old"));
    }

    #[test]
    fn test_unlimited_never_rotates() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("log.txt");
        fs::write(&path, "x".repeat(4096)).unwrap();

        assert!(!rotate_if_needed(&TextStore::new(path.clone()), 0));
        assert!(!backup_path(&path).exists());
    }

    #[test]
    fn test_under_limit_keeps_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("log.txt");
        fs::write(&path, "0123456789").unwrap();

        // equal to the limit is not over it
        assert!(!rotate_if_needed(&TextStore::new(path.clone()), 10));
        assert_eq!(fs::read_to_string(&path).unwrap(), "0123456789");
    }

    #[test]
    fn test_over_limit_rotates_text() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("log.txt");
        fs::write(&path, "0123456789A").unwrap();

        assert!(rotate_if_needed(&TextStore::new(path.clone()), 10));
        assert_eq!(fs::read_to_string(backup_path(&path)).unwrap(), "0123456789A");
        assert_eq!(fs::read_to_string(&path).unwrap(), "Log rotated.\n");
    }

    #[test]
    fn test_over_limit_rotates_json_and_replaces_backup() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("log.json");
        fs::write(backup_path(&path), "stale backup").unwrap();
        fs::write(&path, "[{\"message\":\"old\"}]").unwrap();

        assert!(rotate_if_needed(&JsonArrayStore::new(path.clone()), 5));
        assert_eq!(fs::read_to_string(backup_path(&path)).unwrap(), "[{\"message\":\"old\"}]");
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_missing_file_is_swallowed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.log");

        assert!(!rotate_if_needed(&TextStore::new(path.clone()), 1));
        assert!(!path.exists());
    }
}
