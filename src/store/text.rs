//! Plain text log file

use eyre::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::LogStore;
use crate::record::LogRecord;

pub const INIT_MARKER: &str = "Logger initialized.";
pub const ROTATED_MARKER: &str = "Log rotated.";

/// Line-oriented log file, appended one record at a time
#[derive(Debug, Clone)]
pub struct TextStore {
    path: PathBuf,
}

impl TextStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn write_marker(&self, marker: &str) -> Result<()> {
        fs::write(&self.path, format!("{}\n", marker))
            .with_context(|| format!("Failed to write log file: {}", self.path.display()))
    }
}

impl LogStore for TextStore {
    fn path(&self) -> &Path {
        &self.path
    }

    fn initialize(&self) -> Result<()> {
        self.write_marker(INIT_MARKER)
    }

    fn reset(&self) -> Result<()> {
        self.write_marker(ROTATED_MARKER)
    }

    fn append(&self, record: &LogRecord) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open log file: {}", self.path.display()))?;

        writeln!(file, "{}", record.format_line()).context("Failed to write log record")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Severity;
    use tempfile::TempDir;

    fn record(level: Severity, message: &str) -> LogRecord {
        LogRecord {
            timestamp: "2026-01-03 12:00:00".to_string(),
            level,
            message: message.to_string(),
            color: Some(level.color_code()),
        }
    }

    #[test]
    fn test_initialize_truncates() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("log.txt");
        fs::write(&path, "old line\nanother\n").unwrap();

        TextStore::new(path.clone()).initialize().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "Logger initialized.\n");
    }

    #[test]
    fn test_append_writes_uncolored_lines() {
        let temp = TempDir::new().unwrap();
        let store = TextStore::new(temp.path().join("log.txt"));
        store.initialize().unwrap();

        store.append(&record(Severity::Info, "one")).unwrap();
        store.append(&record(Severity::Error, "two")).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Logger initialized.",
                "[2026-01-03 12:00:00][INFO] one",
                "[2026-01-03 12:00:00][ERROR] two",
            ]
        );
        assert!(!content.contains('\x1b'));
    }

    #[test]
    fn test_reset_writes_rotation_marker() {
        let temp = TempDir::new().unwrap();
        let store = TextStore::new(temp.path().join("log.txt"));
        store.initialize().unwrap();
        store.append(&record(Severity::Info, "one")).unwrap();

        store.reset().unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "Log rotated.\n");
    }
}
