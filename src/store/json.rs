//! JSON array log file

use eyre::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use super::LogStore;
use crate::record::LogRecord;

/// Log file holding a single JSON array, rewritten in full on every append
#[derive(Debug, Clone)]
pub struct JsonArrayStore {
    path: PathBuf,
}

impl JsonArrayStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn write_entries(&self, entries: &[Value]) -> Result<()> {
        let json = serde_json::to_vec(entries).context("Failed to serialize log entries")?;
        fs::write(&self.path, json).with_context(|| format!("Failed to write log file: {}", self.path.display()))
    }

    /// Entries currently in the file.
    ///
    /// Content that is not a JSON array (empty, truncated, corrupt, or some other JSON value)
    /// yields an empty list; only a failed read is an error.
    fn read_entries(&self) -> Result<Vec<Value>> {
        let bytes = fs::read(&self.path).with_context(|| format!("Failed to read log file: {}", self.path.display()))?;

        match serde_json::from_slice(&bytes) {
            Ok(Value::Array(entries)) => Ok(entries),
            _ => Ok(Vec::new()),
        }
    }
}

impl LogStore for JsonArrayStore {
    fn path(&self) -> &Path {
        &self.path
    }

    fn initialize(&self) -> Result<()> {
        self.write_entries(&[])
    }

    fn reset(&self) -> Result<()> {
        self.write_entries(&[])
    }

    fn append(&self, record: &LogRecord) -> Result<()> {
        let mut entries = self.read_entries()?;
        entries.push(serde_json::to_value(record).context("Failed to serialize log record")?);
        self.write_entries(&entries)
    }
}
