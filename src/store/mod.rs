//! File persistence for emitted records
//!
//! Two encodings are provided:
//! - Text - one rendered line per record, appended
//! - JSON - the whole file is a single array, read and rewritten on every append
//!
//! Both sit behind [`LogStore`] so the emitter does not depend on the encoding.

mod json;
mod rotation;
mod text;

pub use json::JsonArrayStore;
pub use rotation::{backup_path, rotate_if_needed};
pub use text::TextStore;

use eyre::Result;
use std::path::{Path, PathBuf};

use crate::config::LogFormat;
use crate::record::LogRecord;

/// A persisted log file in one encoding
pub trait LogStore: Send {
    /// Path of the active log file
    fn path(&self) -> &Path;

    /// Create or truncate the file at startup
    fn initialize(&self) -> Result<()>;

    /// Create a fresh file after the previous one was rotated away
    fn reset(&self) -> Result<()>;

    /// Persist one record
    fn append(&self, record: &LogRecord) -> Result<()>;
}

/// Build the store for a configured format
pub fn for_format(format: LogFormat, path: PathBuf) -> Box<dyn LogStore> {
    match format {
        LogFormat::Text => Box::new(TextStore::new(path)),
        LogFormat::Json => Box::new(JsonArrayStore::new(path)),
    }
}
