//! Leveled, optionally colorized, optionally persisted log output
//!
//! A [`LogEmitter`] filters records against a minimum [`Severity`], prints them to the
//! console and appends them to a log file stored either as text lines or as a single
//! JSON array. The file is rotated to `<path>.old` once it grows past a configured size.
//!
//! ```no_run
//! use micrologger::{EmitterConfig, LogEmitter};
//!
//! let logger = LogEmitter::new(
//!     EmitterConfig::default()
//!         .with_level("debug")
//!         .with_file("app.json")
//!         .with_format("json")
//!         .with_max_file_size(64 * 1024),
//! );
//!
//! logger.debug("starting");
//! logger.error("something broke");
//! ```

pub mod config;
pub mod emitter;
pub mod level;
pub mod record;
pub mod store;

pub use config::{EmitterConfig, LogFormat};
pub use emitter::LogEmitter;
pub use level::{Severity, Threshold};
pub use record::LogRecord;
pub use store::{JsonArrayStore, LogStore, TextStore};
