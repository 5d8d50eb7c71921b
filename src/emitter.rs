//! Log emitter with console and file sinks
//!
//! Every call filters, formats and writes inline on the calling thread. A single lock
//! covers the whole filter + console + rotate + read + append + write sequence, so
//! concurrent callers never interleave partial JSON rewrites.

use colored::*;
use std::fmt::Display;
use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::config::EmitterConfig;
use crate::level::{Severity, Threshold};
use crate::record::LogRecord;
use crate::store::{self, LogStore};

struct EmitterState {
    threshold: Threshold,
    console: Box<dyn Write + Send>,
    errors: Box<dyn Write + Send>,
    store: Option<Box<dyn LogStore>>,
}

/// Report a sink failure on the error channel
fn report<W: Write + ?Sized>(errors: &mut W, what: &str, err: impl Display) {
    let _ = writeln!(errors, "{} {}: {:#}", "✗".red(), what, err);
    let _ = errors.flush();
}

/// Leveled logger fanning records out to the console and a log file
pub struct LogEmitter {
    config: EmitterConfig,
    state: Mutex<EmitterState>,
}

impl LogEmitter {
    /// Create an emitter writing to stdout, reporting failures on stderr
    pub fn new(config: EmitterConfig) -> Self {
        Self::with_writers(config, io::stdout(), io::stderr())
    }

    /// Create an emitter with explicit console and error channels.
    ///
    /// When the file sink is enabled the target file is truncated here. A failure is
    /// reported on `errors` and construction carries on; later writes report their own
    /// failures.
    pub fn with_writers<C, E>(config: EmitterConfig, console: C, errors: E) -> Self
    where
        C: Write + Send + 'static,
        E: Write + Send + 'static,
    {
        let mut state = EmitterState {
            threshold: Threshold::Active(config.level),
            console: Box::new(console),
            errors: Box::new(errors),
            store: None,
        };

        if config.file {
            let path = EmitterConfig::expand_path(&config.file_path);
            let store = store::for_format(config.format, path);
            if let Err(e) = store.initialize() {
                report(&mut state.errors, "Error initializing log file", e);
            }
            state.store = Some(store);
        }

        Self {
            config,
            state: Mutex::new(state),
        }
    }

    /// Register this emitter as the global `log` facade logger
    pub fn install(self) -> Result<(), log::SetLoggerError> {
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(log::LevelFilter::Trace);
        Ok(())
    }

    // A panic in a writer must not take logging down with it
    fn lock(&self) -> MutexGuard<'_, EmitterState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The configuration this emitter was built with.
    ///
    /// `level` here is the construction-time minimum; `set_level` and `disable` change the
    /// live threshold reported by [`LogEmitter::level`], not this value.
    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Set the minimum level by name; unknown names become INFO.
    ///
    /// Also re-enables a disabled emitter.
    pub fn set_level(&self, name: &str) {
        self.lock().threshold = Threshold::Active(Severity::from_name(name));
    }

    /// Suppress every record until `set_level` is called again
    pub fn disable(&self) {
        self.lock().threshold = Threshold::Disabled;
    }

    /// Active minimum level, `None` while disabled
    pub fn level(&self) -> Option<Severity> {
        self.lock().threshold.minimum()
    }

    pub fn is_disabled(&self) -> bool {
        self.lock().threshold == Threshold::Disabled
    }

    /// Whether a record at `level` would currently be emitted
    pub fn is_enabled(&self, level: Severity) -> bool {
        self.lock().threshold.admits(level)
    }

    /// Emit one record at `level`.
    ///
    /// Never fails: file sink problems are reported on the error channel and do not
    /// affect console output.
    pub fn emit(&self, level: Severity, message: impl Into<String>) {
        let mut guard = self.lock();
        let EmitterState {
            threshold,
            console,
            errors,
            store: file,
        } = &mut *guard;

        if !threshold.admits(level) {
            return;
        }

        let record = LogRecord::new(level, message, self.config.use_colors);

        if self.config.console {
            let _ = writeln!(console, "{}", record.format_console());
            let _ = console.flush();
        }

        if let Some(file) = file {
            store::rotate_if_needed(&**file, self.config.max_file_size);
            if let Err(e) = file.append(&record) {
                report(errors, "Error writing to log file", e);
            }
        }
    }

    pub fn trace(&self, message: impl Into<String>) {
        self.emit(Severity::Trace, message);
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.emit(Severity::Debug, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.emit(Severity::Info, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.emit(Severity::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.emit(Severity::Error, message);
    }

    pub fn critical(&self, message: impl Into<String>) {
        self.emit(Severity::Critical, message);
    }
}

impl log::Log for LogEmitter {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.is_enabled(metadata.level().into())
    }

    fn log(&self, record: &log::Record) {
        self.emit(record.level().into(), record.args().to_string());
    }

    fn flush(&self) {
        let _ = self.lock().console.flush();
    }
}
