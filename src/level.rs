//! Severity levels and the emitter's filtering threshold
//!
//! Each severity carries an integer rank used for threshold comparison and an ANSI
//! color code used for console output and persisted JSON records.

use colored::Color;
use eyre::{Result, bail};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// ANSI sequence that ends a colored console line
pub const RESET_CODE: &str = "\x1b[0m";

/// Ordered log severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i8)]
pub enum Severity {
    Trace = -1,
    Debug = 0,
    Info = 1,
    Warning = 2,
    Error = 3,
    Critical = 4,
}

impl Severity {
    /// All severities, lowest rank first
    pub const ALL: [Severity; 6] = [
        Severity::Trace,
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Critical,
    ];

    /// Integer rank used for threshold comparison
    pub fn rank(self) -> i32 {
        self as i32
    }

    /// Upper-case name as written to the console and to persisted records
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }

    /// ANSI escape prefix assigned to this severity
    pub fn color_code(self) -> String {
        let code = match self {
            Severity::Trace => Color::White.to_fg_str(),
            Severity::Debug => Color::BrightBlue.to_fg_str(),
            Severity::Info => Color::BrightGreen.to_fg_str(),
            Severity::Warning => Color::BrightYellow.to_fg_str(),
            Severity::Error => Color::BrightRed.to_fg_str(),
            Severity::Critical => Color::Red.to_bg_str(),
        };
        format!("\x1b[{}m", code)
    }

    /// Case-insensitive lookup by name.
    ///
    /// Unknown names fall back to `Info`. This is the lookup used for configuration and
    /// `set_level`; callers that want to reject bad input should use `str::parse` instead.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or(Severity::Info)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        match Severity::ALL.iter().find(|level| level.as_str().eq_ignore_ascii_case(wanted)) {
            Some(level) => Ok(*level),
            None => bail!("Unknown log level: {}", s),
        }
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Severity::from_name(&name))
    }
}

impl From<log::Level> for Severity {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Trace => Severity::Trace,
            log::Level::Debug => Severity::Debug,
            log::Level::Info => Severity::Info,
            log::Level::Warn => Severity::Warning,
            log::Level::Error => Severity::Error,
        }
    }
}

/// Minimum severity gate held by the emitter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Threshold {
    /// Records at or above this severity pass
    Active(Severity),
    /// Sits above every finite rank; nothing passes
    Disabled,
}

impl Threshold {
    /// Whether a record of `level` passes this threshold
    pub fn admits(self, level: Severity) -> bool {
        match self {
            Threshold::Active(minimum) => level.rank() >= minimum.rank(),
            Threshold::Disabled => false,
        }
    }

    /// The active minimum, or `None` when disabled
    pub fn minimum(self) -> Option<Severity> {
        match self {
            Threshold::Active(minimum) => Some(minimum),
            Threshold::Disabled => None,
        }
    }
}
