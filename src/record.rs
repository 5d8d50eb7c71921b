//! Log records and their rendered forms

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::level::{RESET_CODE, Severity};

/// Timestamp layout, second precision, local time
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single emitted record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Local time the record was created
    pub timestamp: String,
    pub level: Severity,
    pub message: String,
    /// ANSI color prefix, present only when color output was enabled
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub color: Option<String>,
}

impl LogRecord {
    /// Create a record stamped with the current local time
    pub fn new(level: Severity, message: impl Into<String>, use_colors: bool) -> Self {
        Self {
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            level,
            message: message.into(),
            color: use_colors.then(|| level.color_code()),
        }
    }

    /// `[timestamp][LEVEL] message`, without color
    pub fn format_line(&self) -> String {
        format!("[{}][{}] {}", self.timestamp, self.level, self.message)
    }

    /// Line for the console sink, wrapped in the record's color when it has one
    pub fn format_console(&self) -> String {
        match &self.color {
            Some(code) => format!("{}{}{}", code, self.format_line(), RESET_CODE),
            None => self.format_line(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn fixed(level: Severity, message: &str, color: Option<&str>) -> LogRecord {
        LogRecord {
            timestamp: "2026-01-03 12:00:00".to_string(),
            level,
            message: message.to_string(),
            color: color.map(|c| c.to_string()),
        }
    }

    #[test]
    fn test_timestamp_format() {
        let record = LogRecord::new(Severity::Info, "hello", false);
        assert_eq!(record.timestamp.len(), 19);
        assert!(NaiveDateTime::parse_from_str(&record.timestamp, TIMESTAMP_FORMAT).is_ok());
    }

    #[test]
    fn test_color_only_when_enabled() {
        assert_eq!(LogRecord::new(Severity::Error, "x", true).color.as_deref(), Some("\x1b[91m"));
        assert!(LogRecord::new(Severity::Error, "x", false).color.is_none());
    }

    #[test]
    fn test_format_line() {
        let record = fixed(Severity::Error, "boom", None);
        assert_eq!(record.format_line(), "[2026-01-03 12:00:00][ERROR] boom");
        assert_eq!(record.format_console(), record.format_line());
    }

    #[test]
    fn test_format_console_colored() {
        let record = fixed(Severity::Info, "ready", Some("\x1b[92m"));
        assert_eq!(record.format_console(), "\x1b[92m[2026-01-03 12:00:00][INFO] ready\x1b[0m");
    }

    #[test]
    fn test_json_shape() {
        let plain = serde_json::to_value(fixed(Severity::Debug, "a", None)).unwrap();
        assert_eq!(
            plain,
            serde_json::json!({"timestamp": "2026-01-03 12:00:00", "level": "DEBUG", "message": "a"})
        );

        let colored = serde_json::to_value(fixed(Severity::Warning, "b", Some("\x1b[93m"))).unwrap();
        assert_eq!(colored["color"], "\x1b[93m");
        assert_eq!(colored["level"], "WARNING");
    }
}
