use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::level::Severity;

/// Serialization used by the file sink
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One human-readable line per record
    #[default]
    Text,
    /// The whole file is a single JSON array of records
    Json,
}

impl LogFormat {
    /// Case-insensitive lookup; anything other than "json" is text
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

/// Emitter configuration, fixed at construction
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// Minimum severity; unknown names in config files become INFO
    pub level: Severity,
    /// Write records to the console sink
    pub console: bool,
    /// Persist records to `file_path`
    pub file: bool,
    pub file_path: PathBuf,
    /// Rotate once the file grows past this many bytes (0 = never)
    pub max_file_size: u64,
    /// Color console lines and store the color code in JSON records
    pub use_colors: bool,
    pub format: LogFormat,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            level: Severity::Info,
            console: true,
            file: false,
            file_path: PathBuf::from("log.txt"),
            max_file_size: 0,
            use_colors: true,
            format: LogFormat::Text,
        }
    }
}

impl EmitterConfig {
    /// Set the minimum level by name (unknown names become INFO)
    pub fn with_level(mut self, name: &str) -> Self {
        self.level = Severity::from_name(name);
        self
    }

    pub fn with_console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    /// Enable the file sink at `path`
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = true;
        self.file_path = path.into();
        self
    }

    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.use_colors = enabled;
        self
    }

    /// Set the file format by name ("json" or anything else for text)
    pub fn with_format(mut self, name: &str) -> Self {
        self.format = LogFormat::from_name(name);
        self
    }

    /// Load configuration from a YAML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        Self::from_yaml_str(&content).with_context(|| format!("Failed to load config from {}", path.as_ref().display()))
    }

    /// Parse configuration from YAML text; missing keys keep their defaults
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse config file")
    }

    /// Expand a leading `~` in a path
    pub fn expand_path(path: &Path) -> PathBuf {
        let path_str = path.to_string_lossy();
        PathBuf::from(shellexpand::tilde(&path_str).as_ref())
    }
}
