//! Sink configuration

use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Conventional log directory used when none is configured
pub const DEFAULT_LOG_DIRECTORY: &str = "logs/app";

/// Default file name prefix: `<prefix>-<yyyy-MM-dd>.log`
pub const DEFAULT_FILE_PREFIX: &str = "mcp";

/// Options shared by the built-in sinks
///
/// # Examples
///
/// ```
/// use mcp_logger_system::core::{LogLevel, LoggerOptions};
///
/// let options = LoggerOptions::new()
///     .with_minimum_level(LogLevel::Debug)
///     .with_log_directory("/tmp/mcp-logs")
///     .with_category("agent");
///
/// assert_eq!(options.minimum_level, LogLevel::Debug);
/// assert!(options.enable_console);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerOptions {
    /// Entries below this level are dropped silently
    pub minimum_level: LogLevel,
    /// File sink directory; [`DEFAULT_LOG_DIRECTORY`] when unset
    pub log_directory: Option<PathBuf>,
    pub enable_console: bool,
    /// Category stamped on entries that carry none
    pub category: Option<String>,
    pub file_prefix: String,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            minimum_level: LogLevel::Information,
            log_directory: None,
            enable_console: true,
            category: None,
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
        }
    }
}

impl LoggerOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_minimum_level(mut self, level: LogLevel) -> Self {
        self.minimum_level = level;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_log_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_directory = Some(dir.into());
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_console(mut self, enabled: bool) -> Self {
        self.enable_console = enabled;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    /// Configured directory, or the conventional default
    pub fn resolved_log_directory(&self) -> PathBuf {
        self.log_directory
            .clone()
            .unwrap_or_else(|| Path::new(DEFAULT_LOG_DIRECTORY).to_path_buf())
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    /// Whether an entry at `level` passes the minimum-level filter
    #[inline]
    pub fn accepts(&self, level: LogLevel) -> bool {
        level >= self.minimum_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = LoggerOptions::default();
        assert_eq!(options.minimum_level, LogLevel::Information);
        assert!(options.enable_console);
        assert_eq!(options.file_prefix, "mcp");
        assert_eq!(options.resolved_log_directory(), PathBuf::from("logs/app"));
    }

    #[test]
    fn test_accepts_at_and_above_minimum() {
        let options = LoggerOptions::new().with_minimum_level(LogLevel::Warning);
        assert!(!options.accepts(LogLevel::Information));
        assert!(options.accepts(LogLevel::Warning));
        assert!(options.accepts(LogLevel::Critical));
    }

    #[test]
    fn test_deserialize_partial() {
        let options: LoggerOptions = serde_json::from_str(
            r#"{ "minimum_level": "Debug", "log_directory": "/var/log/mcp", "enable_console": false }"#,
        )
        .unwrap();
        assert_eq!(options.minimum_level, LogLevel::Debug);
        assert_eq!(options.log_directory, Some(PathBuf::from("/var/log/mcp")));
        assert!(!options.enable_console);
        assert_eq!(options.file_prefix, "mcp");
    }

    #[test]
    fn test_empty_category_is_absent() {
        assert_eq!(LoggerOptions::new().with_category("").category(), None);
    }
}
