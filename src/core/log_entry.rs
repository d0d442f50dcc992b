//! Log entry structure

use super::exception::ExceptionInfo;
use super::execution_context::ExecutionContext;
use super::log_level::LogLevel;
use super::properties::Properties;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One log event.
///
/// Fields are fixed once the entry is built; the `with_*` methods consume
/// the value and are meant for construction only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    timestamp: DateTime<Utc>,
    level: LogLevel,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    exception: Option<ExceptionInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<Properties>,
    /// Original text when the entry was reconstructed from storage
    #[serde(skip_serializing_if = "Option::is_none")]
    raw_line: Option<String>,
}

impl LogEntry {
    /// Create an entry with no execution context, timestamped now
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message: message.into(),
            exception: None,
            correlation_id: None,
            tool_name: None,
            category: None,
            properties: None,
            raw_line: None,
        }
    }

    /// Create an entry stamped with the execution context active right now
    pub fn capture(level: LogLevel, message: impl Into<String>) -> Self {
        let entry = Self::new(level, message);
        match ExecutionContext::current() {
            Some(ctx) => entry.with_execution_context(&ctx),
            None => entry,
        }
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    #[must_use]
    pub fn with_exception(mut self, exception: ExceptionInfo) -> Self {
        self.exception = Some(exception);
        self
    }

    #[must_use]
    pub fn with_execution_context(mut self, context: &ExecutionContext) -> Self {
        self.correlation_id = Some(context.correlation_id().to_string());
        self.tool_name = context.tool_name().map(String::from);
        self
    }

    #[must_use]
    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }

    #[must_use]
    pub fn with_tool_name(mut self, tool_name: impl Into<String>) -> Self {
        self.tool_name = Some(tool_name.into());
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = Some(properties);
        self
    }

    #[must_use]
    pub(crate) fn with_raw_line(mut self, line: impl Into<String>) -> Self {
        self.raw_line = Some(line.into());
        self
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn exception(&self) -> Option<&ExceptionInfo> {
        self.exception.as_ref()
    }

    pub fn correlation_id(&self) -> Option<&str> {
        non_empty(&self.correlation_id)
    }

    pub fn tool_name(&self) -> Option<&str> {
        non_empty(&self.tool_name)
    }

    pub fn category(&self) -> Option<&str> {
        non_empty(&self.category)
    }

    pub fn properties(&self) -> Option<&Properties> {
        self.properties.as_ref()
    }

    pub fn raw_line(&self) -> Option<&str> {
        self.raw_line.as_deref()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::execution_context::begin_tool;
    use crate::core::properties::FieldValue;

    #[test]
    fn test_new_has_no_context() {
        let entry = LogEntry::new(LogLevel::Information, "hello");
        assert_eq!(entry.message(), "hello");
        assert!(entry.correlation_id().is_none());
        assert!(entry.tool_name().is_none());
        assert!(entry.exception().is_none());
    }

    #[test]
    fn test_capture_stamps_active_scope() {
        let scope = begin_tool("read_file");
        let entry = LogEntry::capture(LogLevel::Debug, "reading");
        assert_eq!(entry.correlation_id(), Some(scope.correlation_id()));
        assert_eq!(entry.tool_name(), Some("read_file"));
        drop(scope);

        let after = LogEntry::capture(LogLevel::Debug, "done");
        assert!(after.correlation_id().is_none());
    }

    #[test]
    fn test_empty_strings_read_as_absent() {
        let entry = LogEntry::new(LogLevel::Warning, "")
            .with_correlation_id("")
            .with_category("");
        assert!(entry.correlation_id().is_none());
        assert!(entry.category().is_none());
        assert_eq!(entry.message(), "");
    }

    #[test]
    fn test_serializes_without_absent_fields() {
        let entry = LogEntry::new(LogLevel::Error, "boom").with_tool_name("git");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["level"], "Error");
        assert_eq!(json["tool_name"], "git");
        assert!(json.get("correlation_id").is_none());
        assert!(json.get("properties").is_none());
    }

    #[test]
    fn test_properties_are_kept_and_exported() {
        let entry = LogEntry::new(LogLevel::Information, "retrying")
            .with_tool_name("fetch")
            .with_properties(
                Properties::new()
                    .with_field("attempt", 3)
                    .with_field("endpoint", "https://api.local")
                    .with_field("cached", false),
            );

        let properties = entry.properties().expect("properties attached");
        assert_eq!(properties.len(), 3);
        assert_eq!(properties.get("attempt"), Some(&FieldValue::Int(3)));
        assert_eq!(properties.get("cached"), Some(&FieldValue::Bool(false)));
        assert!(properties.get("missing").is_none());

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["properties"]["attempt"], 3);
        assert_eq!(json["properties"]["endpoint"], "https://api.local");
        assert_eq!(json["properties"]["cached"], false);

        let restored: LogEntry = serde_json::from_value(json).unwrap();
        assert_eq!(restored.properties(), entry.properties());
    }
}
