//! Ordered query results

use super::error::Result;
use super::log_entry::LogEntry;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// All entries for one correlation id (or category filter), oldest first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogSession {
    correlation_id: String,
    entries: Vec<LogEntry>,
}

impl LogSession {
    /// Build a session; entries are sorted by timestamp (stable for ties).
    pub fn new(correlation_id: impl Into<String>, mut entries: Vec<LogEntry>) -> Self {
        entries.sort_by_key(LogEntry::timestamp);
        Self {
            correlation_id: correlation_id.into(),
            entries,
        }
    }

    pub fn empty(correlation_id: impl Into<String>) -> Self {
        Self {
            correlation_id: correlation_id.into(),
            entries: Vec::new(),
        }
    }

    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.entries.last().map(LogEntry::timestamp)
    }

    /// Pretty-printed JSON, e.g. for returning a session from a tool call
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<'a> IntoIterator for &'a LogSession {
    type Item = &'a LogEntry;
    type IntoIter = std::slice::Iter<'a, LogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
