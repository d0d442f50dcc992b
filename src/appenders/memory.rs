//! In-memory appender with session read-back

use crate::core::{LogEntry, LogReader, LogSession, Logger, LoggerOptions, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default)]
struct Store {
    entries: Vec<Arc<LogEntry>>,
    by_correlation: HashMap<String, Vec<Arc<LogEntry>>>,
}

/// Keeps accepted entries in memory, indexed by correlation id.
///
/// Writers and readers share one lock, so a query sees a consistent
/// snapshot: every entry it returns is fully indexed.
pub struct InMemoryAppender {
    options: LoggerOptions,
    store: RwLock<Store>,
}

impl InMemoryAppender {
    pub fn new(options: LoggerOptions) -> Self {
        Self {
            options,
            store: RwLock::new(Store::default()),
        }
    }

    pub fn options(&self) -> &LoggerOptions {
        &self.options
    }

    /// Snapshot of every accepted entry, in arrival order
    pub fn entries(&self) -> Vec<LogEntry> {
        self.store
            .read()
            .entries
            .iter()
            .map(|e| LogEntry::clone(e))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.store.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.read().entries.is_empty()
    }

    /// Correlation ids seen so far, in no particular order
    pub fn correlation_ids(&self) -> Vec<String> {
        self.store.read().by_correlation.keys().cloned().collect()
    }

    pub fn clear(&self) {
        let mut store = self.store.write();
        store.entries.clear();
        store.by_correlation.clear();
    }

    fn collect<'a, I>(entries: I) -> Vec<LogEntry>
    where
        I: IntoIterator<Item = &'a Arc<LogEntry>>,
    {
        entries.into_iter().map(|e| LogEntry::clone(e)).collect()
    }
}

impl Logger for InMemoryAppender {
    fn log(&self, entry: &LogEntry) -> Result<()> {
        if !self.options.accepts(entry.level()) {
            return Ok(());
        }

        let entry = match (entry.category(), self.options.category()) {
            (None, Some(category)) => Arc::new(entry.clone().with_category(category)),
            _ => Arc::new(entry.clone()),
        };

        let mut store = self.store.write();
        if let Some(cid) = entry.correlation_id() {
            store
                .by_correlation
                .entry(cid.to_string())
                .or_default()
                .push(Arc::clone(&entry));
        }
        store.entries.push(entry);
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }

    fn as_reader(&self) -> Option<&dyn LogReader> {
        Some(self)
    }
}

impl LogReader for InMemoryAppender {
    fn read_by_correlation_id(&self, correlation_id: &str) -> LogSession {
        let store = self.store.read();
        match store.by_correlation.get(correlation_id) {
            Some(entries) => LogSession::new(correlation_id, Self::collect(entries)),
            None => LogSession::empty(correlation_id),
        }
    }

    fn read_by_category(&self, category: &str) -> LogSession {
        let store = self.store.read();
        let entries = store
            .entries
            .iter()
            .filter(|e| e.category() == Some(category));
        LogSession::new("", Self::collect(entries))
    }

    fn read_by_correlation_id_and_category(
        &self,
        correlation_id: &str,
        category: &str,
    ) -> LogSession {
        let store = self.store.read();
        let entries = store
            .by_correlation
            .get(correlation_id)
            .into_iter()
            .flatten()
            .filter(|e| e.category() == Some(category));
        LogSession::new(correlation_id, Self::collect(entries))
    }

    fn read_last_session(&self) -> LogSession {
        let store = self.store.read();
        let latest = store
            .by_correlation
            .iter()
            .filter_map(|(cid, entries)| {
                entries
                    .iter()
                    .map(|e| e.timestamp())
                    .max()
                    .map(|newest| (newest, cid))
            })
            .max_by_key(|(newest, _)| *newest);

        match latest {
            Some((_, cid)) => {
                LogSession::new(cid.as_str(), Self::collect(&store.by_correlation[cid]))
            }
            None => LogSession::empty(""),
        }
    }
}
