//! Fan-out logger forwarding each entry to a fixed list of sinks

use super::{
    error::{LoggerError, Result},
    log_entry::LogEntry,
    log_session::LogSession,
    logger::{LogReader, Logger},
    metrics::LoggerMetrics,
};
use std::sync::Arc;

/// Forwards every entry to each sink in registration order.
///
/// **Per-sink isolation**: a sink that returns an error or panics is
/// reported on stderr and skipped; the remaining sinks still receive the
/// entry and the caller never sees the failure.
///
/// # Example
///
/// ```
/// use mcp_logger_system::prelude::*;
/// use std::sync::Arc;
///
/// let memory = Arc::new(InMemoryAppender::new(LoggerOptions::default()));
/// let logger = CompositeLogger::new(vec![memory.clone() as Arc<dyn Logger>]);
///
/// logger.info("tool started");
/// assert_eq!(memory.entries().len(), 1);
/// ```
pub struct CompositeLogger {
    sinks: Vec<Arc<dyn Logger>>,
    metrics: LoggerMetrics,
}

impl CompositeLogger {
    /// An empty list is valid and yields a no-op logger
    #[must_use]
    pub fn new(sinks: Vec<Arc<dyn Logger>>) -> Self {
        Self {
            sinks,
            metrics: LoggerMetrics::new(),
        }
    }

    /// Construct from a sink collection that may be absent.
    ///
    /// Fails with [`LoggerError::InvalidArgument`] when `sinks` is `None`.
    pub fn try_new<I>(sinks: Option<I>) -> Result<Self>
    where
        I: IntoIterator<Item = Arc<dyn Logger>>,
    {
        let sinks = sinks.ok_or_else(|| LoggerError::invalid_argument("sinks"))?;
        Ok(Self::new(sinks.into_iter().collect()))
    }

    pub fn sinks(&self) -> &[Arc<dyn Logger>] {
        &self.sinks
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Get the fan-out metrics for detailed observability
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// First sink able to answer queries, in registration order
    fn reader(&self) -> Option<&dyn LogReader> {
        self.sinks.iter().find_map(|sink| sink.as_reader())
    }

    fn deliver(&self, idx: usize, sink: &Arc<dyn Logger>, entry: &LogEntry) {
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| sink.log(entry)));

        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                self.metrics.record_sink_failure();
                eprintln!(
                    "[LOGGER ERROR] Sink #{} ({}) failed: {}",
                    idx,
                    sink.name(),
                    e
                );
            }
            Err(panic_info) => {
                self.metrics.record_sink_panic();
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                eprintln!(
                    "[LOGGER CRITICAL] {}. Other sinks continue to function.",
                    LoggerError::sink_panicked(format!("#{} ({})", idx, sink.name()), panic_msg)
                );
            }
        }
    }
}

impl Logger for CompositeLogger {
    fn log(&self, entry: &LogEntry) -> Result<()> {
        self.metrics.record_dispatched();
        for (idx, sink) in self.sinks.iter().enumerate() {
            self.deliver(idx, sink, entry);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "composite"
    }

    /// Flushes every sink; the first error is returned after all were tried
    fn flush(&self) -> Result<()> {
        let mut first_error = None;
        for sink in &self.sinks {
            if let Err(e) = sink.flush() {
                eprintln!("[LOGGER ERROR] Sink '{}' flush failed: {}", sink.name(), e);
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn as_reader(&self) -> Option<&dyn LogReader> {
        self.reader().map(|_| self as &dyn LogReader)
    }
}

impl LogReader for CompositeLogger {
    fn read_by_correlation_id(&self, correlation_id: &str) -> LogSession {
        self.reader()
            .map(|r| r.read_by_correlation_id(correlation_id))
            .unwrap_or_else(|| LogSession::empty(correlation_id))
    }

    fn read_by_category(&self, category: &str) -> LogSession {
        self.reader()
            .map(|r| r.read_by_category(category))
            .unwrap_or_else(|| LogSession::empty(""))
    }

    fn read_by_correlation_id_and_category(
        &self,
        correlation_id: &str,
        category: &str,
    ) -> LogSession {
        self.reader()
            .map(|r| r.read_by_correlation_id_and_category(correlation_id, category))
            .unwrap_or_else(|| LogSession::empty(correlation_id))
    }

    fn read_last_session(&self) -> LogSession {
        self.reader()
            .map(|r| r.read_last_session())
            .unwrap_or_else(|| LogSession::empty(""))
    }
}

impl std::fmt::Debug for CompositeLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeLogger")
            .field(
                "sinks",
                &self.sinks.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .field("metrics", &self.metrics)
            .finish()
    }
}
