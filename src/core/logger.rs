//! Logger and reader capabilities shared by every sink

use super::{
    error::Result, exception::ExceptionInfo, log_entry::LogEntry, log_level::LogLevel,
    log_session::LogSession,
};

/// A destination for log entries.
///
/// `log` reports sink failures as `Err` so a fan-out can isolate them. The
/// severity helpers in [`LoggerExt`] never return an error: a failed write
/// is reported on stderr and otherwise ignored.
pub trait Logger: Send + Sync {
    fn log(&self, entry: &LogEntry) -> Result<()>;

    fn name(&self) -> &str;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    /// Query access, for sinks that can read their entries back
    fn as_reader(&self) -> Option<&dyn LogReader> {
        None
    }

    fn log_or_report(&self, entry: LogEntry) {
        if let Err(e) = self.log(&entry) {
            eprintln!("[LOGGER ERROR] Sink '{}' failed: {}", self.name(), e);
        }
    }
}

/// Severity helpers for every logger, concrete or `dyn Logger`.
///
/// Each helper captures one entry at the call site, stamped with the active
/// [`ExecutionContext`](super::ExecutionContext), and hands it to
/// [`Logger::log_or_report`].
pub trait LoggerExt: Logger {
    fn trace(&self, message: impl Into<String>) {
        self.log_or_report(LogEntry::capture(LogLevel::Trace, message));
    }

    fn debug(&self, message: impl Into<String>) {
        self.log_or_report(LogEntry::capture(LogLevel::Debug, message));
    }

    fn info(&self, message: impl Into<String>) {
        self.log_or_report(LogEntry::capture(LogLevel::Information, message));
    }

    fn warn(&self, message: impl Into<String>) {
        self.log_or_report(LogEntry::capture(LogLevel::Warning, message));
    }

    fn error(&self, message: impl Into<String>) {
        self.log_or_report(LogEntry::capture(LogLevel::Error, message));
    }

    fn critical(&self, message: impl Into<String>) {
        self.log_or_report(LogEntry::capture(LogLevel::Critical, message));
    }

    /// Helper for error logging with attached error details
    fn error_with_exception(&self, message: impl Into<String>, exception: ExceptionInfo) {
        self.log_or_report(LogEntry::capture(LogLevel::Error, message).with_exception(exception));
    }

    /// Helper for critical logging with attached error details
    fn critical_with_exception(&self, message: impl Into<String>, exception: ExceptionInfo) {
        self.log_or_report(
            LogEntry::capture(LogLevel::Critical, message).with_exception(exception),
        );
    }
}

impl<T: Logger + ?Sized> LoggerExt for T {}

/// Read-back of stored entries as sessions.
///
/// Lookups never fail: a missing store or an unknown key yields an empty
/// session.
pub trait LogReader: Send + Sync {
    fn read_by_correlation_id(&self, correlation_id: &str) -> LogSession;

    /// Session id is empty for category-only queries
    fn read_by_category(&self, category: &str) -> LogSession;

    fn read_by_correlation_id_and_category(&self, correlation_id: &str, category: &str)
        -> LogSession;

    /// Session of the correlation id whose newest entry is the newest overall
    fn read_last_session(&self) -> LogSession;
}
