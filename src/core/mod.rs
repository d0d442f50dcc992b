//! Core logger types and traits

pub mod composite;
pub mod error;
pub mod exception;
pub mod execution_context;
pub mod line_parser;
pub mod log_entry;
pub mod log_level;
pub mod log_session;
pub mod logger;
pub mod metrics;
pub mod options;
pub mod properties;
pub mod retention;
pub mod timestamp;

pub use composite::CompositeLogger;
pub use error::{LoggerError, Result};
pub use exception::ExceptionInfo;
pub use execution_context::{
    begin_tool, new_correlation_id, tool_scope, ContextFuture, ContextFutureExt, ExecutionContext,
    ExecutionScope,
};
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use log_session::LogSession;
pub use logger::{LogReader, Logger, LoggerExt};
pub use metrics::LoggerMetrics;
pub use options::{LoggerOptions, DEFAULT_FILE_PREFIX, DEFAULT_LOG_DIRECTORY};
pub use properties::{FieldValue, Properties};
pub use retention::{CleanupReport, RetentionCleaner, RetentionPolicy, RetentionTier};
pub use timestamp::TimestampFormat;
