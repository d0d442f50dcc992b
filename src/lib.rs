//! # MCP Logger System
//!
//! Correlation-aware structured logging for tool-invocation pipelines.
//!
//! Every tool run opens a scope with [`begin_tool`] (or [`tool_scope`] for
//! async work). Entries logged while the scope is active carry its
//! correlation id and tool name, and sinks that support it can read the
//! whole session back afterwards.
//!
//! ## Features
//!
//! - **Context propagation**: scopes nest, restore on exit, and follow a
//!   future across suspension points and worker threads
//! - **Sinks**: console, date-partitioned files and in-memory, combined
//!   through a fan-out logger that isolates failing sinks
//! - **Session read-back**: by correlation id, by category, or the most
//!   recent session, with a parser that tolerates malformed lines
//! - **Retention**: per-tier age-based cleanup of old log files
//!
//! ## Example
//!
//! ```
//! use mcp_logger_system::prelude::*;
//!
//! let memory = InMemoryAppender::new(LoggerOptions::default());
//!
//! let scope = begin_tool("read_file");
//! memory.info("opening file");
//! let cid = scope.correlation_id().to_string();
//! drop(scope);
//!
//! let session = memory.read_by_correlation_id(&cid);
//! assert_eq!(session.len(), 1);
//! assert_eq!(session.entries()[0].tool_name(), Some("read_file"));
//! ```

pub mod appenders;
pub mod builder;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender, InMemoryAppender};
    pub use crate::builder::LoggingBuilder;
    pub use crate::core::{
        begin_tool, tool_scope, CleanupReport, CompositeLogger, ContextFutureExt, ExceptionInfo,
        ExecutionContext, ExecutionScope, FieldValue, LogEntry, LogLevel, LogReader, LogSession,
        Logger, LoggerError, LoggerExt, LoggerMetrics, LoggerOptions, Properties, Result,
        RetentionCleaner, RetentionPolicy, RetentionTier, TimestampFormat,
    };
}

pub use appenders::{ConsoleAppender, FileAppender, InMemoryAppender};
pub use builder::LoggingBuilder;
pub use core::{
    begin_tool, tool_scope, CleanupReport, CompositeLogger, ContextFuture, ContextFutureExt,
    ExceptionInfo, ExecutionContext, ExecutionScope, FieldValue, LogEntry, LogLevel, LogReader,
    LogSession, Logger, LoggerError, LoggerExt, LoggerMetrics, LoggerOptions, Properties, Result,
    RetentionCleaner, RetentionPolicy, RetentionTier, TimestampFormat,
};
