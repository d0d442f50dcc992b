//! Logging macros for ergonomic log message formatting.
//!
//! These macros take `format!` arguments and log through any sink,
//! concrete or `Arc<dyn Logger>`. The entry is captured at the call site,
//! so it carries the active execution context.
//!
//! # Examples
//!
//! ```
//! use mcp_logger_system::prelude::*;
//! use mcp_logger_system::info;
//!
//! let logger = InMemoryAppender::new(LoggerOptions::default());
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let tool = "fetch_url";
//! info!(logger, "Invoking {} with {} arguments", tool, 2);
//!
//! assert_eq!(logger.entries()[1].message(), "Invoking fetch_url with 2 arguments");
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use mcp_logger_system::prelude::*;
/// # let logger = InMemoryAppender::new(LoggerOptions::default());
/// use mcp_logger_system::log;
/// log!(logger, LogLevel::Information, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        use $crate::core::Logger as _;
        $logger.log_or_report($crate::core::LogEntry::capture($level, format!($($arg)+)))
    }};
}

/// Log a trace-level message.
///
/// # Examples
///
/// ```
/// # use mcp_logger_system::prelude::*;
/// # let logger = InMemoryAppender::new(LoggerOptions::new().with_minimum_level(LogLevel::Trace));
/// use mcp_logger_system::trace;
/// trace!(logger, "Entering tool: {}", "calculate");
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Debug, $($arg)+)
    };
}

/// Log an information-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Information, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Error, $($arg)+)
    };
}

/// Log a critical-level message.
///
/// # Examples
///
/// ```
/// # use mcp_logger_system::prelude::*;
/// # let logger = InMemoryAppender::new(LoggerOptions::default());
/// use mcp_logger_system::critical;
/// critical!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Critical, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::appenders::InMemoryAppender;
    use crate::core::{begin_tool, LogLevel, Logger, LoggerOptions};
    use std::sync::Arc;

    fn memory() -> InMemoryAppender {
        InMemoryAppender::new(LoggerOptions::new().with_minimum_level(LogLevel::Trace))
    }

    #[test]
    fn test_log_macro() {
        let logger = memory();
        log!(logger, LogLevel::Information, "Test message");
        log!(logger, LogLevel::Warning, "Formatted: {}", 42);

        let entries = logger.entries();
        assert_eq!(entries[0].message(), "Test message");
        assert_eq!(entries[1].message(), "Formatted: 42");
        assert_eq!(entries[1].level(), LogLevel::Warning);
    }

    #[test]
    fn test_level_macros() {
        let logger = memory();
        trace!(logger, "Trace message");
        debug!(logger, "Count: {}", 5);
        info!(logger, "Items: {}", 100);
        warn!(logger, "Retry {} of {}", 1, 3);
        error!(logger, "Code: {}", 500);
        critical!(logger, "Critical failure: {}", "system");

        let levels: Vec<LogLevel> = logger.entries().iter().map(|e| e.level()).collect();
        assert_eq!(levels, LogLevel::KNOWN.to_vec());
    }

    #[test]
    fn test_macros_on_trait_objects() {
        let memory = Arc::new(memory());
        let logger: Arc<dyn Logger> = memory.clone();

        let scope = begin_tool("macro_tool");
        info!(logger, "through {}", "dyn");
        drop(scope);

        let entries = memory.entries();
        assert_eq!(entries[0].message(), "through dyn");
        assert_eq!(entries[0].tool_name(), Some("macro_tool"));
    }
}
