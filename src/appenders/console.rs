//! Console appender implementation

use crate::core::{LogEntry, LogLevel, Logger, LoggerOptions, Result, TimestampFormat};
use parking_lot::Mutex;
use std::io::Write;

/// Writes one `[HH:MM:SS] [Level] message` line per accepted entry,
/// followed by the exception text when present.
pub struct ConsoleAppender {
    options: LoggerOptions,
    use_colors: bool,
    timestamp_format: TimestampFormat,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleAppender {
    /// Console appender writing to stdout
    pub fn new(options: LoggerOptions) -> Self {
        Self::with_writer(options, Box::new(std::io::stdout()))
    }

    /// Console appender writing to stderr, for hosts that reserve stdout
    /// for a protocol stream
    pub fn stderr(options: LoggerOptions) -> Self {
        Self::with_writer(options, Box::new(std::io::stderr()))
    }

    pub fn with_writer(options: LoggerOptions, writer: Box<dyn Write + Send>) -> Self {
        Self {
            options,
            use_colors: false,
            timestamp_format: TimestampFormat::TimeOfDay,
            writer: Mutex::new(writer),
        }
    }

    /// Colour the level name (requires the `console` feature)
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Set the timestamp format for this appender
    ///
    /// # Examples
    ///
    /// ```
    /// use mcp_logger_system::appenders::ConsoleAppender;
    /// use mcp_logger_system::core::{LoggerOptions, TimestampFormat};
    ///
    /// let appender = ConsoleAppender::new(LoggerOptions::default())
    ///     .with_timestamp_format(TimestampFormat::Iso8601Offset);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[cfg(feature = "console")]
    fn level_text(&self, level: LogLevel) -> String {
        use colored::Colorize;
        if self.use_colors {
            level.to_str().color(level.color_code()).to_string()
        } else {
            level.to_str().to_string()
        }
    }

    #[cfg(not(feature = "console"))]
    fn level_text(&self, level: LogLevel) -> String {
        level.to_str().to_string()
    }

    /// Format as text, one record per call
    pub(crate) fn format_text(&self, entry: &LogEntry) -> String {
        let mut output = format!(
            "[{}] [{}] {}\n",
            self.timestamp_format.format(&entry.timestamp()),
            self.level_text(entry.level()),
            entry.message()
        );
        if let Some(exception) = entry.exception() {
            output.push_str(&exception.full_text());
            output.push('\n');
        }
        output
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new(LoggerOptions::default())
    }
}

impl Logger for ConsoleAppender {
    fn log(&self, entry: &LogEntry) -> Result<()> {
        if !self.options.accepts(entry.level()) {
            return Ok(());
        }

        let output = self.format_text(entry);
        let mut writer = self.writer.lock();
        writer.write_all(output.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
