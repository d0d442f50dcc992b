//! Assembles a logger from the built-in sinks

use crate::appenders::{ConsoleAppender, FileAppender, InMemoryAppender};
use crate::core::{CompositeLogger, LogLevel, Logger, LoggerOptions, Result};
use std::path::PathBuf;
use std::sync::Arc;

/// Collects sinks and produces one logger.
///
/// Each sink captures the builder's options at the moment it is added, so
/// set `minimum_level` and `category` first.
///
/// # Example
///
/// ```
/// use mcp_logger_system::prelude::*;
///
/// let mut builder = LoggingBuilder::new();
/// builder.minimum_level(LogLevel::Debug).category("agent");
/// let memory = builder.add_in_memory();
/// let logger = builder.build().unwrap();
///
/// logger.debug("ready");
/// assert_eq!(memory.entries()[0].category(), Some("agent"));
/// ```
#[derive(Default)]
pub struct LoggingBuilder {
    options: LoggerOptions,
    sinks: Vec<Arc<dyn Logger>>,
}

impl LoggingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder preloaded from `options`: a console sink when enabled, and a
    /// file sink in the resolved log directory
    pub fn from_options(options: &LoggerOptions) -> Result<Self> {
        let mut builder = Self {
            options: options.clone(),
            sinks: Vec::new(),
        };
        if options.enable_console {
            builder.add_console();
        }
        builder.add_file(None)?;
        Ok(builder)
    }

    pub fn options(&self) -> &LoggerOptions {
        &self.options
    }

    pub fn minimum_level(&mut self, level: LogLevel) -> &mut Self {
        self.options.minimum_level = level;
        self
    }

    pub fn category(&mut self, category: impl Into<String>) -> &mut Self {
        self.options.category = Some(category.into());
        self
    }

    pub fn add_console(&mut self) -> &mut Self {
        self.sinks
            .push(Arc::new(ConsoleAppender::new(self.options.clone())));
        self
    }

    /// Add a file sink in `directory`, or in the configured directory
    pub fn add_file(&mut self, directory: Option<PathBuf>) -> Result<&mut Self> {
        let mut options = self.options.clone();
        if let Some(directory) = directory {
            options.log_directory = Some(directory);
        }
        self.sinks.push(Arc::new(FileAppender::new(options)?));
        Ok(self)
    }

    /// Add an in-memory sink and return a handle for reading it back
    pub fn add_in_memory(&mut self) -> Arc<InMemoryAppender> {
        let memory = Arc::new(InMemoryAppender::new(self.options.clone()));
        self.sinks.push(memory.clone());
        memory
    }

    pub fn add_sink(&mut self, sink: Arc<dyn Logger>) -> &mut Self {
        self.sinks.push(sink);
        self
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Falls back to a console sink when none was added; a single sink is
    /// returned unwrapped
    pub fn build(&self) -> Result<Arc<dyn Logger>> {
        let mut sinks = self.sinks.clone();
        if sinks.is_empty() {
            sinks.push(Arc::new(ConsoleAppender::new(self.options.clone())));
        }

        if sinks.len() == 1 {
            return Ok(sinks.remove(0));
        }
        Ok(Arc::new(CompositeLogger::try_new(Some(sinks))?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{begin_tool, LogReader, LoggerExt};
    use tempfile::TempDir;

    #[test]
    fn test_empty_builder_falls_back_to_console() {
        let logger = LoggingBuilder::new().build().unwrap();
        assert_eq!(logger.name(), "console");
    }

    #[test]
    fn test_single_sink_is_not_wrapped() {
        let mut builder = LoggingBuilder::new();
        builder.add_in_memory();
        let logger = builder.build().unwrap();
        assert_eq!(logger.name(), "memory");
    }

    #[test]
    fn test_multiple_sinks_share_entries() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut builder = LoggingBuilder::new();
        let memory = builder.add_in_memory();
        builder
            .add_file(Some(temp_dir.path().to_path_buf()))
            .unwrap();
        let logger = builder.build().unwrap();
        assert_eq!(logger.name(), "composite");

        let cid = {
            let scope = begin_tool("search");
            logger.info("query sent");
            scope.correlation_id().to_string()
        };

        assert_eq!(memory.read_by_correlation_id(&cid).len(), 1);
        let reader = logger.as_reader().expect("composite should be queryable");
        assert_eq!(reader.read_by_correlation_id(&cid).len(), 1);
    }

    #[test]
    fn test_from_options_respects_console_flag() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let options = LoggerOptions::default()
            .with_console(false)
            .with_log_directory(temp_dir.path());
        let builder = LoggingBuilder::from_options(&options).unwrap();
        assert_eq!(builder.sink_count(), 1);
        assert_eq!(builder.build().unwrap().name(), "file");
    }
}
