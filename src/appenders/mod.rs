//! Sink implementations

pub mod console;
pub mod file;
pub mod memory;

pub use console::ConsoleAppender;
pub use file::FileAppender;
pub use memory::InMemoryAppender;

pub use crate::core::{LogReader, Logger, LoggerExt};
