//! File appender implementation with session read-back
//!
//! Records go to `<prefix>-<yyyy-MM-dd>.log` in the configured directory.
//! Reading scans every `*.log` file in that directory and rebuilds entries
//! with the lenient line parser, so files written by older format
//! revisions stay readable.

use crate::core::line_parser::{format_line, parse_line};
use crate::core::{
    LogEntry, LogReader, LogSession, Logger, LoggerError, LoggerOptions, Result, TimestampFormat,
};
use chrono::{Local, NaiveDate};
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

struct OpenFile {
    date: NaiveDate,
    path: PathBuf,
    file: File,
}

pub struct FileAppender {
    options: LoggerOptions,
    directory: PathBuf,
    timestamp_format: TimestampFormat,
    current: Mutex<Option<OpenFile>>,
}

impl FileAppender {
    /// Create the appender, creating its directory if needed
    ///
    /// The file prefix must be a plain, non-empty file name component.
    pub fn new(options: LoggerOptions) -> Result<Self> {
        let prefix = options.file_prefix.trim();
        if prefix.is_empty() {
            return Err(LoggerError::config("FileAppender", "file prefix must not be empty"));
        }
        if prefix.contains(['/', '\\']) || prefix == "." || prefix == ".." {
            return Err(LoggerError::config(
                "FileAppender",
                format!("file prefix '{}' must not contain a path", options.file_prefix),
            ));
        }

        let directory = options.resolved_log_directory();
        Self::ensure_directory(&directory)?;

        Ok(Self {
            options,
            directory,
            timestamp_format: TimestampFormat::Iso8601Offset,
            current: Mutex::new(None),
        })
    }

    /// Set the timestamp format for this appender
    ///
    /// Formats other than the default may not parse back into timestamps;
    /// such lines then read as `Unknown` fallback entries.
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the file for `date`
    pub fn file_path_for(&self, date: NaiveDate) -> PathBuf {
        self.directory.join(format!(
            "{}-{}.log",
            self.options.file_prefix,
            date.format("%Y-%m-%d")
        ))
    }

    /// Path of the file today's records go to
    pub fn current_file_path(&self) -> PathBuf {
        self.file_path_for(Local::now().date_naive())
    }

    fn ensure_directory(directory: &Path) -> Result<()> {
        fs::create_dir_all(directory).map_err(|e| {
            LoggerError::io_operation(
                "creating log directory",
                directory.display().to_string(),
                e,
            )
        })
    }

    fn open(&self, date: NaiveDate) -> Result<OpenFile> {
        Self::ensure_directory(&self.directory)?;
        let path = self.file_path_for(date);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LoggerError::file_appender(path.display().to_string(), e.to_string()))?;
        Ok(OpenFile { date, path, file })
    }

    /// One complete record: header line, then the exception text if any
    fn format_record(&self, entry: &LogEntry) -> String {
        let mut record = format_line(entry, self.options.category(), &self.timestamp_format);
        record.push('\n');
        if let Some(exception) = entry.exception() {
            record.push_str(&exception.full_text());
            record.push('\n');
        }
        record
    }

    /// Write one record to `open` under an exclusive lock
    fn append_record(open: &mut OpenFile, record: &str) -> Result<()> {
        #[cfg(feature = "file")]
        {
            use fs2::FileExt;
            FileExt::lock_exclusive(&open.file)
                .map_err(|_| LoggerError::file_lock(open.path.display().to_string()))?;
            let written = open.file.write_all(record.as_bytes());
            if let Err(e) = FileExt::unlock(&open.file) {
                eprintln!(
                    "[LOGGER WARNING] Failed to unlock {}: {}; reopening on next write",
                    open.path.display(),
                    e
                );
                written?;
                return Err(LoggerError::file_lock(open.path.display().to_string()));
            }
            written?;
        }
        #[cfg(not(feature = "file"))]
        open.file.write_all(record.as_bytes())?;
        Ok(())
    }

    fn log_files(&self) -> Vec<PathBuf> {
        let Ok(dir) = fs::read_dir(&self.directory) else {
            return Vec::new();
        };
        let mut files: Vec<PathBuf> = dir
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "log"))
            .collect();
        files.sort();
        files
    }

    /// Visit every line of every log file; unreadable files are skipped
    fn scan_lines(&self, mut visit: impl FnMut(&str)) {
        for path in self.log_files() {
            let Ok(bytes) = fs::read(&path) else {
                continue;
            };
            for line in String::from_utf8_lossy(&bytes).lines() {
                visit(line);
            }
        }
    }

    /// Entries whose raw line passes `prefilter` and whose parsed form passes `keep`
    fn collect_entries(
        &self,
        prefilter: impl Fn(&str) -> bool,
        keep: impl Fn(&LogEntry) -> bool,
    ) -> Vec<LogEntry> {
        let mut entries = Vec::new();
        self.scan_lines(|line| {
            if prefilter(line) {
                let entry = parse_line(line);
                if keep(&entry) {
                    entries.push(entry);
                }
            }
        });
        entries
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack
        .to_ascii_lowercase()
        .contains(&needle.to_ascii_lowercase())
}

/// A parsed line belongs to `correlation_id` when its CID tag matches, or when
/// it carries no CID tag at all (degraded lines that merely mention the id).
fn belongs_to(entry: &LogEntry, correlation_id: &str) -> bool {
    entry
        .correlation_id()
        .map_or(true, |cid| cid.eq_ignore_ascii_case(correlation_id))
}

impl Logger for FileAppender {
    fn log(&self, entry: &LogEntry) -> Result<()> {
        if !self.options.accepts(entry.level()) {
            return Ok(());
        }

        let record = self.format_record(entry);
        let today = Local::now().date_naive();

        let mut current = self.current.lock();
        if current.as_ref().map_or(true, |open| open.date != today) {
            *current = Some(self.open(today)?);
        }
        if let Some(open) = current.as_mut() {
            if let Err(e) = Self::append_record(open, &record) {
                // Closing the handle releases any lock still held
                *current = None;
                return Err(e);
            }
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        if let Some(open) = self.current.lock().as_mut() {
            open.file.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }

    fn as_reader(&self) -> Option<&dyn LogReader> {
        Some(self)
    }
}

impl LogReader for FileAppender {
    fn read_by_correlation_id(&self, correlation_id: &str) -> LogSession {
        if correlation_id.is_empty() {
            return LogSession::empty(correlation_id);
        }
        let entries = self.collect_entries(
            |line| contains_ignore_case(line, correlation_id),
            |entry| belongs_to(entry, correlation_id),
        );
        LogSession::new(correlation_id, entries)
    }

    fn read_by_category(&self, category: &str) -> LogSession {
        if category.is_empty() {
            return LogSession::empty("");
        }
        let tag = format!("[{}]", category);
        let entries = self.collect_entries(
            |line| line.contains(&tag),
            |entry| entry.category() == Some(category),
        );
        LogSession::new("", entries)
    }

    fn read_by_correlation_id_and_category(
        &self,
        correlation_id: &str,
        category: &str,
    ) -> LogSession {
        if correlation_id.is_empty() || category.is_empty() {
            return LogSession::empty(correlation_id);
        }
        let tag = format!("[{}]", category);
        let entries = self.collect_entries(
            |line| line.contains(&tag) && contains_ignore_case(line, correlation_id),
            |entry| entry.category() == Some(category) && belongs_to(entry, correlation_id),
        );
        LogSession::new(correlation_id, entries)
    }

    fn read_last_session(&self) -> LogSession {
        let mut latest: Option<LogEntry> = None;
        self.scan_lines(|line| {
            let entry = parse_line(line);
            if latest
                .as_ref()
                .map_or(true, |best| entry.timestamp() > best.timestamp())
            {
                latest = Some(entry);
            }
        });

        match latest.as_ref().and_then(LogEntry::correlation_id) {
            Some(cid) => self.read_by_correlation_id(cid),
            None => LogSession::empty(""),
        }
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        let _ = Logger::flush(self);
    }
}
