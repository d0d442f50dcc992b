//! Integration tests for mcp_logger_system
//!
//! These tests verify:
//! - File round trips through every read method
//! - Log injection prevention
//! - Composite fan-out with failing sinks
//! - Builder wiring
//! - Retention cleanup
//! - Context propagation through async tool scopes

use mcp_logger_system::prelude::*;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

fn file_appender(dir: &Path, category: Option<&str>) -> FileAppender {
    let mut options = LoggerOptions::default().with_log_directory(dir);
    if let Some(category) = category {
        options = options.with_category(category);
    }
    FileAppender::new(options).expect("Failed to create appender")
}

#[test]
fn test_file_round_trip_through_every_reader() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let appender = file_appender(temp_dir.path(), Some("agent"));

    let cid = {
        let scope = begin_tool("list_directory");
        appender.info("listing /tmp");
        scope.correlation_id().to_string()
    };

    let check = |session: &LogSession| {
        assert_eq!(session.len(), 1);
        let entry = &session.entries()[0];
        assert_eq!(entry.correlation_id(), Some(cid.as_str()));
        assert_eq!(entry.category(), Some("agent"));
        assert_eq!(entry.tool_name(), Some("list_directory"));
        assert_eq!(entry.level(), LogLevel::Information);
        assert_eq!(entry.message(), "listing /tmp");
    };

    check(&appender.read_by_correlation_id(&cid));
    check(&appender.read_by_category("agent"));
    check(&appender.read_by_correlation_id_and_category(&cid, "agent"));
    check(&appender.read_last_session());
    assert!(appender
        .read_by_correlation_id_and_category(&cid, "other")
        .is_empty());
}

#[test]
fn test_unknown_correlation_id_is_empty_not_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let appender = file_appender(temp_dir.path(), None);
    appender.info("something");

    let session = appender.read_by_correlation_id("never-logged");
    assert!(session.is_empty());
    assert_eq!(session.correlation_id(), "never-logged");
}

#[test]
fn test_log_injection_prevention() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let appender = file_appender(temp_dir.path(), None);

    let malicious_message =
        "User login\n[2024-10-17T00:00:00+00:00] [Error] [CID:forged] Fake error injected";
    appender.info(malicious_message);

    let content = fs::read_to_string(appender.current_file_path()).expect("Failed to read log");
    assert!(content.contains("\\n"));
    assert_eq!(content.lines().count(), 1, "Log should be a single line");
    assert!(appender.read_by_correlation_id("forged").iter().all(|e| e.level() != LogLevel::Error));
}

#[test]
fn test_exception_text_follows_record() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let appender = file_appender(temp_dir.path(), None);

    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "config.json missing");
    let _scope = begin_tool("load_config");
    appender.error_with_exception("could not load", ExceptionInfo::from_error(&io_error));

    let content = fs::read_to_string(appender.current_file_path()).expect("Failed to read log");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("[Tool:load_config] could not load"));
    assert!(lines[1].contains("config.json missing"));
}

#[test]
fn test_last_session_follows_latest_scope() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let appender = file_appender(temp_dir.path(), None);

    {
        let _first = begin_tool("first");
        appender.info("one");
    }
    std::thread::sleep(Duration::from_millis(5));
    let second_cid = {
        let second = begin_tool("second");
        appender.info("two");
        second.correlation_id().to_string()
    };

    let session = appender.read_last_session();
    assert_eq!(session.correlation_id(), second_cid);
    assert_eq!(session.len(), 1);
    assert_eq!(session.entries()[0].message(), "two");
}

struct ThrowingSink;

impl Logger for ThrowingSink {
    fn log(&self, _entry: &LogEntry) -> Result<()> {
        Err(LoggerError::other("sink offline"))
    }

    fn name(&self) -> &str {
        "throwing"
    }
}

#[test]
fn test_composite_delivers_past_failing_sink() {
    let memory = Arc::new(InMemoryAppender::new(LoggerOptions::default()));
    let logger = CompositeLogger::new(vec![
        Arc::new(ThrowingSink) as Arc<dyn Logger>,
        memory.clone(),
    ]);

    let entry = LogEntry::new(LogLevel::Warning, "kept");
    assert!(logger.log(&entry).is_ok());
    assert_eq!(memory.entries(), vec![entry]);
    assert_eq!(logger.metrics().sink_failures(), 1);
}

#[test]
fn test_composite_construction_requires_sinks() {
    let err = CompositeLogger::try_new(None::<Vec<Arc<dyn Logger>>>).unwrap_err();
    assert_eq!(err.to_string(), "Invalid argument: 'sinks' must be provided");
}

#[test]
fn test_builder_composite_reads_back_from_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let options = LoggerOptions::default()
        .with_console(false)
        .with_log_directory(temp_dir.path())
        .with_category("tools");
    let mut builder = LoggingBuilder::from_options(&options).expect("Failed to build");
    let memory = builder.add_in_memory();
    let logger = builder.build().expect("Failed to build");

    let cid = {
        let scope = begin_tool("grep");
        logger.info("matched 3 lines");
        scope.correlation_id().to_string()
    };

    assert_eq!(memory.read_by_correlation_id(&cid).len(), 1);

    let reader = logger.as_reader().expect("composite should be queryable");
    let session = reader.read_by_correlation_id_and_category(&cid, "tools");
    assert_eq!(session.len(), 1);
    assert_eq!(session.entries()[0].tool_name(), Some("grep"));
}

#[test]
fn test_retention_deletes_only_expired_tier_files() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let policy = RetentionPolicy::default().with_information(Duration::from_secs(3600));
    let cleaner = RetentionCleaner::new(temp_dir.path(), policy);
    let app_dir = cleaner.tier_directory(RetentionTier::Information);
    fs::create_dir_all(&app_dir).unwrap();

    let now = SystemTime::now();
    let expired = app_dir.join("mcp-2026-01-01.log");
    let current = app_dir.join("mcp-2026-01-02.log");
    fs::File::create(&expired)
        .unwrap()
        .set_modified(now - Duration::from_secs(7200))
        .unwrap();
    fs::File::create(&current)
        .unwrap()
        .set_modified(now - Duration::from_secs(60))
        .unwrap();

    let report = cleaner.clean_at(now);
    assert_eq!(report.deleted, 1);
    assert!(!expired.exists());
    assert!(current.exists());
}

#[tokio::test]
async fn test_tool_scope_stamps_async_entries() {
    let memory = Arc::new(InMemoryAppender::new(LoggerOptions::default()));

    let sink = memory.clone();
    let cid = tool_scope("download", async move {
        sink.info("started");
        tokio::time::sleep(Duration::from_millis(5)).await;
        sink.info("finished");
        ExecutionContext::current().map(|ctx| ctx.correlation_id().to_string())
    })
    .await
    .expect("context inside tool scope");

    assert!(ExecutionContext::current().is_none());
    let session = memory.read_by_correlation_id(&cid);
    assert_eq!(session.len(), 2);
    assert!(session.iter().all(|e| e.tool_name() == Some("download")));
}

#[test]
fn test_session_exports_json() {
    let memory = InMemoryAppender::new(LoggerOptions::default());
    let cid = {
        let scope = begin_tool("export");
        memory.info("payload");
        scope.correlation_id().to_string()
    };

    let json = memory.read_by_correlation_id(&cid).to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["correlation_id"], cid.as_str());
    assert_eq!(value["entries"][0]["message"], "payload");
    assert_eq!(value["entries"][0]["tool_name"], "export");
}
