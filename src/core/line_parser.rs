//! Line format for the file sink and its lenient parser
//!
//! Writer format:
//!
//! ```text
//! [<timestamp>] [<Level>] [<Category>]? [CID:<id>]? [Tool:<name>]? <message>
//! ```
//!
//! The parser is deliberately looser than the writer. Lines from older or
//! newer revisions of the format must still produce an entry: anything it
//! cannot make sense of becomes an `Unknown`-level fallback entry carrying
//! the raw text.

use super::log_entry::LogEntry;
use super::log_level::LogLevel;
use super::timestamp::{parse_timestamp, TimestampFormat};
use chrono::{DateTime, Utc};

pub const CORRELATION_TAG: &str = "CID:";
pub const TOOL_TAG: &str = "Tool:";

/// Render the header and message of `entry` as one line (no newline).
///
/// `default_category` is used when the entry carries none. Newlines in the
/// message are escaped so one record cannot forge another.
pub fn format_line(
    entry: &LogEntry,
    default_category: Option<&str>,
    timestamp_format: &TimestampFormat,
) -> String {
    let mut line = format!(
        "[{}] [{}] ",
        timestamp_format.format(&entry.timestamp()),
        entry.level()
    );

    let category = entry
        .category()
        .or(default_category.filter(|c| !c.is_empty()));
    if let Some(category) = category {
        line.push_str(&format!("[{}] ", category));
    }
    if let Some(cid) = entry.correlation_id() {
        line.push_str(&format!("[{}{}] ", CORRELATION_TAG, cid));
    }
    if let Some(tool) = entry.tool_name() {
        line.push_str(&format!("[{}{}] ", TOOL_TAG, tool));
    }

    line.push_str(&sanitize_message(entry.message()));
    line
}

fn sanitize_message(message: &str) -> String {
    message.replace('\r', "\\r").replace('\n', "\\n")
}

/// Entry for a line that cannot be parsed at all
pub fn fallback_entry(line: &str) -> LogEntry {
    LogEntry::new(LogLevel::Unknown, line)
        .with_timestamp(DateTime::<Utc>::MIN_UTC)
        .with_raw_line(line)
}

/// Parse one stored line. Never fails.
pub fn parse_line(line: &str) -> LogEntry {
    let line = line.trim_end_matches(['\r', '\n']);

    if !line.starts_with('[') {
        return fallback_entry(line);
    }
    let timestamp_end = match line.find(']') {
        Some(end) => end,
        None => return fallback_entry(line),
    };
    let timestamp = match parse_timestamp(&line[1..timestamp_end]) {
        Some(timestamp) => timestamp,
        None => return fallback_entry(line),
    };

    let message = match line.rfind("] ") {
        Some(start) if start + 2 < line.len() => &line[start + 2..],
        _ => "",
    };

    let mut entry = LogEntry::new(extract_level(line), message)
        .with_timestamp(timestamp)
        .with_raw_line(line);

    if let Some(category) = extract_category(&line[timestamp_end + 1..]) {
        entry = entry.with_category(category);
    }
    if let Some(cid) = extract_tagged(line, CORRELATION_TAG) {
        entry = entry.with_correlation_id(cid);
    }
    if let Some(tool) = extract_tagged(line, TOOL_TAG) {
        entry = entry.with_tool_name(tool);
    }
    entry
}

/// First bracketed level name anywhere in the line
pub fn extract_level(line: &str) -> LogLevel {
    LogLevel::KNOWN
        .into_iter()
        .find(|level| line.contains(&level.tag()))
        .unwrap_or(LogLevel::Unknown)
}

/// Value of a `[<tag><value>]` group, matched case-insensitively on the tag.
pub fn extract_tagged<'a>(line: &'a str, tag: &str) -> Option<&'a str> {
    // ASCII lowercasing keeps byte offsets aligned with `line`.
    let needle = format!("[{}", tag).to_ascii_lowercase();
    let start = line.to_ascii_lowercase().find(&needle)? + needle.len();
    let end = line[start..].find(']')? + start;
    let value = &line[start..end];
    (!value.is_empty()).then_some(value)
}

/// Leading bracket groups after the timestamp, in order.
fn leading_groups(rest: &str) -> Vec<&str> {
    let mut groups = Vec::new();
    let mut rest = rest;
    loop {
        rest = rest.trim_start_matches(' ');
        let Some(body) = rest.strip_prefix('[') else {
            break;
        };
        let Some(end) = body.find(']') else {
            break;
        };
        groups.push(&body[..end]);
        rest = &body[end + 1..];
    }
    groups
}

fn is_tag(group: &str, tag: &str) -> bool {
    group
        .get(..tag.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(tag))
}

/// The first leading group that is neither the level nor a CID/Tool tag.
fn extract_category(rest: &str) -> Option<&str> {
    let mut level_seen = false;
    for group in leading_groups(rest) {
        if !level_seen && LogLevel::KNOWN.iter().any(|level| level.to_str() == group) {
            level_seen = true;
            continue;
        }
        if is_tag(group, CORRELATION_TAG) || is_tag(group, TOOL_TAG) {
            continue;
        }
        return (!group.is_empty()).then_some(group);
    }
    None
}
