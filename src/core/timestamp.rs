//! Timestamp formatting and lenient parsing for log lines

use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp format options for sink output
///
/// # Examples
///
/// ```
/// use mcp_logger_system::core::TimestampFormat;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2026, 1, 4, 19, 47, 36).unwrap();
/// assert_eq!(
///     TimestampFormat::Iso8601Offset.format(&at),
///     "2026-01-04T19:47:36.000000000+00:00"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with nanoseconds and numeric offset: `2026-01-04T19:47:36.451253700+00:00`
    ///
    /// Default for file output; round-trips through [`parse_timestamp`].
    #[default]
    Iso8601Offset,

    /// Local wall-clock time of day: `19:47:36`
    TimeOfDay,

    /// Custom strftime format, rendered in UTC
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601Offset => datetime.to_rfc3339_opts(SecondsFormat::Nanos, false),
            TimestampFormat::TimeOfDay => datetime
                .with_timezone(&Local)
                .format("%H:%M:%S")
                .to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }
}

const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
];

/// Parse a timestamp written by any known revision of the line format.
///
/// Accepts RFC 3339 (any offset, normalised to UTC) and offset-less forms,
/// which are taken as UTC.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f %:z") {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|naive| naive.and_utc())
}
