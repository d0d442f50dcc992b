//! Age-based cleanup of log files, one retention period per severity tier
//!
//! Each tier owns a conventional subdirectory of the base directory
//! (`trace`, `debug`, `app`, `warning`, `error`). Files whose last
//! modification is older than the tier's retention period are deleted.
//! Cleanup is best-effort: failures are counted and reported on stderr,
//! never returned.

use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

const DAY: u64 = 24 * 60 * 60;

/// Severity tier a log directory belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetentionTier {
    Trace,
    Debug,
    Information,
    Warning,
    Error,
}

impl RetentionTier {
    pub const ALL: [RetentionTier; 5] = [
        RetentionTier::Trace,
        RetentionTier::Debug,
        RetentionTier::Information,
        RetentionTier::Warning,
        RetentionTier::Error,
    ];

    /// Subdirectory name under the base log directory
    pub fn directory_name(&self) -> &'static str {
        match self {
            RetentionTier::Trace => "trace",
            RetentionTier::Debug => "debug",
            RetentionTier::Information => "app",
            RetentionTier::Warning => "warning",
            RetentionTier::Error => "error",
        }
    }

    /// Tier whose directory holds entries of `level`
    pub fn for_level(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => RetentionTier::Trace,
            LogLevel::Debug => RetentionTier::Debug,
            LogLevel::Unknown | LogLevel::Information => RetentionTier::Information,
            LogLevel::Warning => RetentionTier::Warning,
            LogLevel::Error | LogLevel::Critical => RetentionTier::Error,
        }
    }
}

/// Retention period per tier
///
/// # Examples
///
/// ```
/// use mcp_logger_system::core::{RetentionPolicy, RetentionTier};
/// use std::time::Duration;
///
/// let policy = RetentionPolicy::new().with_debug(Duration::from_secs(3600));
/// assert_eq!(policy.retention_for(RetentionTier::Debug), Duration::from_secs(3600));
/// assert_eq!(
///     policy.retention_for(RetentionTier::Error),
///     Duration::from_secs(90 * 24 * 60 * 60)
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetentionPolicy {
    pub trace: Duration,
    pub debug: Duration,
    pub information: Duration,
    pub warning: Duration,
    pub error: Duration,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            trace: Duration::from_secs(3 * DAY),
            debug: Duration::from_secs(7 * DAY),
            information: Duration::from_secs(14 * DAY),
            warning: Duration::from_secs(30 * DAY),
            error: Duration::from_secs(90 * DAY),
        }
    }
}

impl RetentionPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_trace(mut self, retention: Duration) -> Self {
        self.trace = retention;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_debug(mut self, retention: Duration) -> Self {
        self.debug = retention;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_information(mut self, retention: Duration) -> Self {
        self.information = retention;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_warning(mut self, retention: Duration) -> Self {
        self.warning = retention;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_error(mut self, retention: Duration) -> Self {
        self.error = retention;
        self
    }

    pub fn retention_for(&self, tier: RetentionTier) -> Duration {
        match tier {
            RetentionTier::Trace => self.trace,
            RetentionTier::Debug => self.debug,
            RetentionTier::Information => self.information,
            RetentionTier::Warning => self.warning,
            RetentionTier::Error => self.error,
        }
    }
}

/// Outcome of one cleanup pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub deleted: usize,
    pub failed: usize,
}

pub struct RetentionCleaner {
    base_directory: PathBuf,
    policy: RetentionPolicy,
}

impl RetentionCleaner {
    pub fn new(base_directory: impl Into<PathBuf>, policy: RetentionPolicy) -> Self {
        Self {
            base_directory: base_directory.into(),
            policy,
        }
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn policy(&self) -> &RetentionPolicy {
        &self.policy
    }

    pub fn tier_directory(&self, tier: RetentionTier) -> PathBuf {
        self.base_directory.join(tier.directory_name())
    }

    pub fn clean(&self) -> CleanupReport {
        self.clean_at(SystemTime::now())
    }

    /// Delete every tier file last modified before `now - retention`
    pub fn clean_at(&self, now: SystemTime) -> CleanupReport {
        let mut report = CleanupReport::default();
        for tier in RetentionTier::ALL {
            let Some(cutoff) = now.checked_sub(self.policy.retention_for(tier)) else {
                continue;
            };
            self.clean_directory(&self.tier_directory(tier), cutoff, &mut report);
        }
        report
    }

    fn clean_directory(&self, directory: &Path, cutoff: SystemTime, report: &mut CleanupReport) {
        let Ok(entries) = fs::read_dir(directory) else {
            return;
        };

        for entry in entries.flatten() {
            let path = entry.path();
            let modified = match entry.metadata() {
                Ok(metadata) if metadata.is_file() => metadata.modified(),
                _ => continue,
            };
            let Ok(modified) = modified else {
                continue;
            };
            if modified >= cutoff {
                continue;
            }

            match fs::remove_file(&path) {
                Ok(()) => report.deleted += 1,
                Err(e) => {
                    report.failed += 1;
                    eprintln!(
                        "[LOGGER WARNING] Failed to remove expired log file {}: {}",
                        path.display(),
                        e
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn touch(path: &Path, modified: SystemTime) {
        let file = File::create(path).expect("Failed to create file");
        file.set_modified(modified).expect("Failed to set mtime");
    }

    #[test]
    fn test_default_policy() {
        let policy = RetentionPolicy::default();
        let days = |tier| policy.retention_for(tier).as_secs() / DAY;
        assert_eq!(days(RetentionTier::Trace), 3);
        assert_eq!(days(RetentionTier::Debug), 7);
        assert_eq!(days(RetentionTier::Information), 14);
        assert_eq!(days(RetentionTier::Warning), 30);
        assert_eq!(days(RetentionTier::Error), 90);
    }

    #[test]
    fn test_tier_for_level() {
        assert_eq!(RetentionTier::for_level(LogLevel::Information), RetentionTier::Information);
        assert_eq!(RetentionTier::for_level(LogLevel::Critical), RetentionTier::Error);
        assert_eq!(RetentionTier::Information.directory_name(), "app");
    }

    #[test]
    fn test_deletes_only_expired_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cleaner = RetentionCleaner::new(temp_dir.path(), RetentionPolicy::default());
        let debug_dir = cleaner.tier_directory(RetentionTier::Debug);
        fs::create_dir_all(&debug_dir).unwrap();

        let now = SystemTime::now();
        let old = debug_dir.join("mcp-old.log");
        let fresh = debug_dir.join("mcp-fresh.log");
        touch(&old, now - Duration::from_secs(8 * DAY));
        touch(&fresh, now - Duration::from_secs(DAY));

        let report = cleaner.clean_at(now);
        assert_eq!(report, CleanupReport { deleted: 1, failed: 0 });
        assert!(!old.exists());
        assert!(fresh.exists());
    }

    #[test]
    fn test_tiers_use_their_own_period() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cleaner = RetentionCleaner::new(temp_dir.path(), RetentionPolicy::default());
        let now = SystemTime::now();
        let ten_days_ago = now - Duration::from_secs(10 * DAY);

        for tier in [RetentionTier::Trace, RetentionTier::Error] {
            let dir = cleaner.tier_directory(tier);
            fs::create_dir_all(&dir).unwrap();
            touch(&dir.join("mcp.log"), ten_days_ago);
        }

        let report = cleaner.clean_at(now);
        assert_eq!(report.deleted, 1);
        assert!(!cleaner.tier_directory(RetentionTier::Trace).join("mcp.log").exists());
        assert!(cleaner.tier_directory(RetentionTier::Error).join("mcp.log").exists());
    }

    #[test]
    fn test_missing_directories_are_ignored() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cleaner = RetentionCleaner::new(temp_dir.path().join("absent"), RetentionPolicy::default());
        assert_eq!(cleaner.clean(), CleanupReport::default());
    }

    #[test]
    fn test_policy_deserializes_with_defaults() {
        let policy: RetentionPolicy =
            serde_json::from_str(r#"{ "trace": { "secs": 60, "nanos": 0 } }"#).unwrap();
        assert_eq!(policy.trace, Duration::from_secs(60));
        assert_eq!(policy.error, RetentionPolicy::default().error);
    }
}
