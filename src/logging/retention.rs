//! Log file retention management
//!
//! Removes daily log files whose file name date falls outside the retention window.

use std::fs;
use std::path::Path;

use chrono::{Days, NaiveDate};

use super::error::{LogError, Result};
use super::format::parse_log_file_date;

/// Default retention period in days
pub const DEFAULT_RETENTION_DAYS: u32 = 14;

/// Oldest date that is still kept when `today` counts as day one of `retention_days`.
///
/// A retention of zero keeps nothing, today included.
pub fn keep_date(today: NaiveDate, retention_days: u32) -> NaiveDate {
    match retention_days {
        0 => today.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX),
        days => today
            .checked_sub_days(Days::new(u64::from(days) - 1))
            .unwrap_or(NaiveDate::MIN),
    }
}

/// Delete dated log files in `logs_dir` older than the retention window ending at `today`
///
/// Subdirectories and files whose name is not a date are left alone. Removal
/// failures are skipped. Returns the number of files deleted.
pub fn prune_logs(logs_dir: &Path, today: NaiveDate, retention_days: u32) -> Result<usize> {
    let entries = fs::read_dir(logs_dir).map_err(|e| LogError::ListDirectory {
        path: logs_dir.to_path_buf(),
        source: e,
    })?;

    let keep_from = keep_date(today, retention_days);
    let mut deleted_count = 0;

    for entry in entries.flatten() {
        if entry.file_type().map(|t| t.is_dir()).unwrap_or(true) {
            continue;
        }

        let name = entry.file_name();
        let Some(date) = name.to_str().and_then(parse_log_file_date) else {
            continue;
        };

        if date < keep_from {
            match fs::remove_file(entry.path()) {
                Ok(()) => deleted_count += 1,
                Err(e) => {
                    tracing::debug!("Failed to remove old log {}: {}", entry.path().display(), e)
                }
            }
        }
    }

    Ok(deleted_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::format::log_file_name;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    fn days_ago(n: u64) -> NaiveDate {
        today().checked_sub_days(Days::new(n)).unwrap()
    }

    fn touch(dir: &Path, name: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        File::create(&path)
            .unwrap()
            .write_all(b"test log content")
            .unwrap();
        path
    }

    fn file_names(dir: &Path) -> Vec<std::ffi::OsString> {
        let mut names: Vec<_> = fs::read_dir(dir)
            .unwrap()
            .flatten()
            .map(|e| e.file_name())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_keep_date() {
        assert_eq!(keep_date(today(), 14), days_ago(13));
        assert_eq!(keep_date(today(), 1), today());
        assert_eq!(
            keep_date(today(), 0),
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
        );
    }

    #[test]
    fn test_prune_nonexistent_dir() {
        let path = Path::new("/nonexistent/path/for/testing");
        assert!(matches!(
            prune_logs(path, today(), DEFAULT_RETENTION_DAYS),
            Err(LogError::ListDirectory { .. })
        ));
    }

    #[test]
    fn test_prune_empty_dir() {
        let temp_dir = TempDir::new().unwrap();
        let count = prune_logs(temp_dir.path(), today(), DEFAULT_RETENTION_DAYS).unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_prune_retention_boundary() {
        let temp_dir = TempDir::new().unwrap();
        let thirteen = touch(temp_dir.path(), &log_file_name(days_ago(13)));
        let fourteen = touch(temp_dir.path(), &log_file_name(days_ago(14)));
        let fifteen = touch(temp_dir.path(), &log_file_name(days_ago(15)));

        let count = prune_logs(temp_dir.path(), today(), 14).unwrap();

        // today counts as day one, so 13 days ago is the last kept day
        assert_eq!(count, 2);
        assert!(thirteen.exists());
        assert!(!fourteen.exists());
        assert!(!fifteen.exists());
    }

    #[test]
    fn test_prune_keeps_today_and_future() {
        let temp_dir = TempDir::new().unwrap();
        let current = touch(temp_dir.path(), &log_file_name(today()));
        let future = touch(
            temp_dir.path(),
            &log_file_name(NaiveDate::from_ymd_opt(2026, 3, 5).unwrap()),
        );

        let count = prune_logs(temp_dir.path(), today(), 1).unwrap();
        assert_eq!(count, 0);
        assert!(current.exists());
        assert!(future.exists());
    }

    #[test]
    fn test_prune_zero_retention_removes_today() {
        let temp_dir = TempDir::new().unwrap();
        let current = touch(temp_dir.path(), &log_file_name(today()));

        assert_eq!(prune_logs(temp_dir.path(), today(), 0).unwrap(), 1);
        assert!(!current.exists());
    }

    #[test]
    fn test_prune_ignores_non_date_files() {
        let temp_dir = TempDir::new().unwrap();
        let readme = touch(temp_dir.path(), "readme.log");
        let other = touch(temp_dir.path(), "other.txt");
        let short = touch(temp_dir.path(), "x");

        let count = prune_logs(temp_dir.path(), today(), DEFAULT_RETENTION_DAYS).unwrap();
        assert_eq!(count, 0);
        assert!(readme.exists());
        assert!(other.exists());
        assert!(short.exists());
    }

    #[test]
    fn test_prune_skips_directories() {
        let temp_dir = TempDir::new().unwrap();
        let dated_dir = temp_dir.path().join(log_file_name(days_ago(100)));
        fs::create_dir(&dated_dir).unwrap();

        let count = prune_logs(temp_dir.path(), today(), DEFAULT_RETENTION_DAYS).unwrap();
        assert_eq!(count, 0);
        assert!(dated_dir.is_dir());
    }

    #[test]
    fn test_prune_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), &log_file_name(days_ago(2)));
        touch(temp_dir.path(), &log_file_name(days_ago(30)));

        assert_eq!(prune_logs(temp_dir.path(), today(), 14).unwrap(), 1);
        let first = file_names(temp_dir.path());

        assert_eq!(prune_logs(temp_dir.path(), today(), 14).unwrap(), 0);
        let second = file_names(temp_dir.path());

        assert_eq!(first, second);
    }
}
