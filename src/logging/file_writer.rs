//! Daily file logger
//!
//! Appends timestamped records to `<directory>/YYYYMMDD.log`, retrying while
//! another process holds the file, and prunes old days on request or once per
//! day when auto-delete is enabled.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError, RwLock};
use std::time::Instant;

use chrono::{Local, NaiveDate};

use crate::config::LoggerConfig;

use super::error::{LogError, Result};
use super::format::{format_record, log_file_name, NewlineMode};
use super::retention::prune_logs;
use super::retry::{open_append, open_with_retry, RETRY_INTERVAL};

/// Logger writing one file per calendar day
///
/// Safe to share between threads. Configuration may be changed between calls.
#[derive(Debug, Default)]
pub struct DailyFileLogger {
    config: RwLock<LoggerConfig>,
    /// Local date on which cleanup last completed, `None` until the first run
    last_cleanup: Mutex<Option<NaiveDate>>,
}

impl DailyFileLogger {
    /// Create a logger with the given configuration
    pub fn new(config: LoggerConfig) -> Self {
        Self {
            config: RwLock::new(config),
            last_cleanup: Mutex::new(None),
        }
    }

    /// Snapshot of the current configuration
    pub fn config(&self) -> LoggerConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the configuration
    pub fn set_config(&self, config: LoggerConfig) {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
    }

    /// Modify the configuration in place
    pub fn update_config(&self, f: impl FnOnce(&mut LoggerConfig)) {
        f(&mut self.config.write().unwrap_or_else(PoisonError::into_inner));
    }

    /// Date of the last completed cleanup, if any
    pub fn last_cleanup(&self) -> Option<NaiveDate> {
        *self.last_cleanup.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Path of the log file for `date` under the current configuration
    pub fn log_file_path(&self, date: NaiveDate) -> PathBuf {
        self.config().resolved_directory().join(log_file_name(date))
    }

    /// Append `message` as one record to today's log file
    ///
    /// Returns `false` if the file could not be opened or written, including
    /// when it stayed locked by another process for the whole retry budget.
    pub fn write(&self, message: &str) -> bool {
        match self.try_write(message) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!("Log write failed: {}", e);
                false
            }
        }
    }

    fn try_write(&self, message: &str) -> Result<()> {
        let started = Instant::now();
        let now = Local::now();
        let config = self.config();
        let dir = config.resolved_directory();

        // A real problem with the directory surfaces at open time
        let _ = fs::create_dir_all(&dir);

        let today = now.date_naive();
        let path = dir.join(log_file_name(today));

        if config.auto_delete && self.last_cleanup() != Some(today) {
            self.delete();
        }

        let mut file = open_with_retry(
            &path,
            started,
            config.retry_budget(),
            RETRY_INTERVAL,
            || open_append(&path),
        )?;

        let record = format_record(
            &now,
            message,
            NewlineMode::from_preserve(config.preserve_newlines),
        );
        file.write_all(record.as_bytes())
            .map_err(|e| LogError::Append { path, source: e })
    }

    /// Delete log files older than the retention window
    ///
    /// Returns `false` only if the log directory could not be listed.
    /// Files that cannot be removed are skipped.
    pub fn delete(&self) -> bool {
        let today = Local::now().date_naive();
        let config = self.config();

        match prune_logs(&config.resolved_directory(), today, config.retention_days) {
            Ok(count) => {
                if count > 0 {
                    tracing::debug!("Cleaned up {} old log files", count);
                }
                *self.last_cleanup.lock().unwrap_or_else(PoisonError::into_inner) = Some(today);
                true
            }
            Err(e) => {
                tracing::debug!("Log cleanup failed: {}", e);
                false
            }
        }
    }
}
