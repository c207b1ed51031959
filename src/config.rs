//! Configuration management for daylog

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::logging::DEFAULT_RETENTION_DAYS;

/// Logger configuration
///
/// All settings may be changed between calls through
/// [`DailyFileLogger::update_config`](crate::logging::DailyFileLogger::update_config).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Directory that holds the `YYYYMMDD.log` files (default: "log")
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// Number of most recent calendar days, today included, whose files are kept (default: 14)
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,

    /// Maximum time in seconds spent retrying an open on a file held by another process (default: 10)
    #[serde(default = "default_retry_seconds")]
    pub retry_seconds: u64,

    /// Run the retention cleanup from `write` once per calendar day
    #[serde(default)]
    pub auto_delete: bool,

    /// Keep embedded line breaks and indent continuation lines instead of stripping them
    #[serde(default)]
    pub preserve_newlines: bool,
}

fn default_directory() -> PathBuf {
    PathBuf::from("log")
}

fn default_retention_days() -> u32 {
    DEFAULT_RETENTION_DAYS
}

fn default_retry_seconds() -> u64 {
    10
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            retention_days: default_retention_days(),
            retry_seconds: default_retry_seconds(),
            auto_delete: false,
            preserve_newlines: false,
        }
    }
}

impl LoggerConfig {
    /// Create a config that logs into `directory` with every other setting at its default
    pub fn with_directory(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            ..Self::default()
        }
    }

    /// Retry budget for contended opens as a [`Duration`]
    pub fn retry_budget(&self) -> Duration {
        Duration::from_secs(self.retry_seconds)
    }

    /// Output directory with a leading `~` expanded to the home directory
    pub fn resolved_directory(&self) -> PathBuf {
        match self.directory.to_str() {
            Some(dir) => PathBuf::from(shellexpand::tilde(dir).as_ref()),
            None => self.directory.clone(),
        }
    }

    /// Load configuration from the default config file, or return default if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from `path`, or return default if the file does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }
}

/// Get the base configuration directory (~/.daylog)
/// Falls back to ./.daylog if home directory cannot be determined
pub fn config_dir() -> PathBuf {
    try_config_dir().unwrap_or_else(|| {
        tracing::warn!("Could not determine home directory, using current directory for config");
        PathBuf::from(".daylog")
    })
}

/// Try to get the base configuration directory, returning None if home dir is unavailable
pub fn try_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".daylog"))
}

/// Get the path to the config file
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}
