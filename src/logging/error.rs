//! Failure causes behind the boolean results of `write` and `delete`

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Why a log operation failed
#[derive(Debug, Error)]
pub(crate) enum LogError {
    /// The log file could not be opened for a reason other than contention
    #[error("failed to open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The log file stayed locked by another process for the whole retry budget
    #[error("log file {path} still in use after {elapsed:?} (budget {budget:?})")]
    RetryBudgetExhausted {
        path: PathBuf,
        elapsed: Duration,
        budget: Duration,
    },

    /// The record could not be appended
    #[error("failed to append to log file {path}: {source}")]
    Append {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The log directory could not be listed during cleanup
    #[error("failed to list log directory {path}: {source}")]
    ListDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub(crate) type Result<T> = std::result::Result<T, LogError>;
