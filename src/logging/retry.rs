//! Opening the log file while another process holds it
//!
//! Only "file in use" class errors are retried. Everything else fails at once.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use super::error::{LogError, Result};

/// Pause between two open attempts on a contended file
pub const RETRY_INTERVAL: Duration = Duration::from_millis(100);

/// Fallback for platforms that only report contention through the message text
const IN_USE_MESSAGE: &str = "being used by another process";

/// Windows `ERROR_SHARING_VIOLATION`
#[cfg(windows)]
const ERROR_SHARING_VIOLATION: i32 = 32;

/// Windows `ERROR_LOCK_VIOLATION`
#[cfg(windows)]
const ERROR_LOCK_VIOLATION: i32 = 33;

/// Check whether an open error means the file is locked or in use by someone else
pub fn is_contention(e: &io::Error) -> bool {
    use std::io::ErrorKind;

    if matches!(e.kind(), ErrorKind::ResourceBusy | ErrorKind::WouldBlock) {
        return true;
    }

    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            if code == libc::EBUSY || code == libc::ETXTBSY || code == libc::EAGAIN {
                return true;
            }
        }
        #[cfg(windows)]
        {
            if code == ERROR_SHARING_VIOLATION || code == ERROR_LOCK_VIOLATION {
                return true;
            }
        }
        #[cfg(not(any(unix, windows)))]
        let _ = code;
        return false;
    }

    e.to_string().contains(IN_USE_MESSAGE)
}

/// Open `path` for appending, creating it if absent
pub fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Run `open` until it succeeds, fails with a non-contention error, or the
/// time since `started` exceeds `budget`.
pub fn open_with_retry<F>(
    path: &Path,
    started: Instant,
    budget: Duration,
    interval: Duration,
    mut open: F,
) -> Result<File>
where
    F: FnMut() -> io::Result<File>,
{
    loop {
        match open() {
            Ok(file) => return Ok(file),
            Err(e) if is_contention(&e) => {
                let elapsed = started.elapsed();
                if elapsed > budget {
                    return Err(LogError::RetryBudgetExhausted {
                        path: path.to_path_buf(),
                        elapsed,
                        budget,
                    });
                }
                tracing::trace!("Log file {} in use, retrying: {}", path.display(), e);
                thread::sleep(interval);
            }
            Err(e) => {
                return Err(LogError::Open {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        }
    }
}
