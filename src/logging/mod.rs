//! Daily-rotating file logging
//!
//! Provides the [`DailyFileLogger`], record formatting, contention-aware file
//! opening and age-based cleanup of old log files.

mod error;
mod file_writer;
mod format;
mod retention;
mod retry;

pub use file_writer::DailyFileLogger;
pub use format::{
    format_record, log_file_name, parse_log_file_date, process_message, NewlineMode,
    PREFIX_WIDTH,
};
pub use retention::{keep_date, DEFAULT_RETENTION_DAYS};
pub use retry::{is_contention, RETRY_INTERVAL};
