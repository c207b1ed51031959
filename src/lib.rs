//! daylog - minimal daily-rotating file logger
//!
//! Appends timestamped lines to one `YYYYMMDD.log` file per day, retries while
//! the file is held by another process, and optionally removes files older
//! than a retention window.

pub mod config;
pub mod logging;

pub use config::LoggerConfig;
pub use logging::DailyFileLogger;
