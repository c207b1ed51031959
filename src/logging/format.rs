//! File naming and record formatting

use chrono::{DateTime, NaiveDate, TimeZone};

/// Date format of log file names
pub const FILE_DATE_FORMAT: &str = "%Y%m%d";

/// Extension of log files
pub const LOG_EXTENSION: &str = "log";

/// Timestamp format at the start of every record
const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Separator between the timestamp and the message
const SEPARATOR: &str = " : ";

/// Width of `"YYYY/MM/DD HH:MM:SS : "`, the indent of continuation lines
pub const PREFIX_WIDTH: usize = 22;

/// How embedded line breaks in a message are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewlineMode {
    /// Remove every CR and LF so the record is one physical line
    #[default]
    Strip,
    /// Keep line breaks and indent continuation lines under the message column
    Preserve,
}

impl NewlineMode {
    pub fn from_preserve(preserve: bool) -> Self {
        if preserve {
            NewlineMode::Preserve
        } else {
            NewlineMode::Strip
        }
    }
}

/// Log file name for the day of `date`, e.g. `20260121.log`
pub fn log_file_name(date: NaiveDate) -> String {
    format!("{}.{}", date.format(FILE_DATE_FORMAT), LOG_EXTENSION)
}

/// Parse the date out of a log file name.
///
/// The last four characters (the extension with its dot) are dropped and the
/// remainder must be exactly eight digits forming a valid date.
pub fn parse_log_file_date(file_name: &str) -> Option<NaiveDate> {
    let stem = file_name.get(..file_name.len().checked_sub(4)?)?;
    if stem.len() != 8 || !stem.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(stem, FILE_DATE_FORMAT).ok()
}

/// Apply the newline handling of `mode` to `message`
pub fn process_message(message: &str, mode: NewlineMode) -> String {
    match mode {
        NewlineMode::Strip => message.chars().filter(|c| !matches!(c, '\r' | '\n')).collect(),
        NewlineMode::Preserve => {
            let indent = " ".repeat(PREFIX_WIDTH);
            let mut segments = message.split('\n');
            let mut out = segments.next().unwrap_or_default().to_string();
            for segment in segments {
                let segment = segment.replace('\r', "");
                if !segment.is_empty() {
                    out.push('\n');
                    out.push_str(&indent);
                    out.push_str(&segment);
                }
            }
            out
        }
    }
}

/// Format one complete record, newline terminated
pub fn format_record<Tz: TimeZone>(
    timestamp: &DateTime<Tz>,
    message: &str,
    mode: NewlineMode,
) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{}{}{}\n",
        timestamp.format(TIMESTAMP_FORMAT),
        SEPARATOR,
        process_message(message, mode)
    )
}
