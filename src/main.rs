use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};

use daylog::config::LoggerConfig;
use daylog::DailyFileLogger;

const USAGE: &str = "\
Usage: daylog [MESSAGE...]
       daylog --delete

Appends MESSAGE to today's log file. Without arguments every line read from
stdin is appended as its own record.

Options:
  --delete    Remove log files older than the retention window and exit
  -h, --help  Print this help

The configuration is read from $DAYLOG_CONFIG or ~/.daylog/config.toml.";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "daylog=warn".into()),
        )
        .init();

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("daylog: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<bool> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if matches!(args.first().map(String::as_str), Some("-h" | "--help")) {
        println!("{}", USAGE);
        return Ok(true);
    }

    let logger = DailyFileLogger::new(load_config()?);

    if args.first().map(String::as_str) == Some("--delete") {
        let ok = logger.delete();
        if !ok {
            let dir = logger.config().resolved_directory();
            tracing::warn!("Could not list log directory {}", dir.display());
        }
        return Ok(ok);
    }

    if !args.is_empty() {
        return Ok(logger.write(&args.join(" ")));
    }

    let mut all_written = true;
    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read stdin")?;
        if !logger.write(&line) {
            tracing::warn!("Dropped log record: {}", line);
            all_written = false;
        }
    }
    Ok(all_written)
}

fn load_config() -> Result<LoggerConfig> {
    match std::env::var_os("DAYLOG_CONFIG") {
        Some(path) => LoggerConfig::load_from(&PathBuf::from(path)),
        None => LoggerConfig::load(),
    }
}
