//! CLI parse: clap types for treecmp. No behavior beyond value parsing.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use clap::Parser;
use std::path::PathBuf;

/// treecmp - compare two directory trees, metadata included
#[derive(Parser, Debug)]
#[command(name = "treecmp")]
#[command(about = "Compare two directory trees, including ownership, mode, mtime and content")]
#[command(version)]
pub struct Cli {
    /// Left tree (usually the source)
    pub left: PathBuf,

    /// Right tree (usually the backup)
    pub right: PathBuf,

    /// Label for the left tree in the report (default: the path as given)
    #[arg(long)]
    pub left_label: Option<String>,

    /// Label for the right tree in the report (default: the path as given)
    #[arg(long)]
    pub right_label: Option<String>,

    /// Left entries modified after this time have mtime-led differences suppressed
    /// (Unix seconds, RFC 3339, or "YYYY-MM-DD HH:MM:SS" local time)
    #[arg(long, value_parser = parse_threshold)]
    pub left_threshold: Option<i64>,

    /// Right entries modified after this time have mtime-led differences suppressed
    #[arg(long, value_parser = parse_threshold)]
    pub right_threshold: Option<i64>,

    /// Do not report differences consisting only of modification time
    #[arg(long)]
    pub ignore_mtime: bool,

    /// Do not report one-sided entries that the backup tool excludes
    #[arg(long)]
    pub skip_excluded: bool,

    /// File of exclusion rules, one "<type> <pattern>" per line
    #[arg(long)]
    pub exclude_file: Option<PathBuf>,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(long, short)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, short, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

/// Parse a threshold timestamp into Unix seconds
pub fn parse_threshold(value: &str) -> Result<i64, String> {
    let value = value.trim();

    if let Ok(seconds) = value.parse::<i64>() {
        return Ok(seconds);
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Ok(datetime.timestamp());
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|datetime| datetime.timestamp())
            .ok_or_else(|| format!("'{}' does not exist in the local time zone", value));
    }

    Err(format!(
        "invalid timestamp '{}': expected Unix seconds, RFC 3339, or 'YYYY-MM-DD HH:MM:SS'",
        value
    ))
}
