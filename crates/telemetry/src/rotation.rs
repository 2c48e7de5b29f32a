//! Per-severity daily rotation configuration.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::TelemetryError;
use crate::settings::LoggingSettings;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Date token used in rotated file names (`2026-10-16`).
pub const DATE_PATTERN: &str = "%Y-%m-%d";

/// Default number of historical files kept per level.
pub const DEFAULT_MAX_FILES: usize = 30;

/// Extension appended to a log file once it has been archived.
pub const ARCHIVE_EXTENSION: &str = "gz";

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Log severity, ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::Error,
        Severity::Warn,
        Severity::Info,
        Severity::Debug,
        Severity::Trace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warn => "warn",
            Severity::Info => "info",
            Severity::Debug => "debug",
            Severity::Trace => "trace",
        }
    }

    pub fn level(&self) -> tracing::Level {
        match self {
            Severity::Error => tracing::Level::ERROR,
            Severity::Warn => tracing::Level::WARN,
            Severity::Info => tracing::Level::INFO,
            Severity::Debug => tracing::Level::DEBUG,
            Severity::Trace => tracing::Level::TRACE,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = TelemetryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(Severity::Error),
            "warn" | "warning" => Ok(Severity::Warn),
            "info" => Ok(Severity::Info),
            "debug" => Ok(Severity::Debug),
            "trace" => Ok(Severity::Trace),
            _ => Err(TelemetryError::InvalidLevel(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Rotation config
// ---------------------------------------------------------------------------

/// How lines in a rotated file are rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFormat {
    /// Label at the start of each line; the runtime environment name.
    pub app_name: String,
    /// Attach a structured UTC timestamp to each line.
    pub timestamp: bool,
    pub colors: bool,
    pub pretty_print: bool,
}

/// Everything the file sink for one severity needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationConfig {
    pub level: Severity,
    pub directory: PathBuf,
    pub date_pattern: &'static str,
    /// Part of the file name after the date: `<level>.log`.
    pub filename_suffix: String,
    pub max_files: usize,
    pub compress_on_rotate: bool,
    pub format: LineFormat,
}

impl RotationConfig {
    /// File name for the given day, e.g. `2026-10-16.error.log`.
    pub fn file_name(&self, date: NaiveDate) -> String {
        format!("{}.{}", date.format(self.date_pattern), self.filename_suffix)
    }

    /// Archive name for the given day, e.g. `2026-10-16.error.log.gz`.
    pub fn archive_name(&self, date: NaiveDate) -> String {
        format!("{}.{ARCHIVE_EXTENSION}", self.file_name(date))
    }

    /// Parse a file name produced by [`file_name`](Self::file_name) or
    /// [`archive_name`](Self::archive_name). Returns the day and whether the
    /// file is an archive; `None` for anything else.
    pub fn parse_file_name(&self, name: &str) -> Option<(NaiveDate, bool)> {
        let (date, rest) = name.split_once('.')?;
        let date = NaiveDate::parse_from_str(date, self.date_pattern).ok()?;
        if rest == self.filename_suffix {
            return Some((date, false));
        }
        let archived = rest
            .strip_prefix(self.filename_suffix.as_str())?
            .strip_prefix('.')?;
        (archived == ARCHIVE_EXTENSION).then_some((date, true))
    }
}

/// Rotation configuration for one severity.
///
/// Pure: the result depends only on `level` and `settings`, so repeated calls
/// return equal values.
pub fn daily_rotation_config(level: Severity, settings: &LoggingSettings) -> RotationConfig {
    RotationConfig {
        level,
        directory: settings.directory.join(level.as_str()),
        date_pattern: DATE_PATTERN,
        filename_suffix: format!("{level}.log"),
        max_files: settings.max_files,
        compress_on_rotate: true,
        format: LineFormat {
            app_name: settings.environment.clone(),
            timestamp: true,
            colors: false,
            pretty_print: settings.pretty_print,
        },
    }
}

/// Rotation configurations for every level in `settings`, deduplicated.
pub fn rotation_configs(settings: &LoggingSettings) -> Vec<RotationConfig> {
    let mut levels = settings.levels.clone();
    levels.sort();
    levels.dedup();
    levels
        .into_iter()
        .map(|level| daily_rotation_config(level, settings))
        .collect()
}
