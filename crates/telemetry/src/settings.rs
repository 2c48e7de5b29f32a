use std::path::PathBuf;

use crate::error::TelemetryError;
use crate::rotation::{Severity, DEFAULT_MAX_FILES};

/// Logging configuration, built once at startup and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Root directory; each level logs into `<directory>/<level>`.
    pub directory: PathBuf,
    /// Levels that get their own rotated file sink.
    pub levels: Vec<Severity>,
    /// Historical files kept per level.
    pub max_files: usize,
    /// IANA timezone for console timestamps. `None` omits the timestamp.
    pub timezone: Option<String>,
    /// Runtime environment name, printed at the start of every file line.
    pub environment: String,
    /// Default console filter when `RUST_LOG` is unset.
    pub filter: String,
    pub pretty_print: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("./logs"),
            levels: vec![
                Severity::Error,
                Severity::Warn,
                Severity::Info,
                Severity::Debug,
            ],
            max_files: DEFAULT_MAX_FILES,
            timezone: None,
            environment: "development".into(),
            filter: "info".into(),
            pretty_print: true,
        }
    }
}

impl LoggingSettings {
    /// Load settings from environment variables with defaults.
    ///
    /// | Env Var         | Default                  |
    /// |-----------------|--------------------------|
    /// | `LOG_DIR`       | `./logs`                 |
    /// | `LOG_LEVELS`    | `error,warn,info,debug`  |
    /// | `LOG_MAX_FILES` | `30`                     |
    /// | `LOG_TZ`        | unset (no timestamp)     |
    /// | `APP_ENV`       | `development`            |
    /// | `LOG_FILTER`    | `info`                   |
    /// | `LOG_PRETTY`    | `true`                   |
    pub fn from_env() -> Result<Self, TelemetryError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_vars<F>(var: F) -> Result<Self, TelemetryError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| {
            var(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let directory = non_empty("LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.directory);

        let levels = match non_empty("LOG_LEVELS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::parse::<Severity>)
                .collect::<Result<Vec<Severity>, _>>()?,
            None => defaults.levels,
        };

        let max_files = match non_empty("LOG_MAX_FILES") {
            Some(raw) => raw.parse::<usize>().ok().filter(|n| *n > 0).ok_or_else(|| {
                TelemetryError::Config(format!(
                    "LOG_MAX_FILES must be a positive integer, got '{raw}'"
                ))
            })?,
            None => defaults.max_files,
        };

        let pretty_print = match non_empty("LOG_PRETTY") {
            Some(raw) => raw.parse::<bool>().map_err(|_| {
                TelemetryError::Config(format!("LOG_PRETTY must be true or false, got '{raw}'"))
            })?,
            None => defaults.pretty_print,
        };

        Ok(Self {
            directory,
            levels,
            max_files,
            timezone: non_empty("LOG_TZ"),
            environment: non_empty("APP_ENV").unwrap_or(defaults.environment),
            filter: non_empty("LOG_FILTER").unwrap_or(defaults.filter),
            pretty_print,
        })
    }
}
