use tracing_appender::rolling::InitError;
use tracing_subscriber::util::TryInitError;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("Invalid timezone '{0}'")]
    InvalidTimezone(String),

    #[error("Invalid log level '{0}'")]
    InvalidLevel(String),

    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),

    #[error("Invalid logging configuration: {0}")]
    Config(String),

    #[error("Failed to build rolling file appender: {0}")]
    Appender(#[from] InitError),

    #[error("Failed to install tracing subscriber: {0}")]
    Init(#[from] TryInitError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
