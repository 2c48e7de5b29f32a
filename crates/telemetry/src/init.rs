//! Global subscriber bootstrap.

use std::sync::Arc;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::PrettyFields;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

use crate::clock::{Clock, SystemClock};
use crate::error::TelemetryError;
use crate::format::NestLikeFormat;
use crate::rotation::{rotation_configs, RotationConfig};
use crate::settings::LoggingSettings;
use crate::timestamp::{timestamp_transform, TimestampOptions, ZonedTimer};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps the non-blocking file writers alive. Dropping it flushes every
/// buffered line, so hold it until the process is about to exit.
#[must_use]
pub struct LogGuards {
    guards: Vec<WorkerGuard>,
}

impl LogGuards {
    /// Number of file sinks backed by these guards.
    pub fn sinks(&self) -> usize {
        self.guards.len()
    }
}

/// Install the global subscriber using the system clock.
pub fn init_tracing(settings: &LoggingSettings) -> Result<LogGuards, TelemetryError> {
    init_tracing_with_clock(settings, Arc::new(SystemClock))
}

/// Install the global subscriber:
///
/// - a console layer filtered by `RUST_LOG` (falling back to
///   `settings.filter`), timestamped in `settings.timezone` when set
/// - one daily-rotating file layer per configured level
///
/// Also routes panics through `tracing` at `error`.
pub fn init_tracing_with_clock(
    settings: &LoggingSettings,
    clock: Arc<dyn Clock>,
) -> Result<LogGuards, TelemetryError> {
    let console_timer = timestamp_transform(
        &TimestampOptions {
            timezone: settings.timezone.clone(),
        },
        Arc::clone(&clock),
    )?;

    let filter = console_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok(), &settings.filter)?;

    let mut layers: Vec<BoxedLayer> = Vec::new();
    let mut guards = Vec::new();
    for config in rotation_configs(settings) {
        let (layer, guard) = file_layer(&config, Arc::clone(&clock))?;
        layers.push(layer);
        guards.push(guard);
    }
    layers.push(console_layer(console_timer, filter));

    tracing_subscriber::registry().with(layers).try_init()?;
    install_panic_hook();

    tracing::info!(
        directory = %settings.directory.display(),
        sinks = guards.len(),
        environment = %settings.environment,
        "Logging initialized"
    );

    Ok(LogGuards { guards })
}

/// `RUST_LOG` wins when set; a malformed value is an error rather than a
/// silent fallback to `default`.
fn console_filter(env: Option<String>, default: &str) -> Result<EnvFilter, TelemetryError> {
    match env.filter(|v| !v.trim().is_empty()) {
        Some(directives) => EnvFilter::try_new(&directives).map_err(|e| {
            TelemetryError::InvalidFilter(format!("{}='{directives}': {e}", EnvFilter::DEFAULT_ENV))
        }),
        None => EnvFilter::try_new(default)
            .map_err(|e| TelemetryError::InvalidFilter(format!("'{default}': {e}"))),
    }
}

fn console_layer(timer: ZonedTimer, filter: EnvFilter) -> BoxedLayer {
    if timer.zone().is_some() {
        fmt::layer().with_timer(timer).with_filter(filter).boxed()
    } else {
        fmt::layer().without_time().with_filter(filter).boxed()
    }
}

/// File sink for one level: receives that severity and everything more severe.
fn file_layer(
    config: &RotationConfig,
    clock: Arc<dyn Clock>,
) -> Result<(BoxedLayer, WorkerGuard), TelemetryError> {
    std::fs::create_dir_all(&config.directory)?;

    let appender = rolling::Builder::new()
        .rotation(rolling::Rotation::DAILY)
        .filename_suffix(config.filename_suffix.clone())
        .build(&config.directory)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let timer = config.format.timestamp.then(|| ZonedTimer::utc(clock));
    let format = NestLikeFormat::new(config.format.app_name.clone(), timer);
    let filter = LevelFilter::from_level(config.level.level());

    let layer = fmt::layer()
        .with_ansi(config.format.colors)
        .with_writer(writer)
        .event_format(format);
    let layer = if config.format.pretty_print {
        layer
            .fmt_fields(PrettyFields::new())
            .with_filter(filter)
            .boxed()
    } else {
        layer.with_filter(filter).boxed()
    };

    Ok((layer, guard))
}

fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "<non-string panic payload>".to_string());
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "unknown".to_string());

        tracing::error!(panic.payload = %payload, panic.location = %location, "Panic");
        previous(info);
    }));
}
