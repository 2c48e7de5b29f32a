//! Timezone-aware timestamps for log records.

use std::fmt;
use std::sync::Arc;

use chrono_tz::Tz;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;

use crate::clock::Clock;
use crate::error::TelemetryError;

/// `2026-10-16T21:04:05+09:00`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Input to [`timestamp_transform`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimestampOptions {
    /// IANA timezone name such as `Asia/Seoul`. `None` disables stamping.
    pub timezone: Option<String>,
}

/// Stamps the current instant, converted into a fixed timezone, onto log
/// events. Without a timezone it stamps nothing and the record passes
/// through untouched.
#[derive(Clone)]
pub struct ZonedTimer {
    zone: Option<Tz>,
    clock: Arc<dyn Clock>,
}

impl ZonedTimer {
    pub fn new(zone: Option<Tz>, clock: Arc<dyn Clock>) -> Self {
        Self { zone, clock }
    }

    /// Timer that always stamps in UTC.
    pub fn utc(clock: Arc<dyn Clock>) -> Self {
        Self::new(Some(Tz::UTC), clock)
    }

    pub fn zone(&self) -> Option<Tz> {
        self.zone
    }

    /// The timestamp this timer would attach right now, if any.
    pub fn stamp(&self) -> Option<String> {
        self.zone.map(|zone| {
            self.clock
                .now()
                .with_timezone(&zone)
                .format(TIMESTAMP_FORMAT)
                .to_string()
        })
    }
}

impl fmt::Debug for ZonedTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZonedTimer")
            .field("zone", &self.zone)
            .finish_non_exhaustive()
    }
}

impl FormatTime for ZonedTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        match self.stamp() {
            Some(stamp) => write!(w, "{stamp}"),
            None => Ok(()),
        }
    }
}

/// Build the timestamp transform for `options`.
///
/// An unknown timezone name is a configuration error rather than a silent
/// fallback to UTC.
pub fn timestamp_transform(
    options: &TimestampOptions,
    clock: Arc<dyn Clock>,
) -> Result<ZonedTimer, TelemetryError> {
    let zone = options
        .timezone
        .as_deref()
        .map(parse_timezone)
        .transpose()?;
    Ok(ZonedTimer::new(zone, clock))
}

/// Parse an IANA timezone name.
pub fn parse_timezone(name: &str) -> Result<Tz, TelemetryError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| TelemetryError::InvalidTimezone(name.to_string()))
}
