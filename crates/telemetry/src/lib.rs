//! Logging configuration for the account backend.
//!
//! Two pure builders sit at the centre of this crate:
//!
//! - [`timestamp_transform`] turns an optional IANA timezone into a
//!   [`ZonedTimer`] that stamps `YYYY-MM-DDTHH:mm:ss±HH:MM` onto each event,
//!   or stamps nothing when no timezone is configured.
//! - [`daily_rotation_config`] maps a [`Severity`] to the directory, file
//!   naming, retention and line format of its daily log file.
//!
//! [`init_tracing`] wires both into a global `tracing` subscriber, and
//! [`ArchiveSweeper`] compresses and prunes rotated files in the background.

pub mod archive;
pub mod clock;
pub mod error;
pub mod format;
pub mod init;
pub mod rotation;
pub mod settings;
pub mod timestamp;

pub use archive::{ArchiveSweeper, SweeperExit, SweeperHandle};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::TelemetryError;
pub use init::{init_tracing, init_tracing_with_clock, LogGuards};
pub use rotation::{daily_rotation_config, rotation_configs, RotationConfig, Severity};
pub use settings::LoggingSettings;
pub use timestamp::{timestamp_transform, TimestampOptions, ZonedTimer};
