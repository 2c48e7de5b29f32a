//! Compression and retention of rotated log files.
//!
//! The rolling appender only creates files; this module gzips every
//! finished day into a `.gz` next to it and prunes the oldest files so a
//! level directory never holds more than `max_files` days.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use flate2::write::GzEncoder;
use flate2::Compression;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::clock::Clock;
use crate::error::TelemetryError;
use crate::rotation::RotationConfig;

/// How often the sweeper runs.
const SWEEP_INTERVAL: Duration = Duration::from_secs(3600); // 1 hour

/// Counts of files touched by one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub archived: usize,
    pub pruned: usize,
}

impl std::ops::AddAssign for SweepReport {
    fn add_assign(&mut self, other: Self) {
        self.archived += other.archived;
        self.pruned += other.pruned;
    }
}

struct LogFile {
    date: NaiveDate,
    path: PathBuf,
    archived: bool,
}

/// Archive finished days and enforce retention in `config.directory`.
///
/// `today` is the file currently being written and is never touched. Both
/// plain and archived files count toward `max_files`; the newest days win.
pub fn sweep(config: &RotationConfig, today: NaiveDate) -> Result<SweepReport, TelemetryError> {
    let mut report = SweepReport::default();
    let mut files = match list_log_files(config) {
        Ok(files) => files,
        Err(TelemetryError::Io(e)) if e.kind() == io::ErrorKind::NotFound => return Ok(report),
        Err(e) => return Err(e),
    };

    if config.compress_on_rotate {
        for file in files.iter_mut().filter(|f| !f.archived && f.date < today) {
            let dest = config.directory.join(config.archive_name(file.date));
            archive_file(&file.path, &dest)?;
            fs::remove_file(&file.path)?;
            file.path = dest;
            file.archived = true;
            report.archived += 1;
        }
    }

    // A day can briefly exist both as `.log` and `.log.gz`; count it once.
    files.sort_by(|a, b| b.date.cmp(&a.date).then(b.archived.cmp(&a.archived)));
    let mut kept_days = 0;
    let mut last_day = None;
    for file in files {
        if last_day != Some(file.date) {
            last_day = Some(file.date);
            kept_days += 1;
        }
        if kept_days > config.max_files {
            fs::remove_file(&file.path)?;
            report.pruned += 1;
        }
    }

    Ok(report)
}

fn list_log_files(config: &RotationConfig) -> Result<Vec<LogFile>, TelemetryError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(&config.directory)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if let Some((date, archived)) = config.parse_file_name(name) {
            files.push(LogFile {
                date,
                path: entry.path(),
                archived,
            });
        }
    }
    Ok(files)
}

/// Gzip `src` into `dest`.
///
/// Writes to a temporary name first so a crash never leaves a truncated
/// archive under the final name.
fn archive_file(src: &Path, dest: &Path) -> Result<(), TelemetryError> {
    let tmp = dest.with_extension("gz.tmp");

    let mut encoder = GzEncoder::new(BufWriter::new(File::create(&tmp)?), Compression::default());
    io::copy(&mut File::open(src)?, &mut encoder)?;
    encoder.finish()?.flush()?;

    fs::rename(&tmp, dest)?;
    Ok(())
}

/// Background task that runs [`sweep`] over every configured level.
pub struct ArchiveSweeper {
    configs: Vec<RotationConfig>,
    clock: Arc<dyn Clock>,
    interval: Duration,
}

impl ArchiveSweeper {
    pub fn new(configs: Vec<RotationConfig>, clock: Arc<dyn Clock>) -> Self {
        Self {
            configs,
            clock,
            interval: SWEEP_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Sweep every level once. A failure in one level is logged and does not
    /// stop the others.
    pub fn sweep_all(&self) -> SweepReport {
        let today = self.clock.now().date_naive();
        let mut total = SweepReport::default();
        for config in &self.configs {
            match sweep(config, today) {
                Ok(report) => total += report,
                Err(e) => {
                    tracing::error!(
                        level = %config.level,
                        directory = %config.directory.display(),
                        error = %e,
                        "Log archive sweep failed"
                    );
                }
            }
        }
        total
    }

    /// Run until `cancel` is triggered. The first sweep happens immediately.
    pub async fn run(self, cancel: CancellationToken) {
        tracing::info!(
            levels = self.configs.len(),
            interval_secs = self.interval.as_secs(),
            "Log archive sweeper started"
        );

        let mut interval = tokio::time::interval(self.interval);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Log archive sweeper stopping");
                    break;
                }
                _ = interval.tick() => {
                    let report = self.sweep_all();
                    if report != SweepReport::default() {
                        tracing::info!(
                            archived = report.archived,
                            pruned = report.pruned,
                            "Log archive sweep complete"
                        );
                    } else {
                        tracing::debug!("Log archive sweep: nothing to do");
                    }
                }
            }
        }
    }
}

/// How a sweeper task ended during shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweeperExit {
    Stopped,
    Failed,
    TimedOut,
}

/// A spawned [`ArchiveSweeper`] and the token that stops it.
pub struct SweeperHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl ArchiveSweeper {
    /// Spawn [`run`](Self::run) on the current runtime.
    pub fn spawn(self) -> SweeperHandle {
        let cancel = CancellationToken::new();
        let task = tokio::spawn(self.run(cancel.clone()));
        SweeperHandle { cancel, task }
    }
}

impl SweeperHandle {
    /// Cancel the sweeper and wait up to `timeout` for it to finish. A task
    /// still running after `timeout` is aborted.
    pub async fn shutdown(self, timeout: Duration) -> SweeperExit {
        self.cancel.cancel();
        let mut task = self.task;
        match tokio::time::timeout(timeout, &mut task).await {
            Ok(Ok(())) => {
                tracing::info!("Log archive sweeper stopped");
                SweeperExit::Stopped
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Log archive sweeper task failed");
                SweeperExit::Failed
            }
            Err(_) => {
                task.abort();
                tracing::warn!(
                    timeout_secs = timeout.as_secs(),
                    "Log archive sweeper did not stop in time"
                );
                SweeperExit::TimedOut
            }
        }
    }
}
