//! File logging.
//!
//! The terminal belongs to the panel while it is up, so log lines go to
//! `<data dir>/floaty.log` through a non-blocking writer. The filter comes
//! from `FLOATY_LOG` (same syntax as `RUST_LOG`), defaulting to `info`.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const LOG_FILE: &str = "floaty.log";
const FILTER_ENV: &str = "FLOATY_LOG";

/// Keeps the background writer alive; dropping it flushes the log.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

pub fn log_path(data_dir: &Path) -> PathBuf {
    data_dir.join(LOG_FILE)
}

/// Install the global subscriber. Returns `None` when the log file cannot be
/// opened; the app runs without logging in that case.
pub fn init(data_dir: &Path) -> Option<LoggingGuard> {
    fs::create_dir_all(data_dir).ok()?;
    let path = log_path(data_dir);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    let (writer, file_guard) = tracing_appender::non_blocking(file);
    let filter = EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false);

    // A second init (tests, CLI after TUI) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();

    tracing::info!(log_path = %path.display(), "logging initialized");
    Some(LoggingGuard {
        _file_guard: file_guard,
    })
}
