use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

/// Keeps the background log writer alive until the command finishes.
pub struct LoggingGuard {
    _guard: WorkerGuard,
    pub log_path: PathBuf,
}

/// Install the global subscriber.
///
/// Structured logging appends JSON lines to `log_path`; otherwise plain text
/// goes to stderr. `RUST_LOG` overrides the configured level in both modes.
pub fn init_logging(logging: &LoggingConfig, log_path: &Path) -> Result<Option<LoggingGuard>> {
    let level = logging.level().unwrap_or(Level::WARN);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    if !logging.enable_structured {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
        return Ok(None);
    }

    if let Some(dir) = log_path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating log directory at {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("opening log file at {}", log_path.display()))?;

    let (writer, guard) = non_blocking::NonBlockingBuilder::default()
        .lossy(false)
        .finish(file);

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .json()
        .with_current_span(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(writer)
        .finish();

    // Ignore error if a global subscriber is already set (e.g., when running in tests)
    let _ = tracing::subscriber::set_global_default(subscriber);

    Ok(Some(LoggingGuard {
        _guard: guard,
        log_path: log_path.to_path_buf(),
    }))
}
