// template-editor-tui/src/logging.rs
//
// The TUI owns the terminal, so logs go to a file under the data dir.
use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_FILE_NAME: &str = "template-editor.log";

/// Keep alive for the duration of the program; dropping it flushes the log file.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

pub fn get_log_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().context("Could not determine the data directory")?;
    Ok(data_dir.join("template-editor").join(LOG_FILE_NAME))
}

/// Installs a file-backed subscriber. `RUST_LOG` overrides the default `info` filter.
pub fn init() -> Result<LoggingGuard> {
    let log_path = get_log_path()?;
    if let Some(log_dir) = log_path.parent() {
        fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!(log_path = %log_path.display(), "Logging initialized");
    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}
