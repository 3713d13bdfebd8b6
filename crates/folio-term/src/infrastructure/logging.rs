use std::path::PathBuf;

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;

use crate::configuration::Config;
use crate::configuration::ConfigKey;

pub fn log_dir() -> PathBuf {
    return dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("folio");
}

/// Sends JSON logs to `<cache dir>/folio/folio.log` so the terminal UI stays
/// clean. The returned guard flushes the writer when dropped.
pub fn setup_logging() -> Result<WorkerGuard> {
    let dir = log_dir();
    std::fs::create_dir_all(&dir)?;

    let level = Config::get(ConfigKey::LogLevel)
        .parse::<LevelFilter>()
        .unwrap_or(LevelFilter::INFO);

    let file_appender = tracing_appender::rolling::never(&dir, "folio.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .json()
        .with_writer(writer)
        .with_max_level(level)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))?;

    tracing::info!(dir = %dir.display(), level = %level, "logging initialized");
    Config::log_resolved();

    return Ok(guard);
}
