use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    Layer, filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

use super::config::ServerConfig;

pub const LOG_FILE_PREFIX: &str = "ramenbowl.log";

/// Human-readable lines to stdout, JSON lines to a daily-rolling file.
/// The returned guard must outlive the server or buffered file logs are lost.
pub fn init_logging(config: &ServerConfig) -> anyhow::Result<WorkerGuard> {
    std::fs::create_dir_all(&config.log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let level = LevelFilter::from_level(config.log_level);

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_filter(level))
        .with(
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(file_writer)
                .with_filter(level),
        )
        .try_init()?;

    Ok(guard)
}
