use color_eyre::eyre::{eyre, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, registry::Registry, EnvFilter};

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    /// The terminal belongs to the UI, so logs go to a file.
    File(&'a Path),
    Stderr,
}

/// Installs the global subscriber.
///
/// The level comes from `RUST_LOG`, falling back to `info` (`debug` when
/// `debug` is set). The returned guard flushes the file writer on drop and
/// must be held until exit.
pub fn init_logging(target: LogTarget<'_>, debug: bool) -> Result<Option<WorkerGuard>> {
    let default_level = if debug { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    match target {
        LogTarget::File(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .ok_or_else(|| eyre!("Invalid log file path: {}", path.display()))?;

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            Registry::default()
                .with(env_filter)
                .with(fmt::layer().with_writer(writer).with_ansi(false).with_target(true))
                .try_init()
                .map_err(|e| eyre!("Failed to initialise logging: {e}"))?;

            Ok(Some(guard))
        }
        LogTarget::Stderr => {
            Registry::default()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .try_init()
                .map_err(|e| eyre!("Failed to initialise logging: {e}"))?;

            Ok(None)
        }
    }
}
