//! Logging setup for the command-line host.
//!
//! The library only emits `tracing` events. [`init`] installs a subscriber
//! that writes them to stderr and, when a log directory is given, to a
//! daily-rotating file as well.
//!
//! ```no_run
//! use data_decay::logging;
//!
//! logging::init(Some(std::path::Path::new("logs"))).expect("Failed to initialize logging");
//! tracing::info!("Profiler started");
//! ```

use anyhow::{Context as _, Result};
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

const LOG_FILE_PREFIX: &str = "data-decay";

/// Installs the global subscriber. `RUST_LOG` overrides the default `info`
/// level.
///
/// # Errors
///
/// Returns error if the log directory cannot be created, the file appender
/// fails, or a subscriber is already installed.
pub fn init(log_dir: Option<&Path>) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("Failed to create env filter")?;

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .boxed();

    let file_layer = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .max_log_files(10)
                .filename_prefix(LOG_FILE_PREFIX)
                .filename_suffix("log")
                .build(dir)
                .context("Failed to create log file appender")?;
            Some(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .with_ansi(false)
                    .with_writer(appender)
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    if let Some(dir) = log_dir {
        tracing::debug!("Logging initialized, log directory: {}", dir.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_creates_log_directory() -> Result<()> {
        let root = tempfile::tempdir()?;
        let dir = root.path().join("nested").join("logs");
        init(Some(&dir))?;
        assert!(dir.is_dir());
        Ok(())
    }
}
