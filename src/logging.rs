use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{ExtractError, Result};

/// Open the daily-rotated log file in `log_dir`, creating the directory first
fn file_appender(log_dir: &Path) -> Result<RollingFileAppender> {
    fs::create_dir_all(log_dir)?;
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("asme_dimensions.log")
        .build(log_dir)
        .map_err(|e| {
            ExtractError::Config(format!("Cannot log to '{}': {}", log_dir.display(), e))
        })
}

/// Initializes logging to the console and a daily-rotated JSON file in `log_dir`.
///
/// The returned guard must be held until exit so buffered file logs are flushed.
pub fn init_logging(log_dir: &Path) -> Result<WorkerGuard> {
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender(log_dir)?);

    let file_layer = fmt::layer().json().with_writer(non_blocking_writer);

    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    // Respect RUST_LOG if set
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("asme_dimensions=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_log_dir_that_is_a_file_is_an_error() {
        let file = NamedTempFile::new().unwrap();
        assert!(file_appender(file.path()).is_err());
    }

    #[test]
    fn test_missing_log_dir_is_created() {
        let dir = tempdir().unwrap();
        let log_dir = dir.path().join("logs").join("nested");
        file_appender(&log_dir).unwrap();
        assert!(log_dir.is_dir());
    }
}
