//! Logging setup for the `tilecache` binary.
//!
//! Log records go to stderr (so tile bytes written to stdout stay clean) and
//! to `tilecache.log` in the log directory, which is truncated at startup.
//! The level defaults to `info` and can be changed with `RUST_LOG`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping this guard will flush and close the log file writer.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Initialize logging.
///
/// # Arguments
///
/// * `log_dir` - Directory for log files, created if missing
/// * `log_file` - Log filename
/// * `default_level` - Filter used when `RUST_LOG` is not set
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or the log file
/// cannot be truncated.
pub fn init_logging(
    log_dir: &Path,
    log_file: &str,
    default_level: &str,
) -> Result<LoggingGuard, io::Error> {
    prepare_log_file(log_dir, log_file)?;

    let file_appender = tracing_appender::rolling::never(log_dir, log_file);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .compact();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// Creates the log directory and empties the log file.
fn prepare_log_file(log_dir: &Path, log_file: &str) -> io::Result<PathBuf> {
    fs::create_dir_all(log_dir)?;
    let log_path = log_dir.join(log_file);
    fs::write(&log_path, "")?;
    Ok(log_path)
}

/// Default log directory (~/.tilecache/logs).
pub fn default_log_dir() -> PathBuf {
    crate::config::config_directory().join("logs")
}

/// Default log file name.
pub fn default_log_file() -> &'static str {
    "tilecache.log"
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_paths() {
        assert!(default_log_dir().ends_with(".tilecache/logs"));
        assert_eq!(default_log_file(), "tilecache.log");
    }

    #[test]
    fn test_prepare_creates_nested_directory() {
        let temp_dir = TempDir::new().unwrap();
        let log_dir = temp_dir.path().join("deep").join("logs");

        let path = prepare_log_file(&log_dir, "test.log").unwrap();

        assert!(log_dir.is_dir());
        assert_eq!(fs::read_to_string(path).unwrap(), "");
    }

    #[test]
    fn test_prepare_clears_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("test.log");
        fs::write(&log_path, "old log data").unwrap();

        prepare_log_file(temp_dir.path(), "test.log").unwrap();

        assert_eq!(fs::read_to_string(&log_path).unwrap(), "");
    }

    #[test]
    fn test_prepare_fails_when_dir_is_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        assert!(prepare_log_file(&blocker.join("logs"), "test.log").is_err());
    }
}
