//! Logging setup for tilemosaic.
//!
//! Log output goes to two places:
//! - a session log file (truncated each time logging starts)
//! - stdout, in compact form, for following a run from the terminal
//!
//! The level defaults to `info` and can be overridden with `RUST_LOG`.

use crate::config::DEFAULT_LOG_FILE;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Keeps the background log writer alive.
///
/// Dropping it flushes and closes the log file.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Installs the global subscriber writing to `log_dir/log_file` and stdout.
///
/// # Errors
///
/// Fails if the directory cannot be created or the file cannot be truncated.
pub fn init_logging(log_dir: &Path, log_file: &str) -> Result<LoggingGuard, io::Error> {
    prepare_log_file(log_dir, log_file)?;

    let file_appender = tracing_appender::rolling::never(log_dir, log_file);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_span_events(FmtSpan::CLOSE)
        .pretty();

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout)
        .with_ansi(true)
        .with_target(false)
        .compact();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// Same as [`init_logging`], taking the full path of the log file.
pub fn init_logging_at(log_path: &Path) -> Result<LoggingGuard, io::Error> {
    let (dir, file) = split_log_path(log_path);
    init_logging(&dir, &file)
}

/// Creates the log directory and empties the log file.
fn prepare_log_file(log_dir: &Path, log_file: &str) -> Result<PathBuf, io::Error> {
    fs::create_dir_all(log_dir)?;
    let log_path = log_dir.join(log_file);
    fs::write(&log_path, "")?;
    Ok(log_path)
}

/// Splits a log path into directory and file name.
///
/// A bare file name logs to the current directory; a path without a file
/// name uses the default file name.
fn split_log_path(log_path: &Path) -> (PathBuf, String) {
    let dir = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file = log_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());
    (dir, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // init_logging installs a global subscriber, so only the file handling
    // is exercised here.

    #[test]
    fn test_creates_directory_and_file() {
        let temp_dir = TempDir::new().unwrap();
        let log_dir = temp_dir.path().join("logs").join("nested");

        let path = prepare_log_file(&log_dir, "run.log").unwrap();

        assert!(log_dir.is_dir());
        assert_eq!(fs::read_to_string(path).unwrap(), "");
    }

    #[test]
    fn test_truncates_previous_session() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("run.log");
        fs::write(&log_path, "previous session output").unwrap();

        prepare_log_file(temp_dir.path(), "run.log").unwrap();

        assert_eq!(fs::read_to_string(&log_path).unwrap(), "");
    }

    #[test]
    fn test_split_log_path() {
        assert_eq!(
            split_log_path(Path::new("/var/log/tilemosaic/run.log")),
            (PathBuf::from("/var/log/tilemosaic"), "run.log".to_string())
        );
        assert_eq!(
            split_log_path(Path::new("run.log")),
            (PathBuf::from("."), "run.log".to_string())
        );
        assert_eq!(
            split_log_path(Path::new("/")),
            (PathBuf::from("."), DEFAULT_LOG_FILE.to_string())
        );
    }
}
