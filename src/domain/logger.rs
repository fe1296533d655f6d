//! Logging system: stderr output plus optional daily-rotated log files.

use anyhow::Result;
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use time::macros::format_description;
use tracing::Level;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::time::OffsetTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Log file name prefix inside the log directory.
const LOG_PREFIX: &str = "tars-config";

/// Logging options taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// Log at debug level instead of warn
    pub debug: bool,
    /// Also write daily-rotated log files here
    pub log_dir: Option<PathBuf>,
}

/// Initialize the logging system.
///
/// `RUST_LOG` directives take precedence over the default level.
pub fn init(options: &LogOptions) -> Result<()> {
    let level = if options.debug { Level::DEBUG } else { Level::WARN };

    // Use local timezone for timestamps
    let time_format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let local_offset = time::UtcOffset::current_local_offset().unwrap_or(time::UtcOffset::UTC);
    let timer = OffsetTime::new(local_offset, time_format);

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .with_timer(timer.clone());

    let file_layer = match &options.log_dir {
        Some(dir) => {
            // Create log directory if needed
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }

            // Clean up old logs
            cleanup_old_logs(dir)?;

            // Create rolling file appender with daily rotation
            let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_PREFIX);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(true)
                    .with_line_number(true)
                    .with_timer(timer),
            )
        }
        None => None,
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    Ok(())
}

/// Clean up log files older than 2 days.
pub fn cleanup_old_logs(log_path: &Path) -> Result<()> {
    use std::time::{Duration, SystemTime};

    let two_days = Duration::from_secs(2 * 24 * 60 * 60);
    let cutoff = SystemTime::now() - two_days;

    if !log_path.exists() {
        return Ok(());
    }

    for entry in fs::read_dir(log_path)? {
        let entry = entry?;
        let path = entry.path();

        // Only process log files
        if !path.is_file() {
            continue;
        }

        let filename = match path.file_name().and_then(|n| n.to_str()) {
            Some(n) => n,
            None => continue,
        };

        if !filename.starts_with(LOG_PREFIX) {
            continue;
        }

        // Check modification time
        if let Ok(metadata) = entry.metadata() {
            if let Ok(modified) = metadata.modified() {
                if modified < cutoff {
                    let _ = fs::remove_file(&path);
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleanup_keeps_fresh_and_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        let fresh = dir.path().join(format!("{}.2026-10-18", LOG_PREFIX));
        let foreign = dir.path().join("other.log");
        fs::write(&fresh, "x").unwrap();
        fs::write(&foreign, "y").unwrap();

        cleanup_old_logs(dir.path()).unwrap();

        assert!(fresh.exists());
        assert!(foreign.exists());
    }

    #[test]
    fn test_cleanup_missing_dir_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        assert!(cleanup_old_logs(&dir.path().join("nope")).is_ok());
    }
}
