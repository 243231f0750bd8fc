//! Logging setup: console for operators, rotating file for diagnostics.
//!
//! Console (stderr) shows INFO and above; the log file records DEBUG and
//! above. The file honors the `logger` settings (`log_filename`,
//! `log_max_bytes`, `log_backup_count`): when the file exceeds the size cap
//! it is rotated at startup, shifting `log.txt` to `log.txt.1` and so on up
//! to the backup count. A single run may exceed the cap; rotation happens
//! once per run.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::debug;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::LoggerSettings;

/// Initialize the global tracing subscriber.
///
/// The returned guard flushes buffered log lines on drop; hold it for the
/// lifetime of the process.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a subscriber is
/// already installed.
pub fn init(settings: &LoggerSettings) -> Result<WorkerGuard> {
    rotate_if_oversized(
        &settings.log_filename,
        settings.log_max_bytes,
        settings.log_backup_count,
    )
    .with_context(|| {
        format!(
            "Failed to rotate log file: {}",
            settings.log_filename.display()
        )
    })?;

    if let Some(parent) = settings.log_filename.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create log directory: {}", parent.display())
        })?;
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&settings.log_filename)
        .with_context(|| {
            format!(
                "Failed to open log file: {}",
                settings.log_filename.display()
            )
        })?;
    let (file_writer, guard) = tracing_appender::non_blocking(file);

    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer)
                .with_filter(LevelFilter::DEBUG),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(console_filter),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    debug!("------------------------------");
    debug!(
        "Starting log for session {}",
        Utc::now().format("%Y%m%d%H%M%S%f")
    );

    Ok(guard)
}

/// Rotate `path` into numbered backups when it exceeds `max_bytes`.
///
/// Backups shift up by one (`.1` becomes `.2`, ...); the backup numbered
/// `backup_count` is dropped. With a backup count of zero the oversized file
/// is simply removed.
fn rotate_if_oversized(path: &Path, max_bytes: u64, backup_count: u32) -> std::io::Result<()> {
    let len = match std::fs::metadata(path) {
        Ok(meta) => meta.len(),
        // Nothing to rotate yet.
        Err(_) => return Ok(()),
    };
    if max_bytes == 0 || len < max_bytes {
        return Ok(());
    }

    if backup_count == 0 {
        return std::fs::remove_file(path);
    }

    let oldest = backup_path(path, backup_count);
    if oldest.exists() {
        std::fs::remove_file(&oldest)?;
    }
    for n in (1..backup_count).rev() {
        let from = backup_path(path, n);
        if from.exists() {
            std::fs::rename(&from, backup_path(path, n + 1))?;
        }
    }
    std::fs::rename(path, backup_path(path, 1))
}

fn backup_path(path: &Path, n: u32) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(format!(".{n}"));
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_file(path: &Path, contents: &str) {
        std::fs::write(path, contents).expect("write file");
    }

    fn read_file(path: &Path) -> String {
        std::fs::read_to_string(path).expect("read file")
    }

    #[test]
    fn test_no_rotation_below_cap() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("log.txt");
        write_file(&log, "small");

        rotate_if_oversized(&log, 1024, 5).unwrap();

        assert_eq!(read_file(&log), "small");
        assert!(!backup_path(&log, 1).exists());
    }

    #[test]
    fn test_missing_file_is_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("log.txt");

        rotate_if_oversized(&log, 1024, 5).unwrap();

        assert!(!log.exists());
    }

    #[test]
    fn test_oversized_file_shifts_to_first_backup() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("log.txt");
        write_file(&log, "0123456789");

        rotate_if_oversized(&log, 10, 5).unwrap();

        assert!(!log.exists());
        assert_eq!(read_file(&backup_path(&log, 1)), "0123456789");
    }

    #[test]
    fn test_existing_backups_renumber_and_oldest_drops() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("log.txt");
        write_file(&log, "current!");
        write_file(&backup_path(&log, 1), "first");
        write_file(&backup_path(&log, 2), "second");

        rotate_if_oversized(&log, 8, 2).unwrap();

        assert_eq!(read_file(&backup_path(&log, 1)), "current!");
        assert_eq!(read_file(&backup_path(&log, 2)), "first");
        // "second" was the oldest backup at the cap and is gone.
        assert!(!backup_path(&log, 3).exists());
        assert!(!log.exists());
    }

    #[test]
    fn test_zero_backup_count_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("log.txt");
        write_file(&log, "0123456789");

        rotate_if_oversized(&log, 10, 0).unwrap();

        assert!(!log.exists());
        assert!(!backup_path(&log, 1).exists());
    }
}
