//! Logging setup
//!
//! Events go to stderr and to `<logs_dir>/scraper.log`. The log file is
//! rotated on start-up once it grows past the configured size, keeping
//! `scraper.log.1` (newest) to `scraper.log.5` (oldest).

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Name of the active log file
pub const LOG_FILE_NAME: &str = "scraper.log";

/// Number of rotated files kept
pub const LOG_BACKUPS: usize = 5;

/// Builds the level filter for a verbosity count
pub fn level_filter(verbose: u8, quiet: bool) -> EnvFilter {
    if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("pydocs_scraper=info,warn"),
            1 => EnvFilter::new("pydocs_scraper=debug,info"),
            2 => EnvFilter::new("pydocs_scraper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    }
}

fn backup_path(log_path: &Path, index: usize) -> PathBuf {
    let mut name = log_path.as_os_str().to_owned();
    name.push(format!(".{}", index));
    PathBuf::from(name)
}

/// Rotates `log_path` if it is larger than `max_bytes`
///
/// # Returns
///
/// * `Ok(true)` - The file was rotated
/// * `Ok(false)` - The file was missing or small enough
pub fn rotate_if_needed(log_path: &Path, max_bytes: u64, backups: usize) -> std::io::Result<bool> {
    let size = match fs::metadata(log_path) {
        Ok(meta) => meta.len(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };
    if size <= max_bytes || backups == 0 {
        return Ok(false);
    }

    let oldest = backup_path(log_path, backups);
    if oldest.exists() {
        fs::remove_file(&oldest)?;
    }
    for index in (1..backups).rev() {
        let from = backup_path(log_path, index);
        if from.exists() {
            fs::rename(&from, backup_path(log_path, index + 1))?;
        }
    }
    fs::rename(log_path, backup_path(log_path, 1))?;

    Ok(true)
}

/// Sets up the tracing subscriber for stderr and the log file
///
/// Must be called once, before any event is emitted.
pub fn setup_logging(verbose: u8, quiet: bool, logs_dir: &Path, max_bytes: u64) -> std::io::Result<PathBuf> {
    fs::create_dir_all(logs_dir)?;
    let log_path = logs_dir.join(LOG_FILE_NAME);
    let rotated = rotate_if_needed(&log_path, max_bytes, LOG_BACKUPS)?;

    let file = OpenOptions::new().create(true).append(true).open(&log_path)?;

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false);

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false);

    tracing_subscriber::registry()
        .with(level_filter(verbose, quiet))
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if rotated {
        tracing::debug!("Rotated {}", log_path.display());
    }

    Ok(log_path)
}
