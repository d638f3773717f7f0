//! CSV result files
//!
//! One file per run, named `<mode>_<YYYY-MM-DD_HH-MM-SS>.csv`, UTF-8,
//! header first.

use crate::{ReportRow, Result};
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

/// Timestamp format used in result file names
pub const DATETIME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// File name for a run of `mode` at `now`
pub fn result_file_name(mode: &str, now: NaiveDateTime) -> String {
    format!("{}_{}.csv", mode, now.format(DATETIME_FORMAT))
}

/// Writes rows as CSV into `results_dir`
///
/// # Returns
///
/// The path of the written file
pub fn write_csv(rows: &[ReportRow], results_dir: &Path, mode: &str, now: NaiveDateTime) -> Result<PathBuf> {
    std::fs::create_dir_all(results_dir)?;
    let path = results_dir.join(result_file_name(mode, now));

    let mut writer = csv::WriterBuilder::new().flexible(true).from_path(&path)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;

    Ok(path)
}
