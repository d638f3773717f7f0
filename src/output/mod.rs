//! Output module for rendering report rows
//!
//! This module handles:
//! - Plain console lines (the default)
//! - An aligned table (`--output pretty`)
//! - A timestamped CSV file under the results directory (`--output file`)

mod console;
mod csv_file;
mod table;

pub use console::{format_plain, print_plain};
pub use csv_file::{result_file_name, write_csv, DATETIME_FORMAT};
pub use table::{format_table, print_table};

use crate::{ReportRow, Result};
use chrono::Local;
use clap::ValueEnum;
use std::path::{Path, PathBuf};

/// Where report rows go
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Space-separated lines on stdout
    #[default]
    #[value(skip)]
    Console,
    /// Aligned table on stdout
    Pretty,
    /// CSV file in the results directory
    File,
}

/// Renders rows in the selected output mode
///
/// # Returns
///
/// * `Ok(Some(path))` - Rows were written to a CSV file
/// * `Ok(None)` - Rows were printed
pub fn control_output(
    rows: &[ReportRow],
    mode_name: &str,
    output: OutputMode,
    results_dir: &Path,
) -> Result<Option<PathBuf>> {
    match output {
        OutputMode::Console => {
            print_plain(rows);
            Ok(None)
        }
        OutputMode::Pretty => {
            print_table(rows);
            Ok(None)
        }
        OutputMode::File => {
            let path = write_csv(rows, results_dir, mode_name, Local::now().naive_local())?;
            tracing::info!("Results saved to {}", path.display());
            Ok(Some(path))
        }
    }
}
