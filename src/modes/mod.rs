//! Scraping modes
//!
//! Each mode is a sequential fetch-and-extract pass over one part of the
//! Python documentation sites:
//! - `whats-new`: release-notes articles with their authors
//! - `latest-versions`: documentation versions and their status
//! - `download`: the A4 PDF archive
//! - `pep`: PEP status tally, cross-checked against the PEP index

pub mod download;
pub mod latest_versions;
pub mod pep;
pub mod status;
pub mod whats_new;

pub use pep::{IndexRow, Mismatch, PepReport, Tally};
pub use status::StatusCode;

use crate::config::Config;
use crate::crawler::PageFetcher;
use crate::{ReportRow, Result};
use clap::ValueEnum;
use std::fmt;
use std::path::Path;
use url::Url;

/// Scraping mode selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    WhatsNew,
    LatestVersions,
    Download,
    Pep,
}

impl Mode {
    /// Name used on the command line and in result file names
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WhatsNew => "whats-new",
            Self::LatestVersions => "latest-versions",
            Self::Download => "download",
            Self::Pep => "pep",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runs one mode to completion
///
/// # Returns
///
/// * `Ok(Some(rows))` - Report rows, header first
/// * `Ok(None)` - The mode produced a file instead of rows (`download`)
/// * `Err(ScraperError)` - A fatal failure; nothing should be written
pub async fn run_mode(
    mode: Mode,
    fetcher: &dyn PageFetcher,
    config: &Config,
) -> Result<Option<Vec<ReportRow>>> {
    let docs_url = Url::parse(&config.urls.docs_url)?;

    match mode {
        Mode::WhatsNew => Ok(Some(whats_new::run(fetcher, &docs_url).await?)),
        Mode::LatestVersions => Ok(Some(latest_versions::run(fetcher, &docs_url).await?)),
        Mode::Download => {
            download::run(fetcher, &docs_url, Path::new(&config.output.downloads_dir)).await?;
            Ok(None)
        }
        Mode::Pep => {
            let pep_url = Url::parse(&config.urls.pep_url)?;
            let report = pep::run(fetcher, &pep_url).await?;
            Ok(Some(report.rows))
        }
    }
}
