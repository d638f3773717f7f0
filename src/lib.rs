//! pydocs-scraper: tables from the Python documentation sites
//!
//! This crate scrapes `docs.python.org` and `peps.python.org` into small
//! report tables: what's-new articles, documentation versions, the PDF
//! archive download, and a PEP status tally cross-checked against the
//! numerical index.

pub mod config;
pub mod crawler;
pub mod logging;
pub mod modes;
pub mod output;
pub mod progress;
pub mod storage;

use thiserror::Error;

/// Main error type for scraper operations
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("No response from {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("Tag not found: {tag} {filter}")]
    StructureNotFound { tag: String, filter: String },

    #[error("Section '{0}' not found in the sidebar")]
    NoVersionsFound(String),

    #[error("Unknown status code '{0}'")]
    LookupFailure(char),

    #[error("Invalid selector '{0}'")]
    Selector(String),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Cache error: {0}")]
    Cache(#[from] storage::CacheError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScraperError {
    /// Builds a `StructureNotFound` from a tag and its attribute filter
    pub fn not_found(tag: &str, filter: impl Into<String>) -> Self {
        Self::StructureNotFound {
            tag: tag.to_string(),
            filter: filter.into(),
        }
    }

    /// Builds a `Fetch` failure for a URL
    pub fn fetch(url: impl Into<String>, message: impl ToString) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.to_string(),
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for scraper operations
pub type Result<T> = std::result::Result<T, ScraperError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// A single display row of a report; the first row of every report is its header
pub type ReportRow = Vec<String>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{HttpFetcher, Page, PageFetcher};
pub use modes::{run_mode, Mode};
pub use output::OutputMode;
