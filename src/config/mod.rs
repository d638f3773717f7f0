//! Configuration module for the scraper
//!
//! The scraper runs without any configuration file; an optional TOML file
//! can override the site URLs, HTTP client settings, the response cache and
//! the output directories.
//!
//! # Example
//!
//! ```no_run
//! use pydocs_scraper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scraper.toml")).unwrap();
//! println!("PEP index: {}", config.urls.pep_url);
//! ```

mod parser;
mod types;
mod validation;

pub use types::{CacheConfig, Config, HttpConfig, OutputConfig, UrlsConfig};

pub use parser::{fingerprint, load_config, load_or_default, parse_config};
