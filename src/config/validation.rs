use crate::config::types::{CacheConfig, Config, HttpConfig, OutputConfig, UrlsConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_urls_config(&config.urls)?;
    validate_http_config(&config.http)?;
    validate_cache_config(&config.cache)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the site root URLs
fn validate_urls_config(config: &UrlsConfig) -> Result<(), ConfigError> {
    validate_site_url("docs-url", &config.docs_url)?;
    validate_site_url("pep-url", &config.pep_url)?;
    Ok(())
}

/// A site root must be an absolute http(s) URL ending in '/', so that
/// relative joins land underneath it
fn validate_site_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            field, value
        )));
    }

    if !url.path().ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "{} '{}' must end with '/'",
            field, value
        )));
    }

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if encoding_rs::Encoding::for_label(config.encoding.as_bytes()).is_none() {
        return Err(ConfigError::Validation(format!(
            "Unknown encoding label '{}'",
            config.encoding
        )));
    }

    Ok(())
}

/// Validates response cache configuration
fn validate_cache_config(config: &CacheConfig) -> Result<(), ConfigError> {
    if config.path.is_empty() {
        return Err(ConfigError::Validation(
            "cache path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    for (field, value) in [
        ("results-dir", &config.results_dir),
        ("downloads-dir", &config.downloads_dir),
        ("logs-dir", &config.logs_dir),
    ] {
        if value.is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", field)));
        }
    }

    Ok(())
}
