use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Loads the configuration file if one was given, otherwise the defaults
///
/// Returns the config together with a SHA-256 fingerprint of its source
/// text (the empty string when running on defaults).
pub fn load_or_default(path: Option<&Path>) -> Result<(Config, String), ConfigError> {
    match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            let config = parse_config(&content)?;
            Ok((config, fingerprint(&content)))
        }
        None => {
            let config = Config::default();
            validate(&config)?;
            Ok((config, fingerprint("")))
        }
    }
}

/// Hex-encoded SHA-256 of the configuration text
pub fn fingerprint(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}
