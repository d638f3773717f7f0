use serde::Deserialize;

/// Main configuration structure for the scraper
///
/// Every section is optional in the TOML file; missing values fall back to
/// the defaults below, which point at the live Python documentation sites.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub urls: UrlsConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Root URLs of the scraped sites
#[derive(Debug, Clone, Deserialize)]
pub struct UrlsConfig {
    /// Root of the Python documentation
    #[serde(rename = "docs-url", default = "default_docs_url")]
    pub docs_url: String,

    /// Root of the PEP index
    #[serde(rename = "pep-url", default = "default_pep_url")]
    pub pep_url: String,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Whole-request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Encoding label used to decode every response body, whatever the
    /// server declares
    #[serde(default = "default_encoding")]
    pub encoding: String,
}

/// Response cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Path to the SQLite cache database
    #[serde(default = "default_cache_path")]
    pub path: String,

    /// Entries older than this are refetched; `None` keeps them forever
    #[serde(rename = "expire-after-secs", default)]
    pub expire_after_secs: Option<u64>,
}

/// Output locations
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving CSV reports
    #[serde(rename = "results-dir", default = "default_results_dir")]
    pub results_dir: String,

    /// Directory receiving downloaded archives
    #[serde(rename = "downloads-dir", default = "default_downloads_dir")]
    pub downloads_dir: String,

    /// Directory receiving the log file
    #[serde(rename = "logs-dir", default = "default_logs_dir")]
    pub logs_dir: String,

    /// Size at which the log file is rotated on start-up
    #[serde(rename = "max-log-bytes", default = "default_max_log_bytes")]
    pub max_log_bytes: u64,
}

fn default_docs_url() -> String {
    "https://docs.python.org/3/".to_string()
}

fn default_pep_url() -> String {
    "https://peps.python.org/".to_string()
}

fn default_user_agent() -> String {
    format!("pydocs-scraper/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_encoding() -> String {
    "utf-8".to_string()
}

fn default_cache_path() -> String {
    "http_cache.sqlite".to_string()
}

fn default_results_dir() -> String {
    "results".to_string()
}

fn default_downloads_dir() -> String {
    "downloads".to_string()
}

fn default_logs_dir() -> String {
    "logs".to_string()
}

fn default_max_log_bytes() -> u64 {
    1_000_000
}

impl Default for UrlsConfig {
    fn default() -> Self {
        Self {
            docs_url: default_docs_url(),
            pep_url: default_pep_url(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            encoding: default_encoding(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: default_cache_path(),
            expire_after_secs: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
            downloads_dir: default_downloads_dir(),
            logs_dir: default_logs_dir(),
            max_log_bytes: default_max_log_bytes(),
        }
    }
}
