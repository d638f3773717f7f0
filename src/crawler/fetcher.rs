//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper, including:
//! - Building the HTTP client with the configured user agent and timeout
//! - Consulting and filling the SQLite response cache
//! - Decoding bodies with a forced character encoding
//! - Classifying transport and status failures as fetch failures

use crate::config::HttpConfig;
use crate::storage::{CachedResponse, ResponseCache, SqliteCache};
use crate::{Result, ScraperError};
use async_trait::async_trait;
use chrono::Utc;
use encoding_rs::{Encoding, UTF_8};
use reqwest::Client;
use scraper::Html;
use std::sync::Mutex;
use std::time::Duration;
use url::Url;

/// A fetched and decoded HTML page
#[derive(Debug, Clone)]
pub struct Page {
    /// Final URL after redirects; relative links resolve against it
    pub url: Url,

    /// Decoded body
    pub body: String,
}

impl Page {
    /// Parses the body into a document
    ///
    /// `Html` is not `Send`; parse it only after the last await that
    /// needs it.
    pub fn document(&self) -> Html {
        Html::parse_document(&self.body)
    }
}

/// The page-fetching capability the pipelines depend on
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches a URL and decodes its body as text
    async fn fetch_page(&self, url: &Url) -> Result<Page>;

    /// Fetches a URL and returns the raw body bytes
    async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The HTTP configuration
///
/// # Example
///
/// ```no_run
/// use pydocs_scraper::config::HttpConfig;
/// use pydocs_scraper::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.timeout_secs.min(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetcher backed by reqwest and an optional response cache
pub struct HttpFetcher {
    client: Client,
    cache: Option<Mutex<SqliteCache>>,
    expire_after_secs: Option<u64>,
    encoding: &'static Encoding,
}

impl HttpFetcher {
    /// Creates a fetcher without a cache
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = build_http_client(config)
            .map_err(|e| ScraperError::fetch("<client>", format!("failed to build client: {}", e)))?;

        // Labels are checked during config validation
        let encoding = Encoding::for_label(config.encoding.as_bytes()).unwrap_or(UTF_8);

        Ok(Self {
            client,
            cache: None,
            expire_after_secs: None,
            encoding,
        })
    }

    /// Attaches a response cache
    pub fn with_cache(mut self, cache: SqliteCache, expire_after_secs: Option<u64>) -> Self {
        self.cache = Some(Mutex::new(cache));
        self.expire_after_secs = expire_after_secs;
        self
    }

    /// Looks the URL up in the cache; cache problems count as misses
    fn cached(&self, url: &str) -> Option<CachedResponse> {
        let cache = self.cache.as_ref()?;
        let guard = cache.lock().ok()?;
        match guard.get(url) {
            Ok(Some(entry)) if !entry.is_expired(self.expire_after_secs) => {
                tracing::debug!("Cache hit: {}", url);
                Some(entry)
            }
            Ok(_) => None,
            Err(e) => {
                tracing::warn!("Cache lookup failed for {}: {}", url, e);
                None
            }
        }
    }

    fn store(&self, response: &CachedResponse) {
        let Some(cache) = self.cache.as_ref() else {
            return;
        };
        match cache.lock() {
            Ok(mut guard) => {
                if let Err(e) = guard.put(response) {
                    tracing::warn!("Failed to cache {}: {}", response.url, e);
                }
            }
            Err(_) => tracing::warn!("Cache lock poisoned, not caching {}", response.url),
        }
    }

    /// Fetches a URL through the cache
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | Fresh cache entry | Cached body, no request |
    /// | HTTP 2xx | Body, stored in cache |
    /// | Other HTTP status | `Fetch` failure |
    /// | Timeout / connection error | `Fetch` failure |
    async fn fetch_raw(&self, url: &Url) -> Result<CachedResponse> {
        if let Some(entry) = self.cached(url.as_str()) {
            return Ok(entry);
        }

        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ScraperError::fetch(url.as_str(), classify_error(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::fetch(
                url.as_str(),
                format!("HTTP {}", status.as_u16()),
            ));
        }

        let final_url = response.url().to_string();
        let body = response
            .bytes()
            .await
            .map_err(|e| ScraperError::fetch(url.as_str(), classify_error(&e)))?;

        let entry = CachedResponse {
            url: url.to_string(),
            final_url,
            status_code: status.as_u16(),
            body: body.to_vec(),
            fetched_at: Utc::now(),
        };
        self.store(&entry);

        Ok(entry)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, url: &Url) -> Result<Page> {
        let entry = self.fetch_raw(url).await?;
        let (body, _, had_errors) = self.encoding.decode(&entry.body);
        if had_errors {
            tracing::debug!("Malformed {} in {}", self.encoding.name(), url);
        }

        let final_url = Url::parse(&entry.final_url).unwrap_or_else(|_| url.clone());

        Ok(Page {
            url: final_url,
            body: body.into_owned(),
        })
    }

    async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>> {
        Ok(self.fetch_raw(url).await?.body)
    }
}

/// Turns a reqwest error into a short description
fn classify_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        format!("Connection error: {}", e)
    } else {
        e.to_string()
    }
}
