//! Response cache trait and error types

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur during cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt cache entry for {url}: {message}")]
    Corrupt { url: String, message: String },
}

/// Result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;

/// A response body stored in the cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResponse {
    /// URL the response was requested for
    pub url: String,

    /// URL the response came from after redirects
    pub final_url: String,

    /// HTTP status code
    pub status_code: u16,

    /// Raw body bytes, undecoded
    pub body: Vec<u8>,

    /// When the response was fetched
    pub fetched_at: DateTime<Utc>,
}

impl CachedResponse {
    /// Checks whether the entry is older than `max_age_secs`
    ///
    /// `None` means entries never expire.
    pub fn is_expired(&self, max_age_secs: Option<u64>) -> bool {
        match max_age_secs {
            Some(max_age) => {
                let age = Utc::now() - self.fetched_at;
                age.num_seconds() > max_age as i64
            }
            None => false,
        }
    }
}

/// Trait for response cache backends
///
/// The fetcher consults the cache before every request and stores every
/// successful response afterwards.
pub trait ResponseCache {
    /// Looks up a cached response by request URL
    fn get(&self, url: &str) -> CacheResult<Option<CachedResponse>>;

    /// Stores or replaces the response for its request URL
    fn put(&mut self, response: &CachedResponse) -> CacheResult<()>;

    /// Removes every cached response
    ///
    /// # Returns
    ///
    /// The number of entries removed
    fn clear(&mut self) -> CacheResult<usize>;

    /// Number of cached responses
    fn len(&self) -> CacheResult<usize>;

    /// Whether the cache holds no responses
    fn is_empty(&self) -> CacheResult<bool> {
        Ok(self.len()? == 0)
    }
}
