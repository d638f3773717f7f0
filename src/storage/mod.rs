//! Storage module for the HTTP response cache
//!
//! Fetched pages are kept in a SQLite database between runs so repeated
//! scrapes do not hit the documentation servers again. The cache can be
//! emptied before a run with `--clear-cache`.

mod schema;
mod sqlite;
mod traits;

pub use sqlite::{url_key, SqliteCache};
pub use traits::{CacheError, CacheResult, CachedResponse, ResponseCache};

use std::path::Path;

/// Opens the cache database, optionally emptying it first
///
/// # Arguments
///
/// * `path` - Path to the SQLite cache file
/// * `clear` - Whether to remove all cached responses before returning
pub fn open_cache(path: &Path, clear: bool) -> CacheResult<SqliteCache> {
    let mut cache = SqliteCache::open(path)?;
    if clear {
        let removed = cache.clear()?;
        tracing::info!("Cache cleared ({} entries removed)", removed);
    }
    Ok(cache)
}
