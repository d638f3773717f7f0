//! SQLite response cache
//!
//! Entries are keyed by the SHA-256 of the request URL.

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{CacheError, CacheResult, CachedResponse, ResponseCache};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use sha2::{Digest, Sha256};
use std::path::Path;

/// SQLite-backed response cache
pub struct SqliteCache {
    conn: Connection,
}

impl SqliteCache {
    /// Opens (or creates) the cache database at `path`
    ///
    /// Missing parent directories are created.
    pub fn open(path: &Path) -> CacheResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
        ",
        )?;
        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory cache
    pub fn in_memory() -> CacheResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }
}

/// Hex-encoded SHA-256 of a URL, used as the primary key
pub fn url_key(url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    hex::encode(hasher.finalize())
}

impl ResponseCache for SqliteCache {
    fn get(&self, url: &str) -> CacheResult<Option<CachedResponse>> {
        let row: Option<(String, String, u16, Vec<u8>, String)> = self
            .conn
            .query_row(
                "SELECT url, final_url, status_code, body, fetched_at
                 FROM responses WHERE url_hash = ?1",
                params![url_key(url)],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?)),
            )
            .optional()?;

        let Some((url, final_url, status_code, body, fetched_at)) = row else {
            return Ok(None);
        };

        let fetched_at = DateTime::parse_from_rfc3339(&fetched_at)
            .map_err(|e| CacheError::Corrupt {
                url: url.clone(),
                message: format!("bad timestamp '{}': {}", fetched_at, e),
            })?
            .with_timezone(&Utc);

        Ok(Some(CachedResponse {
            url,
            final_url,
            status_code,
            body,
            fetched_at,
        }))
    }

    fn put(&mut self, response: &CachedResponse) -> CacheResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO responses
             (url_hash, url, final_url, status_code, body, fetched_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                url_key(&response.url),
                response.url,
                response.final_url,
                response.status_code,
                response.body,
                response.fetched_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn clear(&mut self) -> CacheResult<usize> {
        let removed = self.conn.execute("DELETE FROM responses", [])?;
        Ok(removed)
    }

    fn len(&self) -> CacheResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM responses", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
