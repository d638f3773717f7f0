//! In-memory fetcher for unit tests

use crate::crawler::{Page, PageFetcher};
use crate::{Result, ScraperError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use url::Url;

/// Serves fixed bodies by URL; unknown URLs fail like a refused connection
#[derive(Default)]
pub struct MemoryFetcher {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    /// URLs requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn lookup(&self, url: &Url) -> Result<&String> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }
        self.pages
            .get(url.as_str())
            .ok_or_else(|| ScraperError::fetch(url.as_str(), "Connection refused"))
    }
}

#[async_trait]
impl PageFetcher for MemoryFetcher {
    async fn fetch_page(&self, url: &Url) -> Result<Page> {
        let body = self.lookup(url)?;
        Ok(Page {
            url: url.clone(),
            body: body.clone(),
        })
    }

    async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>> {
        Ok(self.lookup(url)?.as_bytes().to_vec())
    }
}
