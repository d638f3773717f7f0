//! Page fetching and document querying
//!
//! This module contains the two collaborators every scraping mode uses:
//! - HTTP fetching through a cached reqwest client
//! - Tag and selector lookup on parsed HTML, failing loudly when the
//!   expected structure is missing

mod fetcher;
mod query;

pub use fetcher::{build_http_client, HttpFetcher, Page, PageFetcher};
pub use query::{find_all, find_tag, resolve_href, select_all, select_one, text_of};

#[cfg(test)]
pub(crate) mod memory;
