//! Documentation versions from the docs sidebar
//!
//! The sidebar of the docs landing page carries an "All versions" list;
//! each entry reads like `Python 3.13 (stable)`.

use crate::crawler::{find_all, find_tag, resolve_href, text_of, Page, PageFetcher};
use crate::{ReportRow, Result, ScraperError};
use regex::Regex;

/// Marker text of the sidebar list holding the versions
pub const ALL_VERSIONS: &str = "All versions";

const VERSION_PATTERN: &str = r"Python (?P<version>\d\.\d+) \((?P<status>.*)\)";

/// Splits a sidebar entry into version and status
///
/// Entries that do not follow the `Python X.Y (status)` shape come back
/// whole, with an empty status.
pub fn split_version(pattern: &Regex, text: &str) -> (String, String) {
    match pattern.captures(text) {
        Some(caps) => (caps["version"].to_string(), caps["status"].to_string()),
        None => (text.to_string(), String::new()),
    }
}

/// Parses the version table out of the docs landing page
pub fn parse_versions(page: &Page) -> Result<Vec<ReportRow>> {
    let pattern = Regex::new(VERSION_PATTERN)?;
    let document = page.document();
    let sidebar = find_tag(
        document.root_element(),
        "div",
        &[("class", "sphinxsidebarwrapper")],
    )?;

    let list = find_all(sidebar, "ul")
        .into_iter()
        .find(|ul| text_of(*ul).contains(ALL_VERSIONS))
        .ok_or_else(|| ScraperError::NoVersionsFound(ALL_VERSIONS.to_string()))?;

    let mut rows = vec![vec![
        "Documentation link".to_string(),
        "Version".to_string(),
        "Status".to_string(),
    ]];
    for a in find_all(list, "a") {
        let link = match resolve_href(a, &page.url) {
            Ok(link) => link.to_string(),
            Err(e) => {
                tracing::warn!("Skipping version entry: {}", e);
                continue;
            }
        };
        let (version, status) = split_version(&pattern, text_of(a).trim());
        rows.push(vec![link, version, status]);
    }

    Ok(rows)
}

/// Builds the version table
pub async fn run(fetcher: &dyn PageFetcher, docs_url: &url::Url) -> Result<Vec<ReportRow>> {
    let page = fetcher.fetch_page(docs_url).await?;
    parse_versions(&page)
}
