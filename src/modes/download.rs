//! PDF archive download
//!
//! Fetches the A4 PDF documentation archive linked from the docs download
//! page and stores it under the downloads directory.

use crate::crawler::{resolve_href, select_one, Page, PageFetcher};
use crate::{Result, ScraperError};
use std::path::{Path, PathBuf};
use url::Url;

const ARCHIVE_SELECTOR: &str = r#"div[role="main"] table.docutils a[href$="pdf-a4.zip"]"#;

/// Link to the A4 PDF archive on the download page
pub fn find_archive_link(page: &Page) -> Result<Url> {
    let document = page.document();
    let a = select_one(document.root_element(), ARCHIVE_SELECTOR)?;
    resolve_href(a, &page.url)
}

/// File name of the archive: the URL's last path segment
pub fn archive_file_name(url: &Url) -> Result<String> {
    url.path_segments()
        .and_then(|segments| segments.last())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ScraperError::not_found("a", format!("[href=\"{}\"] file name", url)))
}

/// Downloads the archive into `downloads_dir`
///
/// # Returns
///
/// The path of the written file
pub async fn run(fetcher: &dyn PageFetcher, docs_url: &Url, downloads_dir: &Path) -> Result<PathBuf> {
    let download_page_url = docs_url.join("download.html")?;
    let page = fetcher.fetch_page(&download_page_url).await?;
    let archive_url = find_archive_link(&page)?;
    let file_name = archive_file_name(&archive_url)?;

    tracing::info!("Downloading {}", archive_url);
    let bytes = fetcher.fetch_bytes(&archive_url).await?;

    std::fs::create_dir_all(downloads_dir)?;
    let archive_path = downloads_dir.join(file_name);
    std::fs::write(&archive_path, &bytes)?;

    tracing::info!(
        "Archive saved to {} ({} bytes)",
        archive_path.display(),
        bytes.len()
    );
    Ok(archive_path)
}
