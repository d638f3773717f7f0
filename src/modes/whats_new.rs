//! "What's New" article listing
//!
//! Lists every "What's New in Python X.Y" article linked from the docs'
//! `whatsnew/` index, with its title and the editor/author line.

use crate::crawler::{find_tag, resolve_href, select_all, text_of, Page, PageFetcher};
use crate::progress;
use crate::{ReportRow, Result};
use url::Url;

/// One article found on the index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub link: Url,
    pub title: String,
    pub editors: String,
}

impl Article {
    fn into_row(self) -> ReportRow {
        vec![self.link.to_string(), self.title, self.editors]
    }
}

/// Links to the per-version articles on the `whatsnew/` index
pub fn parse_index(page: &Page) -> Result<Vec<Url>> {
    let document = page.document();
    let items = select_all(
        document.root_element(),
        "#what-s-new-in-python div.toctree-wrapper li.toctree-l1",
    )?;

    let mut links = Vec::new();
    for item in items {
        match find_tag(item, "a", &[]).and_then(|a| resolve_href(a, &page.url)) {
            Ok(link) => links.push(link),
            Err(e) => tracing::warn!("Skipping list item without a link: {}", e),
        }
    }
    Ok(links)
}

/// Title and editor line of one article
pub fn parse_article(page: &Page) -> Result<Article> {
    let document = page.document();
    let root = document.root_element();
    let h1 = find_tag(root, "h1", &[])?;
    let dl = find_tag(root, "dl", &[])?;

    let title = text_of(h1).trim().trim_end_matches('¶').trim().to_string();
    let editors = text_of(dl).replace('\n', " ").trim().to_string();

    Ok(Article {
        link: page.url.clone(),
        title,
        editors,
    })
}

/// Builds the article table
pub async fn run(fetcher: &dyn PageFetcher, docs_url: &Url) -> Result<Vec<ReportRow>> {
    let index_url = docs_url.join("whatsnew/")?;
    let index_page = fetcher.fetch_page(&index_url).await?;
    let links = parse_index(&index_page)?;

    let mut rows = vec![vec![
        "Article link".to_string(),
        "Title".to_string(),
        "Editor, Author".to_string(),
    ]];

    let bar = progress::item_bar(links.len() as u64, "Reading articles");
    for link in &links {
        let article = match fetcher.fetch_page(link).await {
            Ok(page) => parse_article(&page),
            Err(e) => Err(e),
        };
        match article {
            Ok(article) => rows.push(article.into_row()),
            Err(e) => tracing::error!("Skipping {}: {}", link, e),
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    Ok(rows)
}
