//! PEP status reconciliation
//!
//! Walks the numerical index on the PEP site, opens every PEP page, reads
//! its `Status` field and counts how often each status occurs. While doing
//! so it compares the page's status against the status letter on the index
//! row and collects every disagreement.
//!
//! Failure policy:
//!
//! | Phase | Failure | Effect |
//! |-------|---------|--------|
//! | Index page | fetch failure, missing `#numerical-index` | run aborts |
//! | PEP page | fetch failure, missing metadata, missing `Status` | row skipped |
//! | Cross-check | unknown status letter | cross-check skipped, row still counted |

use crate::crawler::{find_all, find_tag, resolve_href, text_of, Page, PageFetcher};
use crate::modes::status::lookup;
use crate::progress;
use crate::{ReportRow, Result, ScraperError};
use scraper::ElementRef;
use std::fmt;
use url::Url;

/// One data row of the numerical index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRow {
    /// Link to the PEP page, absolute
    pub link: Url,

    /// Raw text of the first cell: type letter, then optional status letter
    pub status_cell: String,
}

impl IndexRow {
    /// Status letter of the row, if the cell carries one
    ///
    /// A one-character cell only holds the PEP type and has no status letter.
    pub fn status_code(&self) -> Option<char> {
        let mut chars = self.status_cell.chars();
        chars.next()?;
        chars.next()
    }
}

/// A PEP whose page status disagrees with its index row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// The PEP page
    pub link: Url,

    /// Status printed on the PEP page
    pub observed: String,

    /// Labels the index row's letter allows
    pub expected: Vec<&'static str>,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: status on page '{}', expected one of [{}]",
            self.link,
            self.observed,
            self.expected.join(", ")
        )
    }
}

/// A row that could not be processed
#[derive(Debug, Clone)]
pub struct SkippedItem {
    pub link: Url,
    pub reason: String,
}

/// Status counts in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    counts: Vec<(String, usize)>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one occurrence of `status`
    pub fn add(&mut self, status: &str) {
        match self.counts.iter_mut().find(|(s, _)| s == status) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((status.to_string(), 1)),
        }
    }

    /// Occurrences of `status`
    pub fn get(&self, status: &str) -> usize {
        self.counts
            .iter()
            .find(|(s, _)| s == status)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(s, c)| (s.as_str(), *c))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Everything one reconciliation run produces
#[derive(Debug, Clone)]
pub struct PepReport {
    /// Header, one row per status, then the total
    pub rows: Vec<ReportRow>,

    /// Status counts behind `rows`
    pub tally: Tally,

    /// Disagreements between index and PEP pages
    pub mismatches: Vec<Mismatch>,

    /// Rows dropped by a recoverable failure
    pub skipped: Vec<SkippedItem>,
}

/// Extracts the data rows of `section#numerical-index`
///
/// The header row is skipped, as are rows without a link.
pub fn parse_index(page: &Page) -> Result<Vec<IndexRow>> {
    let document = page.document();
    let section = find_tag(
        document.root_element(),
        "section",
        &[("id", "numerical-index")],
    )?;

    let mut rows = Vec::new();
    for tr in find_all(section, "tr").into_iter().skip(1) {
        let link = match find_tag(tr, "a", &[]).and_then(|a| resolve_href(a, &page.url)) {
            Ok(link) => link,
            Err(e) => {
                tracing::warn!("Index row without a usable link: {}", e);
                continue;
            }
        };
        let status_cell = find_tag(tr, "td", &[])
            .map(|td| text_of(td).trim().to_string())
            .unwrap_or_default();

        rows.push(IndexRow { link, status_cell });
    }

    Ok(rows)
}

/// Extracts the `Status` value from a PEP page's metadata block
pub fn parse_detail_status(page: &Page) -> Result<String> {
    let document = page.document();
    let content = find_tag(
        document.root_element(),
        "section",
        &[("id", "pep-content")],
    )?;
    let fields = find_tag(content, "dl", &[("class", "rfc2822 field-list")])?;

    fields
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "dt")
        .find(|dt| text_of(*dt).trim().trim_end_matches(':').trim() == "Status")
        .and_then(|dt| {
            dt.next_siblings()
                .filter_map(ElementRef::wrap)
                .find(|el| el.value().name() == "dd")
        })
        .map(|dd| text_of(dd).trim().to_string())
        .filter(|status| !status.is_empty())
        .ok_or_else(|| ScraperError::not_found("dt", "Status"))
}

/// Compares a PEP page's status with its index row
///
/// # Returns
///
/// * `Ok(None)` - The row has no status letter, or the letters agree
/// * `Ok(Some(Mismatch))` - The page status starts with a different letter
/// * `Err(ScraperError::LookupFailure)` - The row's letter is not a known status
pub fn cross_check(row: &IndexRow, observed: &str) -> Result<Option<Mismatch>> {
    let Some(code) = row.status_code() else {
        return Ok(None);
    };
    let expected = lookup(code)?;

    if observed.chars().next() == Some(code) {
        return Ok(None);
    }

    Ok(Some(Mismatch {
        link: row.link.clone(),
        observed: observed.to_string(),
        expected: expected.to_vec(),
    }))
}

/// Fetches one PEP page and reads its status
async fn fetch_status(fetcher: &dyn PageFetcher, row: &IndexRow) -> Result<String> {
    let page = fetcher.fetch_page(&row.link).await?;
    parse_detail_status(&page)
}

/// Runs the reconciliation against the index at `index_url`
///
/// PEP pages are fetched one at a time in index order.
pub async fn run(fetcher: &dyn PageFetcher, index_url: &Url) -> Result<PepReport> {
    let index_page = fetcher.fetch_page(index_url).await?;
    let rows = parse_index(&index_page)?;
    tracing::info!("Found {} PEPs in the numerical index", rows.len());

    let mut tally = Tally::new();
    let mut mismatches = Vec::new();
    let mut skipped = Vec::new();

    let bar = progress::item_bar(rows.len() as u64, "Processing PEPs");
    for row in &rows {
        match fetch_status(fetcher, row).await {
            Ok(status) => {
                match cross_check(row, &status) {
                    Ok(Some(mismatch)) => mismatches.push(mismatch),
                    Ok(None) => {}
                    Err(e) => {
                        tracing::warn!("Cross-check skipped for {}: {}", row.link, e);
                    }
                }
                tally.add(&status);
            }
            Err(e) => {
                tracing::error!("Skipping {}: {}", row.link, e);
                skipped.push(SkippedItem {
                    link: row.link.clone(),
                    reason: e.to_string(),
                });
            }
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    if !mismatches.is_empty() {
        let lines: Vec<String> = mismatches.iter().map(|m| m.to_string()).collect();
        tracing::warn!(
            "{} mismatched statuses:\n{}",
            mismatches.len(),
            lines.join("\n")
        );
    }
    if !skipped.is_empty() {
        tracing::info!("{} PEPs skipped after errors", skipped.len());
    }

    Ok(PepReport {
        rows: build_rows(&tally),
        tally,
        mismatches,
        skipped,
    })
}

/// Header, one row per status, then the total
fn build_rows(tally: &Tally) -> Vec<ReportRow> {
    let mut rows = vec![vec!["Status".to_string(), "Count".to_string()]];
    rows.extend(
        tally
            .iter()
            .map(|(status, count)| vec![status.to_string(), count.to_string()]),
    );
    rows.push(vec!["Total".to_string(), tally.total().to_string()]);
    rows
}
