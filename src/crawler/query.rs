//! Document query helpers
//!
//! Thin wrappers over `scraper` that turn "no match" into a
//! `StructureNotFound` error naming the tag and filter that failed, so a
//! missing section can be reproduced from the log line alone.

use crate::{Result, ScraperError};
use scraper::{ElementRef, Selector};
use url::Url;

/// Finds the first descendant of `root` with tag `tag` whose attributes
/// satisfy `attrs`
///
/// A `class` filter matches when every listed class is present on the
/// element; any other attribute must match exactly.
///
/// # Example
///
/// ```no_run
/// use pydocs_scraper::crawler::find_tag;
/// use scraper::Html;
///
/// let html = Html::parse_document(r#"<section id="a"><p>x</p></section>"#);
/// let section = find_tag(html.root_element(), "section", &[("id", "a")]).unwrap();
/// ```
pub fn find_tag<'a>(root: ElementRef<'a>, tag: &str, attrs: &[(&str, &str)]) -> Result<ElementRef<'a>> {
    root.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|element| element.value().name() == tag && matches_attrs(*element, attrs))
        .ok_or_else(|| ScraperError::not_found(tag, format_filter(attrs)))
}

/// Finds every descendant with tag `tag`
pub fn find_all<'a>(root: ElementRef<'a>, tag: &str) -> Vec<ElementRef<'a>> {
    root.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(|element| element.value().name() == tag)
        .collect()
}

/// Returns the first element matching a CSS selector
pub fn select_one<'a>(root: ElementRef<'a>, css: &str) -> Result<ElementRef<'a>> {
    let selector = parse_selector(css)?;
    root.select(&selector)
        .next()
        .ok_or_else(|| ScraperError::not_found(css, ""))
}

/// Returns every element matching a CSS selector
pub fn select_all<'a>(root: ElementRef<'a>, css: &str) -> Result<Vec<ElementRef<'a>>> {
    let selector = parse_selector(css)?;
    Ok(root.select(&selector).collect())
}

/// Concatenated text content of an element
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Resolves the element's `href` against `base`
pub fn resolve_href(element: ElementRef<'_>, base: &Url) -> Result<Url> {
    let href = element
        .value()
        .attr("href")
        .ok_or_else(|| ScraperError::not_found(element.value().name(), "[href]"))?;
    Ok(base.join(href.trim())?)
}

fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScraperError::Selector(format!("{}: {}", css, e)))
}

fn matches_attrs(element: ElementRef<'_>, attrs: &[(&str, &str)]) -> bool {
    let value = element.value();
    attrs.iter().all(|(name, expected)| {
        if *name == "class" {
            expected
                .split_whitespace()
                .all(|class| value.classes().any(|c| c == class))
        } else {
            value.attr(name) == Some(*expected)
        }
    })
}

/// Renders an attribute filter the way it appears in error messages
fn format_filter(attrs: &[(&str, &str)]) -> String {
    attrs
        .iter()
        .map(|(name, value)| format!("[{}=\"{}\"]", name, value))
        .collect()
}
