//! Integration tests for the PEP status reconciliation
//!
//! These tests use wiremock to serve a small PEP index and PEP pages and
//! run the pipeline through the real HTTP fetcher.

use pydocs_scraper::config::HttpConfig;
use pydocs_scraper::crawler::HttpFetcher;
use pydocs_scraper::modes::pep;
use pydocs_scraper::storage::{open_cache, ResponseCache, SqliteCache};
use pydocs_scraper::ScraperError;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn index_html(rows: &[(&str, &str)]) -> String {
    let body: String = rows
        .iter()
        .map(|(cell, href)| {
            format!(
                r#"<tr><td><abbr title="x">{}</abbr></td><td><a href="{}">0</a></td><td>Title</td></tr>"#,
                cell, href
            )
        })
        .collect();
    format!(
        r#"<html><body><section id="numerical-index"><h2>Numerical Index</h2>
           <table><thead><tr><th>Type</th><th>PEP</th><th>Title</th></tr></thead>
           <tbody>{}</tbody></table></section></body></html>"#,
        body
    )
}

fn detail_html(status: &str) -> String {
    format!(
        r#"<html><body><article><section id="pep-content">
           <dl class="rfc2822 field-list simple">
             <dt class="field-odd">Author<span class="colon">:</span></dt>
             <dd class="field-odd">A. Author</dd>
             <dt class="field-even">Status<span class="colon">:</span></dt>
             <dd class="field-even"><abbr title="">{}</abbr></dd>
           </dl></section></article></body></html>"#,
        status
    )
}

async fn mount_html(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

fn fetcher() -> HttpFetcher {
    HttpFetcher::new(&HttpConfig::default()).expect("Failed to build fetcher")
}

fn index_url(server: &MockServer) -> Url {
    Url::parse(&format!("{}/", server.uri())).expect("Failed to parse server URL")
}

#[tokio::test]
async fn test_scenario_active_deferred_single_char() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/",
        index_html(&[("PA", "pep-0001/"), ("SD", "pep-0002/"), ("X", "pep-0003/")]),
    )
    .await;
    mount_html(&server, "/pep-0001/", detail_html("Active")).await;
    mount_html(&server, "/pep-0002/", detail_html("Rejected")).await;
    mount_html(&server, "/pep-0003/", detail_html("Whatever")).await;

    let report = pep::run(&fetcher(), &index_url(&server))
        .await
        .expect("Run failed");

    assert_eq!(report.mismatches.len(), 1);
    let mismatch = &report.mismatches[0];
    assert!(mismatch.link.as_str().ends_with("/pep-0002/"));
    assert_eq!(mismatch.observed, "Rejected");
    assert_eq!(mismatch.expected, vec!["Deferred"]);

    assert_eq!(report.tally.get("Active"), 1);
    assert_eq!(report.tally.get("Rejected"), 1);
    assert_eq!(report.tally.get("Whatever"), 1);
    assert_eq!(report.rows.first().unwrap(), &vec!["Status".to_string(), "Count".to_string()]);
    assert_eq!(report.rows.last().unwrap(), &vec!["Total".to_string(), "3".to_string()]);
}

#[tokio::test]
async fn test_one_failed_detail_of_five() {
    let server = MockServer::start().await;
    let cells: Vec<(&str, &str)> = vec![
        ("SF", "pep-0001/"),
        ("SF", "pep-0002/"),
        ("PA", "pep-0003/"),
        ("SF", "pep-0004/"),
        ("IW", "pep-0005/"),
    ];
    mount_html(&server, "/", index_html(&cells)).await;
    mount_html(&server, "/pep-0001/", detail_html("Final")).await;
    mount_html(&server, "/pep-0002/", detail_html("Final")).await;
    mount_html(&server, "/pep-0004/", detail_html("Final")).await;
    mount_html(&server, "/pep-0005/", detail_html("Withdrawn")).await;

    Mock::given(method("GET"))
        .and(path("/pep-0003/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let report = pep::run(&fetcher(), &index_url(&server))
        .await
        .expect("Run should survive a failed PEP page");

    assert_eq!(report.tally.total(), 4);
    assert_eq!(report.skipped.len(), 1);
    assert!(report.skipped[0].link.as_str().ends_with("/pep-0003/"));
    assert!(report.mismatches.is_empty());
    assert_eq!(report.rows.last().unwrap(), &vec!["Total".to_string(), "4".to_string()]);
}

#[tokio::test]
async fn test_missing_index_structure_aborts() {
    let server = MockServer::start().await;
    mount_html(&server, "/", "<html><body><p>Maintenance</p></body></html>".to_string()).await;

    Mock::given(method("GET"))
        .and(path("/pep-0001/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(detail_html("Final")))
        .expect(0)
        .mount(&server)
        .await;

    let err = pep::run(&fetcher(), &index_url(&server))
        .await
        .expect_err("Run should abort");

    match err {
        ScraperError::StructureNotFound { tag, filter } => {
            assert_eq!(tag, "section");
            assert!(filter.contains("numerical-index"));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_index_server_error_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = pep::run(&fetcher(), &index_url(&server))
        .await
        .expect_err("Run should abort");
    assert!(matches!(err, ScraperError::Fetch { .. }));
}

#[tokio::test]
async fn test_second_run_served_from_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(index_html(&[("SF", "pep-0008/")])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pep-0008/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(detail_html("Final")))
        .expect(1)
        .mount(&server)
        .await;

    let cache = SqliteCache::in_memory().expect("Failed to open cache");
    let fetcher = fetcher().with_cache(cache, None);

    let first = pep::run(&fetcher, &index_url(&server)).await.expect("First run failed");
    let second = pep::run(&fetcher, &index_url(&server)).await.expect("Second run failed");

    assert_eq!(first.tally, second.tally);
    assert_eq!(first.rows, second.rows);
    // `expect(1)` on both mocks is verified when the server drops
}

#[tokio::test]
async fn test_cleared_cache_refetches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(index_html(&[])))
        .expect(2)
        .mount(&server)
        .await;

    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let cache_path = dir.path().join("http_cache.sqlite");
    let url = index_url(&server);

    let cache = open_cache(&cache_path, false).expect("Failed to open cache");
    let first = fetcher().with_cache(cache, None);
    pep::run(&first, &url).await.expect("First run failed");
    drop(first);

    let cache = open_cache(&cache_path, true).expect("Failed to reopen cache");
    assert!(cache.is_empty().unwrap());
    let second = fetcher().with_cache(cache, None);
    let report = pep::run(&second, &url).await.expect("Second run failed");

    assert_eq!(report.tally.total(), 0);
    assert_eq!(report.rows.len(), 2);
}
