//! Integration tests for the listing and download modes
//!
//! Every mode runs through `run_mode` against a wiremock server standing in
//! for the documentation site.

use pydocs_scraper::config::Config;
use pydocs_scraper::crawler::HttpFetcher;
use pydocs_scraper::output::{control_output, OutputMode};
use pydocs_scraper::{run_mode, Mode, ScraperError};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a config pointing both sites at the mock server
fn create_test_config(base_url: &str, work_dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.urls.docs_url = format!("{}/3/", base_url);
    config.urls.pep_url = format!("{}/peps/", base_url);
    config.output.results_dir = work_dir.path().join("results").display().to_string();
    config.output.downloads_dir = work_dir.path().join("downloads").display().to_string();
    config
}

async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body.to_string())
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

fn fetcher(config: &Config) -> HttpFetcher {
    HttpFetcher::new(&config.http).expect("Failed to build fetcher")
}

#[tokio::test]
async fn test_whats_new_mode() {
    let server = MockServer::start().await;
    let work_dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), &work_dir);

    mount_page(
        &server,
        "/3/whatsnew/",
        r#"<html><body><section id="what-s-new-in-python"><div class="toctree-wrapper">
           <ul><li class="toctree-l1"><a href="3.13.html">What's New In Python 3.13</a></li>
           <li class="toctree-l1"><a href="broken.html">Broken</a></li></ul>
           </div></section></body></html>"#,
    )
    .await;
    mount_page(
        &server,
        "/3/whatsnew/3.13.html",
        "<html><body><h1>What's New In Python 3.13</h1>\
         <dl><dt>Editors</dt>\n<dd>Adam Turner and Thomas Wouters</dd></dl></body></html>",
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/3/whatsnew/broken.html"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let rows = run_mode(Mode::WhatsNew, &fetcher(&config), &config)
        .await
        .expect("Mode failed")
        .expect("Mode should produce rows");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1][0], format!("{}/3/whatsnew/3.13.html", server.uri()));
    assert_eq!(rows[1][1], "What's New In Python 3.13");
    assert_eq!(rows[1][2], "Editors Adam Turner and Thomas Wouters");
}

#[tokio::test]
async fn test_latest_versions_mode() {
    let server = MockServer::start().await;
    let work_dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), &work_dir);

    mount_page(
        &server,
        "/3/",
        r#"<html><body><div class="sphinxsidebarwrapper">
           <ul><li><a href="/3.14/">Python 3.14 (in development)</a></li>
               <li><a href="/3.12/">Python 3.12 (security-fixes)</a></li>
               <li><a href="https://www.python.org/doc/versions/">All versions</a></li></ul>
           </div></body></html>"#,
    )
    .await;

    let rows = run_mode(Mode::LatestVersions, &fetcher(&config), &config)
        .await
        .expect("Mode failed")
        .expect("Mode should produce rows");

    assert_eq!(rows[0], vec!["Documentation link", "Version", "Status"]);
    assert_eq!(rows[1][0], format!("{}/3.14/", server.uri()));
    assert_eq!(rows[1][1], "3.14");
    assert_eq!(rows[2][2], "security-fixes");
    assert_eq!(rows.len(), 4);
}

#[tokio::test]
async fn test_latest_versions_without_list_is_fatal() {
    let server = MockServer::start().await;
    let work_dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), &work_dir);

    mount_page(
        &server,
        "/3/",
        r#"<div class="sphinxsidebarwrapper"><ul><li>Quick search</li></ul></div>"#,
    )
    .await;

    let err = run_mode(Mode::LatestVersions, &fetcher(&config), &config)
        .await
        .expect_err("Mode should fail");
    assert!(matches!(err, ScraperError::NoVersionsFound(_)));
}

#[tokio::test]
async fn test_download_mode() {
    let server = MockServer::start().await;
    let work_dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), &work_dir);

    mount_page(
        &server,
        "/3/download.html",
        r#"<html><body><div role="main"><table class="docutils">
           <tr><td><a href="archives/python-docs-pdf-a4.zip">Download</a></td></tr>
           </table></div></body></html>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/3/archives/python-docs-pdf-a4.zip"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(vec![0x50, 0x4b, 0x03, 0x04])
                .insert_header("content-type", "application/zip"),
        )
        .mount(&server)
        .await;

    let rows = run_mode(Mode::Download, &fetcher(&config), &config)
        .await
        .expect("Mode failed");

    assert!(rows.is_none());
    let archive = work_dir.path().join("downloads").join("python-docs-pdf-a4.zip");
    assert_eq!(std::fs::read(archive).unwrap(), vec![0x50, 0x4b, 0x03, 0x04]);
}

#[tokio::test]
async fn test_pep_mode_to_csv_file() {
    let server = MockServer::start().await;
    let work_dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), &work_dir);

    mount_page(
        &server,
        "/peps/",
        r#"<section id="numerical-index"><table>
           <tr><th>Type</th><th>PEP</th></tr>
           <tr><td>SF</td><td><a href="pep-0008/">8</a></td></tr>
           </table></section>"#,
    )
    .await;
    mount_page(
        &server,
        "/peps/pep-0008/",
        r#"<section id="pep-content"><dl class="rfc2822 field-list simple">
           <dt>Status<span class="colon">:</span></dt><dd>Final</dd></dl></section>"#,
    )
    .await;

    let rows = run_mode(Mode::Pep, &fetcher(&config), &config)
        .await
        .expect("Mode failed")
        .expect("Mode should produce rows");

    let results_dir = work_dir.path().join("results");
    let written = control_output(&rows, Mode::Pep.as_str(), OutputMode::File, &results_dir)
        .expect("Failed to write results")
        .expect("File output should return a path");

    let content = std::fs::read_to_string(written).unwrap();
    assert_eq!(content, "Status,Count\nFinal,1\nTotal,1\n");
}
