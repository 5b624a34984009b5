//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the real
//! HTTP fetcher through a full crawl cycle end-to-end.

use linkwalk::config::{Config, CrawlerConfig, UserAgentConfig};
use linkwalk::crawler::{crawl, BrokenLink, FailureReason, TransportError};
use linkwalk::output::{render_text, write_report, CrawlReport};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration crawling from `seed`
fn create_test_config(seed: &str, max_pages: usize) -> Config {
    Config {
        crawler: CrawlerConfig {
            seed: Some(seed.to_string()),
            max_pages,
            allow_external: false,
            request_timeout: 5,
        },
        ..Config::default()
    }
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html")
}

fn entries(report: &CrawlReport) -> Vec<&BrokenLink> {
    report.groups.iter().flat_map(|g| g.entries.iter()).collect()
}

#[tokio::test]
async fn test_full_crawl_reports_not_found() {
    // Start a mock server
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<a href="page1">Page 1</a> <a href="missing">Missing</a>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page1"))
        .respond_with(html("<p>Content 1</p>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&format!("{}/", base_url), 10);
    let report = crawl(&config, None, None).await.expect("Crawl failed");

    assert_eq!(report.pages_crawled, 2);
    assert_eq!(report.pages_unchecked, 0);
    assert_eq!(report.broken_count, 1);

    let broken = entries(&report);
    assert_eq!(broken[0].record.origin, format!("{}/", base_url));
    assert_eq!(broken[0].record.target, format!("{}/missing", base_url));
    assert_eq!(broken[0].record.text, "Missing");
    assert_eq!(broken[0].reason, FailureReason::Http(404));
}

#[tokio::test]
async fn test_redirect_is_terminal_status() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(r#"<a href="old">Old</a>"#))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/new"))
        .mount(&mock_server)
        .await;

    // The redirect target must never be requested
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(html("<p>New</p>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&format!("{}/", base_url), 10);
    let report = crawl(&config, None, None).await.expect("Crawl failed");

    assert_eq!(report.pages_crawled, 1);
    assert_eq!(entries(&report)[0].reason, FailureReason::Http(301));
}

#[tokio::test]
async fn test_error_page_body_not_parsed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(r#"<a href="broken">Broken</a>"#))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(
            ResponseTemplate::new(500).set_body_string(r#"<a href="/hidden">Hidden</a>"#),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/hidden"))
        .respond_with(html("<p>Hidden</p>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&format!("{}/", base_url), 10);
    let report = crawl(&config, None, None).await.expect("Crawl failed");

    assert_eq!(report.broken_count, 1);
    assert_eq!(entries(&report)[0].reason, FailureReason::Http(500));
}

#[tokio::test]
async fn test_base_tag_over_http() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/docs/index.html"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(
                r#"<html><head><base href="/sub/"></head>
                   <body><a href="page2.html">Next</a></body></html>"#,
            ),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/sub/page2.html"))
        .respond_with(html("<p>Page 2</p>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&format!("{}/docs/index.html", base_url), 10);
    let report = crawl(&config, None, None).await.expect("Crawl failed");

    assert_eq!(report.pages_crawled, 2);
    assert_eq!(report.broken_count, 0);
}

#[tokio::test]
async fn test_user_agent_header_sent() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Only requests carrying the configured identity get a page; anything
    // else falls through to wiremock's 404
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "linkwalk-test/2.0"))
        .respond_with(html("<p>Hello</p>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&format!("{}/", base_url), 10);
    config.user_agent = UserAgentConfig {
        crawler_name: "linkwalk-test".to_string(),
        crawler_version: "2.0".to_string(),
    };

    let report = crawl(&config, None, None).await.expect("Crawl failed");
    assert_eq!(report.pages_crawled, 1);
    assert_eq!(report.broken_count, 0);
}

#[tokio::test]
async fn test_max_pages_limit() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let links: String = (1..=5)
        .map(|i| format!(r#"<a href="p{}">P{}</a>"#, i, i))
        .collect();
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(&links))
        .mount(&mock_server)
        .await;

    for i in 1..=5 {
        Mock::given(method("GET"))
            .and(path(format!("/p{}", i)))
            .respond_with(html("<p>leaf</p>"))
            .mount(&mock_server)
            .await;
    }

    let config = create_test_config(&format!("{}/", base_url), 2);
    let report = crawl(&config, None, None).await.expect("Crawl failed");

    assert_eq!(report.pages_crawled, 2);
    assert_eq!(report.pages_unchecked, 6 - 2);

    let requests = mock_server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn test_external_and_skipped_links_not_fetched() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r##"<a href="https://external.invalid/page">External</a>
                <a href="mailto:webmaster@example.com">Mail</a>
                <a href="#top">Top</a>
                <a href="javascript:void(0)">Script</a>
                <a href="manual.pdf">Manual</a>"##,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&format!("{}/", base_url), 10);
    let report = crawl(&config, None, None).await.expect("Crawl failed");

    assert_eq!(report.pages_crawled, 1);
    assert_eq!(report.pages_unchecked, 0);
    assert_eq!(report.broken_count, 0);
}

#[tokio::test]
async fn test_connection_failure_recorded() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Same host, closed port
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(r#"<a href="http://127.0.0.1:1/">Down</a>"#))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&format!("{}/", base_url), 10);
    let report = crawl(&config, None, None).await.expect("Crawl failed");

    let broken = entries(&report);
    assert_eq!(broken.len(), 1);
    assert_eq!(broken[0].record.target, "http://127.0.0.1:1/");
    assert!(matches!(
        broken[0].reason,
        FailureReason::Transport(TransportError::Connect(_))
    ));
}

#[tokio::test]
async fn test_report_written_to_file() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(r#"<a href="gone">Gone</a><img src="logo.png">"#))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&format!("{}/", base_url), 10);
    let report = crawl(&config, Some("abc123"), None)
        .await
        .expect("Crawl failed");

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = write_report(&report, dir.path()).expect("Failed to write report");

    let written = std::fs::read_to_string(&path).expect("Failed to read report");
    assert_eq!(written, render_text(&report));
    assert!(written.contains("Config hash: abc123"));
    assert!(written.contains("2 broken pages found."));
    assert!(written.contains(&format!("  target: {}/gone\n", base_url)));
    assert!(written.contains(&format!("  target: {}/logo.png\n", base_url)));
    assert!(written.contains("  reason: HTTP status 404\n"));
}

#[tokio::test]
async fn test_missing_seed_is_an_error() {
    let config = Config::default();
    assert!(crawl(&config, None, None).await.is_err());
}
