//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end over real HTTP.

use webscrape::config::{Config, CrawlerConfig, FetchConfig, UserAgentConfig};
use webscrape::crawler::{crawl, Crawler, HttpPageSource};
use webscrape::state::PageState;
use webscrape::{CrawlReport, ScrapeError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with short timeouts
fn create_test_config(max_concurrent_fetches: u32) -> Config {
    Config {
        crawler: CrawlerConfig {
            max_pages: None,
            max_depth: None,
            max_concurrent_fetches,
        },
        fetch: FetchConfig {
            timeout_secs: 5,
            connect_timeout_secs: 2,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: Some("https://example.com/contact".to_string()),
        },
    }
}

/// Mounts an HTML page at `route`, expected to be fetched exactly once
async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html"))
        .expect(1)
        .mount(server)
        .await;
}

fn visited_sorted(report: &CrawlReport) -> Vec<String> {
    let mut visited: Vec<String> = report.visited.iter().cloned().collect();
    visited.sort();
    visited
}

#[tokio::test]
async fn test_full_crawl_single_domain() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<html><head><title>Home</title></head><body>
            <a href="/socials">Socials</a>
            <a href="/jobs">Jobs</a>
            <a href="https://other.com">Elsewhere</a>
            <a href="/report.pdf">Report</a>
            </body></html>"#
            .to_string(),
    )
    .await;
    mount_page(
        &mock_server,
        "/socials",
        r#"<html><body><a href="/">Home</a></body></html>"#.to_string(),
    )
    .await;
    mount_page(
        &mock_server,
        "/jobs",
        format!(r#"<html><body><a href="{}/socials">Socials</a></body></html>"#, base_url),
    )
    .await;

    let report = crawl(&base_url, &create_test_config(1))
        .await
        .expect("Crawl failed");

    assert_eq!(report.base.as_deref(), Some(base_url.as_str()));
    assert_eq!(
        visited_sorted(&report),
        vec![
            base_url.clone(),
            format!("{}/jobs", base_url),
            format!("{}/socials", base_url),
        ]
    );
    assert!(report.links_found.contains("https://other.com"));
    assert!(report.links_found.contains("/report.pdf"));
    assert!(report
        .pages
        .iter()
        .all(|page| page.state == PageState::Processed));

    let home = &report.pages[0];
    assert_eq!(home.url, base_url);
    assert_eq!(home.title.as_deref(), Some("Home"));
    assert_eq!(home.depth, 0);
}

#[tokio::test]
async fn test_failed_pages_stay_visited_and_are_not_retried() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<html><body>
            <a href="/missing">Missing</a>
            <a href="/broken">Broken</a>
            <a href="/ok">Ok</a>
            </body></html>"#
            .to_string(),
    )
    .await;
    mount_page(
        &mock_server,
        "/ok",
        r#"<html><body><a href="/missing">Again</a><a href="/broken">Again</a></body></html>"#
            .to_string(),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let report = crawl(&base_url, &create_test_config(1))
        .await
        .expect("Crawl failed");

    assert_eq!(report.visited.len(), 4);

    let state_of = |suffix: &str| {
        let url = format!("{}{}", base_url, suffix);
        report
            .pages
            .iter()
            .find(|page| page.url == url)
            .map(|page| page.state)
    };
    assert_eq!(state_of("/missing"), Some(PageState::DeadLink));
    assert_eq!(state_of("/broken"), Some(PageState::Failed));
    assert_eq!(state_of("/ok"), Some(PageState::Processed));
}

#[tokio::test]
async fn test_non_html_response_is_content_mismatch() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<html><body><a href="/feed">Feed</a></body></html>"#.to_string(),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"href": "/secret"}"#, "application/json"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/secret"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let report = crawl(&base_url, &create_test_config(1))
        .await
        .expect("Crawl failed");

    let feed = report
        .pages
        .iter()
        .find(|page| page.url == format!("{}/feed", base_url))
        .expect("feed page recorded");
    assert_eq!(feed.state, PageState::ContentMismatch);
    assert!(feed.links.is_empty());
}

#[tokio::test]
async fn test_other_authority_is_never_fetched() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let port = url::Url::parse(&base_url)
        .expect("Failed to parse base URL")
        .port()
        .expect("mock server has a port");

    // Same server, but reached through a different host name
    let elsewhere = format!("http://localhost:{}/elsewhere", port);

    mount_page(
        &mock_server,
        "/",
        format!(r#"<html><body><a href="{}">Elsewhere</a></body></html>"#, elsewhere),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/elsewhere"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html></html>", "text/html"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let report = crawl(&base_url, &create_test_config(1))
        .await
        .expect("Crawl failed");

    assert_eq!(report.visited.len(), 1);
    assert!(report.links_found.contains(&elsewhere));
}

/// Mounts a home page linking six sections that each link home and to the next
async fn mount_ring(server: &MockServer) {
    let links: String = (0..6)
        .map(|i| format!(r#"<a href="/section/{}">Section {}</a>"#, i, i))
        .collect();
    mount_page(server, "/", format!("<html><body>{}</body></html>", links)).await;

    for i in 0..6 {
        mount_page(
            server,
            &format!("/section/{}", i),
            format!(
                r#"<html><body><a href="/">Home</a><a href="/section/{}">Next</a></body></html>"#,
                (i + 1) % 6
            ),
        )
        .await;
    }
}

#[tokio::test]
async fn test_concurrent_crawl_visits_same_pages() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_ring(&mock_server).await;
    let sequential = crawl(&base_url, &create_test_config(1))
        .await
        .expect("Sequential crawl failed");
    mock_server.verify().await;
    mock_server.reset().await;

    mount_ring(&mock_server).await;
    let concurrent = crawl(&base_url, &create_test_config(4))
        .await
        .expect("Concurrent crawl failed");

    assert_eq!(sequential.visited.len(), 7);
    assert_eq!(visited_sorted(&sequential), visited_sorted(&concurrent));
    assert_eq!(concurrent.pages.len(), 7);
}

#[tokio::test]
async fn test_empty_href_is_recorded_but_not_followed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<html><body><a href="">Nowhere</a><a>No href</a></body></html>"#.to_string(),
    )
    .await;

    let report = crawl(&base_url, &create_test_config(1))
        .await
        .expect("Crawl failed");

    assert_eq!(report.visited.len(), 1);
    assert_eq!(report.links_found.len(), 1);
    assert!(report.links_found.contains(""));
    assert_eq!(report.pages[0].links, vec![String::new()]);
}

#[tokio::test]
async fn test_page_budget_over_http() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"<html><body><a href="/a">A</a><a href="/b">B</a><a href="/c">C</a></body></html>"#,
            "text/html",
        ))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html></html>", "text/html"))
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(1);
    config.crawler.max_pages = Some(2);

    let report = crawl(&base_url, &config).await.expect("Crawl failed");

    assert_eq!(
        visited_sorted(&report),
        vec![base_url.clone(), format!("{}/a", base_url)]
    );
}

#[tokio::test]
async fn test_invalid_seed_fetches_nothing() {
    let config = create_test_config(1);
    let source = HttpPageSource::new(&config.user_agent, &config.fetch)
        .expect("Failed to build client");
    let mut crawler = Crawler::new(source, config.crawler.clone());

    for seed in ["", "not a url", "mailto:someone@example.com", "https://example.com/a.pdf"] {
        let result = crawler.crawl(seed).await;
        assert!(
            matches!(result, Err(ScrapeError::InvalidSeed(_))),
            "seed {:?} should be rejected",
            seed
        );
    }

    let report = crawler.finish();
    assert!(report.base.is_none());
    assert!(report.visited.is_empty());
}

#[tokio::test]
async fn test_user_agent_header_is_sent() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .and(wiremock::matchers::header(
            "user-agent",
            "TestBot/1.0.0 (+https://example.com/contact)",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html></html>", "text/html"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let report = crawl(&base_url, &create_test_config(1))
        .await
        .expect("Crawl failed");

    assert_eq!(report.pages[0].state, PageState::Processed);
}
