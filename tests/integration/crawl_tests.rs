//! Integration tests for the priority crawler
//!
//! These tests use wiremock to create mock HTTP servers and drive full
//! crawls end-to-end.

use crate::common::{fast_crawler_config, html_page};
use llms_sitemap::crawler::{CrawlRequest, Crawler, StopReason};
use llms_sitemap::FailureLog;
use reqwest::Client;
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A request for `seeds` scoped to the mock server host
fn request_for(seeds: Vec<String>, max_urls: usize, max_depth: u32) -> CrawlRequest {
    let mut request = CrawlRequest::new(seeds[0].clone(), max_urls, max_depth);
    request.seeds = seeds;
    request
}

#[tokio::test]
async fn test_404_is_not_retried() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let crawler = Crawler::new(&client, &fast_crawler_config(3));
    let request = CrawlRequest::new(format!("{}/missing", base_url), 10, 1);
    let mut failures = FailureLog::new();

    let outcome = crawler.crawl(&request, Some(&mut failures)).await;

    assert!(outcome.urls.is_empty());
    assert_eq!(outcome.stop_reason, StopReason::FrontierExhausted);
    assert_eq!(failures.len(), 1);
    assert_eq!(failures.entries()[0].status, Some(404));
}

#[tokio::test]
async fn test_seeds_visited_in_priority_order() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    for page in ["/careers", "/about", "/pricing"] {
        Mock::given(method("GET"))
            .and(path(page))
            .respond_with(html_page(&[]))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let client = Client::new();
    let crawler = Crawler::new(&client, &fast_crawler_config(0));
    let seeds = vec![
        format!("{}/careers", base_url),
        format!("{}/about", base_url),
        format!("{}/pricing", base_url),
    ];
    let outcome = crawler.crawl(&request_for(seeds, 100, 0), None).await;

    assert_eq!(
        outcome.urls,
        vec![
            format!("{}/pricing", base_url),
            format!("{}/about", base_url),
            format!("{}/careers", base_url),
        ]
    );

    let requests = mock_server.received_requests().await.unwrap_or_default();
    let paths: Vec<&str> = requests.iter().map(|r| r.url.path()).collect();
    assert_eq!(paths, vec!["/pricing", "/about", "/careers"]);
}

#[tokio::test]
async fn test_server_error_is_retried() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // First attempt fails, the retry succeeds
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(html_page(&[]))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let crawler = Crawler::new(&client, &fast_crawler_config(2));
    let request = CrawlRequest::new(format!("{}/flaky", base_url), 10, 0);
    let mut failures = FailureLog::new();

    let outcome = crawler.crawl(&request, Some(&mut failures)).await;

    assert_eq!(outcome.urls, vec![format!("{}/flaky", base_url)]);
    assert!(failures.is_empty());
}

#[tokio::test]
async fn test_exhausted_retries_recorded_as_failure() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let crawler = Crawler::new(&client, &fast_crawler_config(0));
    let request = CrawlRequest::new(format!("{}/broken", base_url), 10, 0);
    let mut failures = FailureLog::new();

    let outcome = crawler.crawl(&request, Some(&mut failures)).await;

    assert!(outcome.urls.is_empty());
    assert_eq!(failures.len(), 1);
    assert_eq!(failures.entries()[0].url, format!("{}/broken", base_url));
    assert_eq!(failures.entries()[0].status, Some(500));
}

#[tokio::test]
async fn test_links_followed_within_depth_and_host() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(&[
            "/level-1",
            "/logo.png",
            "https://elsewhere.invalid/page",
            "mailto:team@example.com",
        ]))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/level-1"))
        .respond_with(html_page(&["/level-2"]))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/level-2"))
        .respond_with(html_page(&[]))
        .expect(0)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/logo.png"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let crawler = Crawler::new(&client, &fast_crawler_config(0));
    let request = CrawlRequest::new(format!("{}/", base_url), 100, 1);

    let outcome = crawler.crawl(&request, None).await;

    assert_eq!(
        outcome.urls,
        vec![format!("{}/", base_url), format!("{}/level-1", base_url)]
    );
    assert_eq!(outcome.stop_reason, StopReason::FrontierExhausted);
}

#[tokio::test]
async fn test_non_html_responses_discarded() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(&["/api/status", "/features"]))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{\"ok\":true}", "application/json"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/features"))
        .respond_with(html_page(&[]))
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let crawler = Crawler::new(&client, &fast_crawler_config(0));
    let request = CrawlRequest::new(format!("{}/", base_url), 100, 2);

    let outcome = crawler.crawl(&request, None).await;

    assert_eq!(
        outcome.urls,
        vec![format!("{}/", base_url), format!("{}/features", base_url)]
    );
}

#[tokio::test]
async fn test_budget_stops_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(&["/a", "/b", "/c", "/d"]))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .respond_with(html_page(&[]))
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let crawler = Crawler::new(&client, &fast_crawler_config(0));
    let request = CrawlRequest::new(format!("{}/", base_url), 3, 2);

    let outcome = crawler.crawl(&request, None).await;

    assert_eq!(outcome.urls.len(), 3);
    assert_eq!(outcome.stop_reason, StopReason::BudgetReached);
}

#[tokio::test]
async fn test_rate_limit_waits_for_retry_after() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/busy"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "3"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/busy"))
        .respond_with(html_page(&[]))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let crawler = Crawler::new(&client, &fast_crawler_config(1));
    let request = CrawlRequest::new(format!("{}/busy", base_url), 10, 0);
    let mut failures = FailureLog::new();

    let started = Instant::now();
    let outcome = crawler.crawl(&request, Some(&mut failures)).await;
    let elapsed = started.elapsed();

    assert_eq!(outcome.urls, vec![format!("{}/busy", base_url)]);
    assert!(failures.is_empty());
    assert!(
        elapsed >= Duration::from_secs(3),
        "retried after {:?}, before Retry-After elapsed",
        elapsed
    );

    let requests = mock_server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn test_rate_limit_on_final_attempt_recorded() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/throttled"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "30"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let crawler = Crawler::new(&client, &fast_crawler_config(0));
    let request = CrawlRequest::new(format!("{}/throttled", base_url), 10, 0);
    let mut failures = FailureLog::new();

    let started = Instant::now();
    let outcome = crawler.crawl(&request, Some(&mut failures)).await;

    // No backoff sleep after the last attempt
    assert!(started.elapsed() < Duration::from_secs(30));
    assert!(outcome.urls.is_empty());
    assert_eq!(failures.len(), 1);
    assert_eq!(failures.entries()[0].status, Some(429));
    assert_eq!(
        failures.entries()[0].url,
        format!("{}/throttled", base_url)
    );
}
