//! Integration tests for source collection

use crate::common::{create_test_config, html_page, urlset};
use llms_sitemap::config::SourceConfig;
use llms_sitemap::{classify, SourceCollector};
use reqwest::Client;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_sources_merged_and_deduplicated() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(urlset(&[
            format!("{}/x", base_url),
            format!("{}/x/", base_url),
            format!("{}/pricing#plans", base_url),
        ]))
        .mount(&mock_server)
        .await;

    let config = create_test_config(
        &base_url,
        vec![
            SourceConfig::sitemap(format!("{}/sitemap.xml", base_url)),
            SourceConfig::static_list(vec![
                format!("{}/x", base_url),
                "https://unrelated.example.org/x".to_string(),
            ]),
        ],
    );
    let client = Client::new();

    let collection = SourceCollector::new(&config, &client).collect().await;

    assert_eq!(
        collection.urls,
        vec![format!("{}/x", base_url), format!("{}/pricing", base_url)]
    );
    assert!(collection.discovered_hosts.is_empty());
}

#[tokio::test]
async fn test_robots_fallback_when_sitemaps_empty() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Configured sitemap is missing (unmatched requests get 404)
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            format!(
                "User-agent: *\nDisallow: /admin\nSitemap: {}/sitemap.xml\nsitemap: {}/real-sitemap.xml\n",
                base_url, base_url
            ),
            "text/plain",
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/real-sitemap.xml"))
        .respond_with(urlset(&[
            format!("{}/docs", base_url),
            format!("{}/about", base_url),
        ]))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(
        &base_url,
        vec![SourceConfig::sitemap(format!("{}/sitemap.xml", base_url))],
    );
    let client = Client::new();

    let collection = SourceCollector::new(&config, &client).collect().await;

    assert_eq!(
        collection.urls,
        vec![format!("{}/docs", base_url), format!("{}/about", base_url)]
    );
}

#[tokio::test]
async fn test_crawl_budget_clamped_by_source_and_global() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(&["/one", "/two", "/three", "/four"]))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .respond_with(html_page(&[]))
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(
        &base_url,
        vec![SourceConfig::crawl(format!("{}/", base_url), 2, 2)],
    );
    let client = Client::new();

    let collection = SourceCollector::new(&config, &client).collect().await;
    assert_eq!(collection.urls.len(), 2);
    assert_eq!(collection.urls[0], format!("{}/", base_url));

    config.sources = vec![SourceConfig::crawl(format!("{}/", base_url), 2, 0)];
    config.filters.max_urls = 4;
    let collection = SourceCollector::new(&config, &client).collect().await;
    assert_eq!(collection.urls.len(), 4);
}

#[tokio::test]
async fn test_collect_then_classify() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(urlset(&[
            format!("{}/", base_url),
            format!("{}/docs/start", base_url),
            format!("{}/de/docs/start", base_url),
            format!("{}/blog/page/2", base_url),
            format!("{}/pricing", base_url),
        ]))
        .mount(&mock_server)
        .await;

    let config = create_test_config(
        &base_url,
        vec![SourceConfig::sitemap(format!("{}/sitemap.xml", base_url))],
    );
    let client = Client::new();

    let collection = SourceCollector::new(&config, &client).collect().await;
    assert_eq!(collection.urls.len(), 5);

    let pages = classify(&collection.urls, &config).expect("rules compile");
    let summary: Vec<(&str, &str)> = pages
        .iter()
        .map(|p| (p.group.as_str(), p.path.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![("Docs", "/docs/start"), ("Home", "/"), ("Pricing", "/pricing")]
    );
}

#[tokio::test]
async fn test_pagination_listed_before_page_keeps_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(urlset(&[
            format!("{}/blog?page=2", base_url),
            format!("{}/blog", base_url),
        ]))
        .mount(&mock_server)
        .await;

    let config = create_test_config(
        &base_url,
        vec![SourceConfig::sitemap(format!("{}/sitemap.xml", base_url))],
    );
    let client = Client::new();

    let collection = SourceCollector::new(&config, &client).collect().await;
    assert_eq!(collection.urls, vec![format!("{}/blog", base_url)]);

    let pages = classify(&collection.urls, &config).expect("rules compile");
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].path, "/blog");
    assert_eq!(pages[0].group, "Blog");
}
