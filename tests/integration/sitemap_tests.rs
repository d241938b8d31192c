//! Integration tests for sitemap reading and index expansion

use crate::common::{sitemap_index, urlset};
use llms_sitemap::sitemap::{SitemapReader, SitemapVisit};
use llms_sitemap::SitemapError;
use reqwest::Client;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_namespaced_urlset() {
    let mock_server = MockServer::start().await;
    let body = r#"<?xml version="1.0" encoding="UTF-8"?>
<sm:urlset xmlns:sm="http://www.sitemaps.org/schemas/sitemap/0.9"
           xmlns:image="http://www.google.com/schemas/sitemap-image/1.1">
  <sm:url>
    <sm:loc>https://example.com/</sm:loc>
    <image:image><image:loc>https://example.com/hero.png</image:loc></image:image>
  </sm:url>
  <sm:url><sm:loc>https://example.com/pricing</sm:loc></sm:url>
</sm:urlset>"#;

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/xml"))
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let urls = SitemapReader::new(&client)
        .expand(&format!("{}/sitemap.xml", mock_server.uri()))
        .await
        .expect("sitemap should expand");

    assert_eq!(
        urls,
        vec![
            "https://example.com/".to_string(),
            "https://example.com/pricing".to_string()
        ]
    );
}

#[tokio::test]
async fn test_cyclic_index_terminates() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/a.xml"))
        .respond_with(sitemap_index(&[format!("{}/b.xml", base_url)]))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/b.xml"))
        .respond_with(sitemap_index(&[
            format!("{}/a.xml", base_url),
            format!("{}/leaf.xml", base_url),
        ]))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/leaf.xml"))
        .respond_with(urlset(&[
            "https://example.com/docs".to_string(),
            "https://example.com/blog".to_string(),
        ]))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let mut visit = SitemapVisit::new();
    let urls = SitemapReader::new(&client)
        .fetch_and_expand(&format!("{}/a.xml", base_url), &mut visit)
        .await
        .expect("index should expand");

    assert_eq!(
        urls,
        vec![
            "https://example.com/docs".to_string(),
            "https://example.com/blog".to_string()
        ]
    );
    assert_eq!(visit.len(), 3);
}

#[tokio::test]
async fn test_failed_child_does_not_fail_index() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/index.xml"))
        .respond_with(sitemap_index(&[
            format!("{}/broken.xml", base_url),
            format!("{}/pages.xml", base_url),
        ]))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/broken.xml"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/pages.xml"))
        .respond_with(urlset(&["https://example.com/about".to_string()]))
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let urls = SitemapReader::new(&client)
        .expand(&format!("{}/index.xml", base_url))
        .await
        .expect("index should expand");

    assert_eq!(urls, vec!["https://example.com/about".to_string()]);
}

#[tokio::test]
async fn test_top_level_errors_returned() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/bad.xml"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<urlset><url><loc>x</url></urlset>", "application/xml"),
        )
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let reader = SitemapReader::new(&client);

    let malformed = reader.expand(&format!("{}/bad.xml", base_url)).await;
    assert!(matches!(malformed, Err(SitemapError::Parse { .. })));

    let missing = reader.expand(&format!("{}/missing.xml", base_url)).await;
    assert!(matches!(missing, Err(SitemapError::Fetch(_))));
}
