//! Integration tests for subdomain discovery

use crate::common::{html_page, urlset};
use llms_sitemap::discovery::SubdomainDiscoverer;
use reqwest::Client;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_hosts_from_all_three_sources() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(urlset(&[
            "https://docs.example.com/start".to_string(),
            "https://www.example.com/pricing".to_string(),
            "https://other.org/page".to_string(),
        ]))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "User-agent: *\nAllow: /\nSitemap: https://blog.example.com/sitemap.xml\n",
            "text/plain",
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(&[
            "https://shop.example.com/",
            "https://evil.net/",
            "/local",
        ]))
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let hosts = SubdomainDiscoverer::new(&client)
        .with_root_domain("example.com")
        .discover(&base_url)
        .await;

    assert_eq!(
        hosts,
        vec![
            "127.0.0.1".to_string(),
            "blog.example.com".to_string(),
            "docs.example.com".to_string(),
            "shop.example.com".to_string(),
            "www.example.com".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_sitemap_index_tried_when_sitemap_missing() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/sitemap_index.xml"))
        .respond_with(urlset(&["https://api.example.com/ref".to_string()]))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let hosts = SubdomainDiscoverer::new(&client)
        .with_root_domain("example.com")
        .discover(&base_url)
        .await;

    assert_eq!(
        hosts,
        vec!["127.0.0.1".to_string(), "api.example.com".to_string()]
    );
}

#[tokio::test]
async fn test_unreachable_site_yields_main_host_only() {
    let mock_server = MockServer::start().await;

    let client = Client::new();
    let hosts = SubdomainDiscoverer::new(&client)
        .discover(&mock_server.uri())
        .await;

    assert_eq!(hosts, vec!["127.0.0.1".to_string()]);
}
