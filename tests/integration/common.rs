use llms_sitemap::config::{
    Config, CrawlerConfig, DiscoveryConfig, FiltersConfig, SiteConfig, SourceConfig,
    UserAgentConfig,
};
use wiremock::ResponseTemplate;

/// Crawler settings that keep tests fast and on plain http
pub fn fast_crawler_config(max_retries: u32) -> CrawlerConfig {
    CrawlerConfig {
        polite: false,
        request_delay_ms: 0,
        max_retries,
        timeout_secs: 5,
        prefer_https: false,
        respect_robots: false,
    }
}

/// Creates a test configuration for a mock server
pub fn create_test_config(base_url: &str, sources: Vec<SourceConfig>) -> Config {
    Config {
        site: SiteConfig {
            base_url: base_url.to_string(),
            default_language: "en".to_string(),
            allowed_domains: vec![],
            description: None,
        },
        sources,
        filters: FiltersConfig::default(),
        crawler: fast_crawler_config(0),
        discovery: DiscoveryConfig::default(),
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
        },
    }
}

/// An HTML page linking to each of `links`
pub fn html_page(links: &[&str]) -> ResponseTemplate {
    let anchors: String = links
        .iter()
        .map(|href| format!("<a href=\"{}\">link</a>\n", href))
        .collect();
    let body = format!(
        "<html><head><title>Test</title></head><body>\n{}</body></html>",
        anchors
    );
    ResponseTemplate::new(200).set_body_raw(body, "text/html")
}

/// A `<urlset>` sitemap listing `urls`
pub fn urlset(urls: &[String]) -> ResponseTemplate {
    let entries: String = urls
        .iter()
        .map(|u| format!("  <url><loc>{}</loc></url>\n", u))
        .collect();
    let body = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{}</urlset>",
        entries
    );
    ResponseTemplate::new(200).set_body_raw(body, "application/xml")
}

/// A `<sitemapindex>` listing `children`
pub fn sitemap_index(children: &[String]) -> ResponseTemplate {
    let entries: String = children
        .iter()
        .map(|u| format!("  <sitemap><loc>{}</loc></sitemap>\n", u))
        .collect();
    let body = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <sitemapindex xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{}</sitemapindex>",
        entries
    );
    ResponseTemplate::new(200).set_body_raw(body, "application/xml")
}
