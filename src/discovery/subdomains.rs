use crate::crawler::{extract_links, fetch_text, DISCOVERY_TIMEOUT};
use crate::robots::fetch_robots;
use crate::sitemap::{SitemapReader, SitemapVisit};
use crate::url::{host_of, is_same_root_domain, root_domain};
use reqwest::Client;
use std::collections::BTreeSet;
use url::Url;

/// Sitemap locations tried on the base host, in order
const SITEMAP_PATHS: &[&str] = &["/sitemap.xml", "/sitemap_index.xml"];

/// Finds hosts that belong to the same site as a base URL
///
/// Three independent sources of evidence are combined:
/// 1. Hosts of the page URLs in the base host's sitemap
/// 2. Hosts of the `Sitemap:` URLs in robots.txt
/// 3. Hosts of the anchors on the homepage
///
/// Only hosts sharing the root domain are kept. Every step is best-effort:
/// a failed fetch contributes nothing, and the base host is always part of
/// the result.
#[derive(Debug, Clone)]
pub struct SubdomainDiscoverer<'a> {
    client: &'a Client,
    root_override: Option<String>,
}

impl<'a> SubdomainDiscoverer<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self {
            client,
            root_override: None,
        }
    }

    /// Uses `root` instead of the last two labels of the base host
    ///
    /// Needed for sites under multi-label public suffixes such as `co.uk`.
    pub fn with_root_domain(mut self, root: impl Into<String>) -> Self {
        self.root_override = Some(root.into().to_lowercase());
        self
    }

    /// Discovers same-root hosts for `base_url`, sorted
    pub async fn discover(&self, base_url: &str) -> Vec<String> {
        let Ok(base) = Url::parse(base_url.trim()) else {
            tracing::warn!("Cannot discover subdomains of invalid URL {}", base_url);
            return Vec::new();
        };
        let Some(main_host) = host_of(base.as_str()) else {
            return Vec::new();
        };
        let root = self
            .root_override
            .clone()
            .unwrap_or_else(|| root_domain(&main_host));

        let mut hosts = BTreeSet::new();
        let from_sitemap = self.hosts_from_sitemap(&base).await;
        tracing::debug!("Sitemap lookup returned {} page hosts", from_sitemap.len());
        hosts.extend(from_sitemap);

        hosts.extend(self.hosts_from_robots(&base).await);
        hosts.extend(self.hosts_from_homepage(&base).await);

        hosts.retain(|host| is_same_root_domain(host, &root));
        hosts.insert(main_host);

        tracing::info!("Found {} hosts under {}", hosts.len(), root);
        hosts.into_iter().collect()
    }

    /// Page hosts listed in the first sitemap that can be read
    async fn hosts_from_sitemap(&self, base: &Url) -> Vec<String> {
        let reader = SitemapReader::new(self.client).with_timeout(DISCOVERY_TIMEOUT);
        let origin = base.origin().ascii_serialization();

        for path in SITEMAP_PATHS {
            let sitemap_url = format!("{}{}", origin, path);
            let mut visit = SitemapVisit::new();
            match reader.fetch_and_expand(&sitemap_url, &mut visit).await {
                Ok(urls) => return urls.iter().filter_map(|u| host_of(u)).collect(),
                Err(e) => tracing::debug!("No sitemap at {}: {}", sitemap_url, e),
            }
        }

        Vec::new()
    }

    /// Hosts of the sitemaps declared in robots.txt
    async fn hosts_from_robots(&self, base: &Url) -> Vec<String> {
        match fetch_robots(self.client, base.as_str()).await {
            Ok(robots) => robots
                .sitemaps()
                .iter()
                .filter_map(|u| host_of(u))
                .collect(),
            Err(e) => {
                tracing::debug!("Could not read robots.txt: {}", e);
                Vec::new()
            }
        }
    }

    /// Hosts linked from the homepage
    async fn hosts_from_homepage(&self, base: &Url) -> Vec<String> {
        match fetch_text(self.client, base.as_str(), DISCOVERY_TIMEOUT).await {
            Ok(page) => extract_links(&page.body, base)
                .iter()
                .filter_map(|u| host_of(u))
                .collect(),
            Err(e) => {
                tracing::debug!("Could not extract hosts from homepage: {}", e);
                Vec::new()
            }
        }
    }
}
