use crate::config::{Config, SourceConfig, SourceKind};
use std::collections::BTreeSet;
use url::Url;

/// Depth given to sitemap sources added for discovered hosts
const DISCOVERED_SOURCE_DEPTH: u32 = 2;

/// Sources and allowed hosts after subdomain augmentation
#[derive(Debug, Clone)]
pub struct AugmentedSources {
    /// Configured sources followed by one sitemap source per new host
    pub sources: Vec<SourceConfig>,

    /// Configured allowed hosts unioned with the discovered ones, sorted
    pub allowed_hosts: Vec<String>,
}

/// Merges discovered hosts into the configured sources
///
/// A host already mentioned in the URL of any configured source is left
/// alone. Every other host gets a `sitemap` source at
/// `<scheme>://<host>/sitemap.xml`, using the scheme of the base URL. The
/// configuration itself is not modified.
pub fn augment_sources(config: &Config, hosts: &[String]) -> AugmentedSources {
    let scheme = Url::parse(config.site.base_url.trim())
        .map(|u| u.scheme().to_string())
        .unwrap_or_else(|_| "https".to_string());

    let mut allowed: BTreeSet<String> = config.allowed_hosts().into_iter().collect();
    allowed.extend(hosts.iter().map(|h| h.trim().to_lowercase()));

    let mut sources = config.sources.clone();
    let mut known_urls: BTreeSet<String> = config
        .sources
        .iter()
        .filter(|s| matches!(s.kind, SourceKind::Sitemap | SourceKind::Crawl))
        .map(|s| s.url.trim().to_string())
        .collect();

    for host in hosts {
        let host = host.trim().to_lowercase();
        if host.is_empty() {
            continue;
        }

        let referenced = config
            .sources
            .iter()
            .any(|s| s.url.to_lowercase().contains(&host));
        if referenced {
            continue;
        }

        let sitemap_url = format!("{}://{}/sitemap.xml", scheme, host);
        if !known_urls.insert(sitemap_url.clone()) {
            continue;
        }

        tracing::info!("Adding sitemap source for discovered host {}", host);
        let mut source = SourceConfig::sitemap(sitemap_url);
        source.max_depth = DISCOVERED_SOURCE_DEPTH;
        sources.push(source);
    }

    AugmentedSources {
        sources,
        allowed_hosts: allowed.into_iter().collect(),
    }
}
