use crate::config::{Config, SourceConfig, SourceKind};
use crate::crawler::{CrawlRequest, Crawler};
use crate::discovery::{augment_sources, SubdomainDiscoverer};
use crate::output::FailureLog;
use crate::robots::discover_sitemaps_from_robots;
use crate::sitemap::{SitemapReader, SitemapVisit};
use crate::url::{
    canonical_key, host_of, is_same_root_domain, normalize_url, root_domain, NormalizeOptions,
};
use reqwest::Client;
use std::collections::{HashMap, HashSet};

/// Everything a collection run produced
#[derive(Debug, Default)]
pub struct Collection {
    /// Canonical, deduplicated URLs in source order, at most `filters.max-urls`
    pub urls: Vec<String>,

    /// Hosts found by subdomain discovery (or selected in the config)
    pub discovered_hosts: Vec<String>,

    /// Crawl fetches that permanently failed
    pub failures: FailureLog,
}

/// Sources and host scope in effect for one run
struct RunPlan {
    sources: Vec<SourceConfig>,
    allowed_hosts: Vec<String>,
    discovered_hosts: Vec<String>,
}

/// Orchestrates sitemap reading, crawling and static lists
///
/// # Collection Flow
///
/// 1. With `discovery.auto-subdomains`, discover same-root hosts and add a
///    sitemap source for each new one
/// 2. Run the sources in order, skipping the rest once the global budget is
///    used up; crawls get `min(source budget, remaining budget)`
/// 3. If sitemap sources were configured but nothing was collected, read the
///    sitemaps declared in robots.txt
/// 4. Keep allowed hosts only, canonicalize, deduplicate and truncate to the
///    global budget
pub struct SourceCollector<'a> {
    config: &'a Config,
    client: &'a Client,
    normalize: NormalizeOptions,
}

impl<'a> SourceCollector<'a> {
    pub fn new(config: &'a Config, client: &'a Client) -> Self {
        Self {
            config,
            client,
            normalize: NormalizeOptions::CANONICAL.prefer_https(config.crawler.prefer_https),
        }
    }

    /// Runs every source and returns the final URL list
    ///
    /// Never fails: unreachable sitemaps, failed fetches and failed
    /// discovery are logged and contribute no URLs.
    pub async fn collect(&self) -> Collection {
        let plan = self.plan().await;
        let global_max = self.config.filters.max_urls;
        let mut collected: Vec<String> = Vec::new();
        let mut failures = FailureLog::new();
        let mut visit = SitemapVisit::new();

        for (idx, source) in plan.sources.iter().enumerate() {
            if collected.len() >= global_max {
                tracing::info!(
                    "Global URL budget of {} reached; skipping {} remaining sources",
                    global_max,
                    plan.sources.len() - idx
                );
                break;
            }

            let urls = match source.kind {
                SourceKind::Sitemap => self.read_sitemap(&source.url, &mut visit).await,
                SourceKind::Crawl => {
                    let remaining = global_max - collected.len();
                    self.run_crawl(source, remaining, &plan.allowed_hosts, &mut failures)
                        .await
                }
                SourceKind::Static => static_urls(source),
            };

            tracing::info!(
                "Source {} ({} {}) produced {} URLs",
                idx + 1,
                source.kind,
                source_label(source),
                urls.len()
            );
            collected.extend(urls);
        }

        let has_sitemap_source = plan
            .sources
            .iter()
            .any(|s| s.kind == SourceKind::Sitemap);
        if has_sitemap_source && collected.is_empty() {
            collected.extend(self.robots_fallback(&mut visit).await);
        }

        let urls = self.finalize(collected, &plan.allowed_hosts);

        Collection {
            urls,
            discovered_hosts: plan.discovered_hosts,
            failures,
        }
    }

    /// Decides the effective sources and allowed hosts
    async fn plan(&self) -> RunPlan {
        if !self.config.discovery.auto_subdomains {
            return RunPlan {
                sources: self.config.sources.clone(),
                allowed_hosts: self.config.allowed_hosts(),
                discovered_hosts: Vec::new(),
            };
        }

        let hosts = match &self.config.discovery.selected_subdomains {
            Some(selected) => {
                tracing::info!("Using {} selected subdomains", selected.len());
                selected.clone()
            }
            None => {
                tracing::info!("Discovering subdomains of {}", self.config.base_url());
                SubdomainDiscoverer::new(self.client)
                    .discover(self.config.base_url())
                    .await
            }
        };

        if hosts.is_empty() {
            tracing::warn!("Subdomain discovery found no hosts; using configured sources");
        }

        let augmented = augment_sources(self.config, &hosts);
        RunPlan {
            sources: augmented.sources,
            allowed_hosts: augmented.allowed_hosts,
            discovered_hosts: hosts,
        }
    }

    /// Expands one sitemap source; a failure yields no URLs
    async fn read_sitemap(&self, url: &str, visit: &mut SitemapVisit) -> Vec<String> {
        let reader = SitemapReader::new(self.client);
        match reader.fetch_and_expand(url, visit).await {
            Ok(urls) => urls,
            Err(e) => {
                tracing::warn!("Failed to read sitemap {}: {}", url, e);
                Vec::new()
            }
        }
    }

    /// Crawls one source within the remaining global budget
    async fn run_crawl(
        &self,
        source: &SourceConfig,
        remaining: usize,
        allowed_hosts: &[String],
        failures: &mut FailureLog,
    ) -> Vec<String> {
        let budget = if source.max_urls > 0 {
            source.max_urls.min(remaining)
        } else {
            remaining
        };

        let request = CrawlRequest {
            seeds: vec![source.url.clone()],
            max_urls: budget,
            max_depth: source.max_depth,
            allowed_hosts: allowed_hosts.to_vec(),
            root_domain: self.primary_root_domain(),
            allow_same_root_subdomains: self.config.discovery.auto_subdomains,
        };

        let crawler = Crawler::from_config(self.client, self.config);
        crawler.crawl(&request, Some(failures)).await.urls
    }

    /// Reads sitemaps declared in robots.txt that were not configured
    async fn robots_fallback(&self, visit: &mut SitemapVisit) -> Vec<String> {
        tracing::info!("No URLs from configured sitemaps; checking robots.txt");

        let configured: HashSet<&str> = self
            .config
            .sources
            .iter()
            .filter(|s| s.kind == SourceKind::Sitemap)
            .map(|s| s.url.trim().trim_end_matches('/'))
            .collect();

        let declared =
            discover_sitemaps_from_robots(self.client, self.config.base_url(), self.normalize)
                .await;

        let mut urls = Vec::new();
        for sitemap in declared {
            if configured.contains(sitemap.trim_end_matches('/')) {
                continue;
            }
            tracing::info!("Trying sitemap from robots.txt: {}", sitemap);
            urls.extend(self.read_sitemap(&sitemap, visit).await);
        }

        tracing::info!("robots.txt sitemaps produced {} URLs", urls.len());
        urls
    }

    /// Host filter, canonicalization, dedup and truncation
    fn finalize(&self, collected: Vec<String>, allowed_hosts: &[String]) -> Vec<String> {
        let allowed: HashSet<String> = allowed_hosts
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();
        let root = self
            .config
            .discovery
            .auto_subdomains
            .then(|| self.primary_root_domain())
            .flatten();

        let total = collected.len();
        let scoped = collected
            .iter()
            .filter(|url| match host_of(url) {
                Some(host) => {
                    allowed.contains(&host)
                        || root
                            .as_deref()
                            .is_some_and(|root| is_same_root_domain(&host, root))
                }
                None => false,
            })
            .map(|url| normalize_url(url, self.normalize));
        let mut urls = dedup_by_canonical_key(scoped);

        let kept = urls.len();
        urls.truncate(self.config.filters.max_urls);

        tracing::info!(
            "Collected {} URLs ({} raw, {} after scope and dedup, {} after budget)",
            urls.len(),
            total,
            kept,
            urls.len()
        );
        urls
    }

    fn primary_root_domain(&self) -> Option<String> {
        host_of(self.config.base_url()).map(|host| root_domain(&host))
    }
}

/// Keeps one URL per canonical `(host, path)` key in first-seen order.
/// A query-free URL replaces an earlier variant of the same key that
/// carried a query.
fn dedup_by_canonical_key(urls: impl Iterator<Item = String>) -> Vec<String> {
    let mut index: HashMap<_, usize> = HashMap::new();
    let mut kept: Vec<String> = Vec::new();
    for url in urls {
        let key = canonical_key(&url);
        if let Some(&slot) = index.get(&key) {
            if kept[slot].contains('?') && !url.contains('?') {
                kept[slot] = url;
            }
        } else {
            index.insert(key, kept.len());
            kept.push(url);
        }
    }
    kept
}

/// Literal URLs of a static source, falling back to its `url`
fn static_urls(source: &SourceConfig) -> Vec<String> {
    if !source.urls.is_empty() {
        source.urls.clone()
    } else if !source.url.trim().is_empty() {
        vec![source.url.clone()]
    } else {
        Vec::new()
    }
}

fn source_label(source: &SourceConfig) -> String {
    match source.kind {
        SourceKind::Static => format!("{} URLs", source.urls.len().max(1)),
        _ => source.url.clone(),
    }
}
