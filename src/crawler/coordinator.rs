//! Crawler coordinator - main crawl loop
//!
//! This module contains the loop that coordinates one crawl invocation:
//! - Seeding and draining the priority frontier
//! - Domain scoping, including dynamic admission of same-root subdomains
//! - Fetching with retry and recording permanent failures
//! - Extracting and enqueueing links from HTML pages

use crate::config::{Config, CrawlerConfig};
use crate::crawler::fetcher::{fetch_with_retry, RetryPolicy};
use crate::crawler::parser::extract_links;
use crate::crawler::scheduler::Frontier;
use crate::output::FailureLog;
use crate::robots::RobotsCache;
use crate::url::{
    host_of, is_same_root_domain, normalize_url, should_skip_by_extension, NormalizeOptions,
};
use reqwest::Client;
use std::collections::HashSet;
use url::Url;

/// Inputs of a single crawl
#[derive(Debug, Clone)]
pub struct CrawlRequest {
    /// Start URLs, all queued at depth 0
    pub seeds: Vec<String>,

    /// Stop once this many pages have been accepted
    pub max_urls: usize,

    /// Pages at this depth are accepted but their links are not followed
    pub max_depth: u32,

    /// Hosts the crawl may visit (lowercase, no port)
    pub allowed_hosts: Vec<String>,

    /// Root domain used for dynamic subdomain admission
    pub root_domain: Option<String>,

    /// Admit any host under `root_domain` as it is encountered
    pub allow_same_root_subdomains: bool,
}

impl CrawlRequest {
    /// A single-seed crawl limited to the seed's own host
    pub fn new(seed: impl Into<String>, max_urls: usize, max_depth: u32) -> Self {
        let seed = seed.into();
        let allowed_hosts = host_of(&seed).into_iter().collect();
        Self {
            seeds: vec![seed],
            max_urls,
            max_depth,
            allowed_hosts,
            root_domain: None,
            allow_same_root_subdomains: false,
        }
    }

    /// True if `host` may be admitted dynamically
    fn admits_subdomain(&self, host: &str) -> bool {
        self.allow_same_root_subdomains
            && self
                .root_domain
                .as_deref()
                .is_some_and(|root| is_same_root_domain(host, root))
    }
}

/// Why a crawl stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// `max_urls` pages were accepted
    BudgetReached,
    /// Nothing left to visit
    FrontierExhausted,
}

/// Result of one crawl
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    /// Accepted HTML pages, in fetch order
    pub urls: Vec<String>,

    /// Distinct URLs dequeued and checked
    pub visited: usize,

    pub stop_reason: StopReason,
}

/// Polite, priority-ordered, single-threaded crawler
///
/// Fetches are strictly sequential: the frontier is drained one URL at a
/// time in priority order, which keeps politeness delays and fetch order
/// reproducible.
pub struct Crawler<'a> {
    client: &'a Client,
    policy: RetryPolicy,
    normalize: NormalizeOptions,
    robots_agent: Option<String>,
}

impl<'a> Crawler<'a> {
    /// Creates a crawler using `config`'s retry, politeness and
    /// canonicalization settings
    pub fn new(client: &'a Client, config: &CrawlerConfig) -> Self {
        Self {
            client,
            policy: RetryPolicy::from_config(config),
            normalize: NormalizeOptions::CANONICAL.prefer_https(config.prefer_https),
            robots_agent: None,
        }
    }

    /// Creates a crawler for a full configuration, honoring
    /// `crawler.respect-robots`
    pub fn from_config(client: &'a Client, config: &Config) -> Self {
        let crawler = Self::new(client, &config.crawler);
        if config.crawler.respect_robots {
            crawler.respect_robots(config.user_agent.crawler_name.clone())
        } else {
            crawler
        }
    }

    /// Skips URLs that robots.txt disallows for `user_agent`
    pub fn respect_robots(mut self, user_agent: impl Into<String>) -> Self {
        self.robots_agent = Some(user_agent.into());
        self
    }

    /// Runs the main crawl loop
    ///
    /// # Crawl Flow
    ///
    /// 1. Pop the highest-priority URL (FIFO among equals)
    /// 2. Skip it if already visited
    /// 3. Skip it if its host is not allowed, unless same-root subdomains
    ///    are admitted and it qualifies
    /// 4. Skip asset extensions, and robots.txt disallows when enabled
    /// 5. Fetch with retry; permanent failures go to `failures`
    /// 6. Keep HTML-like pages; below `max_depth`, enqueue their links
    ///
    /// The loop ends when the frontier is empty or `max_urls` pages were
    /// accepted. No URL ever aborts the crawl.
    pub async fn crawl(
        &self,
        request: &CrawlRequest,
        mut failures: Option<&mut FailureLog>,
    ) -> CrawlOutcome {
        let mut frontier = Frontier::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut results: Vec<String> = Vec::new();
        let mut allowed: HashSet<String> = request
            .allowed_hosts
            .iter()
            .map(|h| h.trim().to_lowercase())
            .filter(|h| !h.is_empty())
            .collect();
        let mut robots = RobotsCache::new();

        for seed in &request.seeds {
            frontier.push(normalize_url(seed, self.normalize), 0);
        }

        tracing::info!(
            "Starting crawl from {} (max_depth={}, max_urls={}, allowed_hosts={}, polite={})",
            request.seeds.join(", "),
            request.max_depth,
            request.max_urls,
            allowed.len(),
            self.policy.polite
        );

        let mut iteration = 0u64;
        while results.len() < request.max_urls {
            let Some(current) = frontier.pop() else {
                break;
            };

            iteration += 1;
            if iteration % 10 == 0 {
                tracing::info!(
                    "Crawl progress: visited={}, queued={}, results={}, depth={}",
                    visited.len(),
                    frontier.len(),
                    results.len(),
                    current.depth
                );
            }

            if !visited.insert(current.url.clone()) {
                continue;
            }

            let Some(host) = host_of(&current.url) else {
                tracing::debug!("Skipping {}: no host", current.url);
                continue;
            };

            if !allowed.contains(&host) {
                if request.admits_subdomain(&host) {
                    tracing::debug!("Admitting same-root subdomain {}", host);
                    allowed.insert(host.clone());
                } else {
                    tracing::debug!("Skipping {}: host {} not allowed", current.url, host);
                    continue;
                }
            }

            if should_skip_by_extension(&current.url) {
                tracing::debug!("Skipping asset {}", current.url);
                continue;
            }

            if let Some(agent) = &self.robots_agent {
                if !robots.is_allowed(self.client, &current.url, agent).await {
                    tracing::debug!("Skipping {}: disallowed by robots.txt", current.url);
                    continue;
                }
            }

            let page = match fetch_with_retry(self.client, &current.url, &self.policy).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::warn!("Crawler failed to fetch {}: {}", current.url, e);
                    if let Some(log) = failures.as_deref_mut() {
                        log.record(&current.url, &e);
                    }
                    continue;
                }
            };

            if !page.is_html_like() {
                tracing::debug!(
                    "Discarding {}: non-HTML content type {}",
                    current.url,
                    page.content_type
                );
                continue;
            }

            results.push(current.url.clone());

            if current.depth >= request.max_depth {
                continue;
            }

            let Ok(base) = Url::parse(&current.url) else {
                continue;
            };
            let links = extract_links(&page.body, &base);
            tracing::debug!("Extracted {} links from {}", links.len(), current.url);

            for link in links {
                let link = normalize_url(&link, self.normalize);
                if should_skip_by_extension(&link) {
                    continue;
                }

                let Some(link_host) = host_of(&link) else {
                    continue;
                };
                if request.admits_subdomain(&link_host) {
                    allowed.insert(link_host.clone());
                }

                if visited.contains(&link) || !allowed.contains(&link_host) {
                    continue;
                }

                if results.len() < request.max_urls {
                    frontier.push(link, current.depth + 1);
                }
            }
        }

        let stop_reason = if results.len() >= request.max_urls {
            StopReason::BudgetReached
        } else {
            StopReason::FrontierExhausted
        };

        tracing::info!(
            "Crawl completed: collected {} URLs, visited {} pages",
            results.len(),
            visited.len()
        );
        match stop_reason {
            StopReason::BudgetReached => {
                tracing::info!("Crawl stopped: reached max_urls limit ({})", request.max_urls)
            }
            StopReason::FrontierExhausted => {
                tracing::info!("Crawl stopped: queue exhausted (all reachable pages visited)")
            }
        }

        CrawlOutcome {
            urls: results,
            visited: visited.len(),
            stop_reason,
        }
    }
}
