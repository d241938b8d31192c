//! Per-crawl robots.txt cache
//!
//! Each origin's robots.txt is fetched at most once per crawl. A robots.txt
//! that cannot be fetched is cached as allow-all.

use crate::robots::{fetch_robots, ParsedRobots};
use reqwest::Client;
use std::collections::HashMap;
use url::Url;

/// Robots.txt rules keyed by origin (`scheme://host[:port]`)
#[derive(Debug, Default)]
pub struct RobotsCache {
    entries: HashMap<String, ParsedRobots>,
}

impl RobotsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks `url` against its origin's robots.txt, fetching it on first use
    pub async fn is_allowed(&mut self, client: &Client, url: &str, user_agent: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return true;
        };
        let origin = parsed.origin().ascii_serialization();

        if !self.entries.contains_key(&origin) {
            let robots = match fetch_robots(client, &origin).await {
                Ok(robots) => robots,
                Err(e) => {
                    tracing::debug!("No robots.txt for {} ({}); allowing all", origin, e);
                    ParsedRobots::allow_all()
                }
            };
            self.entries.insert(origin.clone(), robots);
        }

        self.entries
            .get(&origin)
            .map_or(true, |robots| robots.is_allowed(url, user_agent))
    }

    /// Number of origins cached
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
