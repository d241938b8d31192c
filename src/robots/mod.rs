//! Robots.txt handling module
//!
//! This module fetches and parses robots.txt files. They are used in two
//! ways: `Sitemap:` directives point the collector at sitemaps the site did
//! not expose at `/sitemap.xml`, and, when enabled, `Disallow` rules keep the
//! crawler away from excluded paths.

mod cache;
mod parser;

pub use cache::RobotsCache;
pub use parser::ParsedRobots;

use crate::crawler::{fetch_text, DISCOVERY_TIMEOUT};
use crate::url::{normalize_url, NormalizeOptions};
use crate::FetchError;
use reqwest::Client;
use std::collections::HashSet;
use url::Url;

/// The robots.txt URL for the origin of `base_url`
///
/// Returns `None` when `base_url` has no scheme or host.
pub fn robots_url(base_url: &str) -> Option<String> {
    let url = Url::parse(base_url.trim()).ok()?;
    url.host_str()?;
    Some(format!("{}/robots.txt", url.origin().ascii_serialization()))
}

/// Fetches and parses robots.txt for the origin of `base_url`
///
/// # Returns
///
/// * `Ok(ParsedRobots)` - Successfully fetched robots.txt
/// * `Err(FetchError)` - Transport failure or non-2xx status
pub async fn fetch_robots(client: &Client, base_url: &str) -> Result<ParsedRobots, FetchError> {
    let url = robots_url(base_url).ok_or_else(|| FetchError::InvalidUrl {
        url: base_url.to_string(),
    })?;
    let page = fetch_text(client, &url, DISCOVERY_TIMEOUT).await?;
    Ok(ParsedRobots::from_content(&page.body))
}

/// Lists the sitemap URLs declared in the site's robots.txt
///
/// Entries are normalized with `options` (trailing slashes kept) and
/// deduplicated in file order. Any failure yields an empty list.
pub async fn discover_sitemaps_from_robots(
    client: &Client,
    base_url: &str,
    options: NormalizeOptions,
) -> Vec<String> {
    let robots = match fetch_robots(client, base_url).await {
        Ok(robots) => robots,
        Err(e) => {
            tracing::debug!("robots.txt unavailable for {}: {}", base_url, e);
            return Vec::new();
        }
    };

    let options = options.keep_trailing_slash();
    let mut seen = HashSet::new();
    robots
        .sitemaps()
        .into_iter()
        .map(|sitemap| normalize_url(&sitemap, options))
        .filter(|sitemap| seen.insert(sitemap.clone()))
        .collect()
}
