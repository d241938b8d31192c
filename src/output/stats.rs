//! Run summary
//!
//! This module condenses a finished run into group counts and a short
//! sample, logs it, and prints it for the command line.

use crate::classify::PageEntry;
use crate::collector::Collection;
use std::collections::HashMap;

/// Number of entries shown in the summary sample
pub const SAMPLE_SIZE: usize = 10;

/// Summary of one discovery and classification run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Deduplicated URLs collected before classification
    pub collected_urls: usize,

    /// Page entries after classification and truncation
    pub total_pages: usize,

    /// Pages per group, largest group first, ties by name
    pub group_counts: Vec<(String, usize)>,

    /// The first entries of the final list
    pub sample: Vec<PageEntry>,

    /// Hosts found by subdomain discovery
    pub discovered_hosts: Vec<String>,

    /// URLs that permanently failed to fetch
    pub failed_urls: usize,
}

impl RunSummary {
    pub fn new(collection: &Collection, pages: &[PageEntry]) -> Self {
        Self {
            collected_urls: collection.urls.len(),
            total_pages: pages.len(),
            group_counts: group_counts(pages),
            sample: pages.iter().take(SAMPLE_SIZE).cloned().collect(),
            discovered_hosts: collection.discovered_hosts.clone(),
            failed_urls: collection.failures.len(),
        }
    }
}

/// Counts pages per group, sorted by count (descending) then name
pub fn group_counts(pages: &[PageEntry]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for page in pages {
        *counts.entry(page.group.as_str()).or_default() += 1;
    }

    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(group, count)| (group.to_string(), count))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

/// `Group: count (pct%)` for one summary row
pub fn group_line(group: &str, count: usize, total: usize) -> String {
    let percentage = if total > 0 {
        (count as f64 / total as f64) * 100.0
    } else {
        0.0
    };
    format!("{}: {} ({:.1}%)", group, count, percentage)
}

/// Logs the totals and per-group counts at info level
pub fn log_summary(summary: &RunSummary) {
    tracing::info!(
        "Summary: {} URLs collected, {} pages kept, {} failed",
        summary.collected_urls,
        summary.total_pages,
        summary.failed_urls
    );
    for (group, count) in &summary.group_counts {
        tracing::info!("  {}", group_line(group, *count, summary.total_pages));
    }
    if !summary.discovered_hosts.is_empty() {
        tracing::info!("Discovered hosts: {}", summary.discovered_hosts.join(", "));
    }
}

/// Prints the summary to stdout
///
/// # Arguments
///
/// * `summary` - The summary to display
pub fn print_summary(summary: &RunSummary) {
    println!("=== llms-sitemap Summary ===\n");

    println!("Overview:");
    println!("  URLs collected: {}", summary.collected_urls);
    println!("  Pages kept: {}", summary.total_pages);
    println!("  Failed URLs: {}", summary.failed_urls);
    println!();

    if !summary.group_counts.is_empty() {
        println!("Pages by Group:");
        for (group, count) in &summary.group_counts {
            println!("  {}", group_line(group, *count, summary.total_pages));
        }
        println!();
    }

    if !summary.discovered_hosts.is_empty() {
        println!("Discovered Hosts ({}):", summary.discovered_hosts.len());
        for host in &summary.discovered_hosts {
            println!("  - {}", host);
        }
        println!();
    }

    if !summary.sample.is_empty() {
        println!("Sample:");
        for page in &summary.sample {
            println!("  [{}] {:>3}  {}", page.group, page.score, page.url);
        }
    }
}
