//! Crawl frontier and URL priority heuristic
//!
//! This module handles:
//! - The static per-URL priority used to order the crawl
//! - The priority queue of URLs waiting to be fetched

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use url::Url;

/// Path fragments of pages that describe the product itself
const HIGH_PRIORITY: &[&str] = &[
    "/products",
    "/pricing",
    "/docs",
    "/documentation",
    "/features",
    "/solutions",
    "/api",
    "/guides",
    "/blog",
];

const MEDIUM_PRIORITY: &[&str] = &[
    "/resources",
    "/case-studies",
    "/about",
    "/contact",
    "/help",
    "/faq",
    "/integrations",
];

const LOW_PRIORITY: &[&str] = &[
    "/careers", "/jobs", "/press", "/news", "/legal", "/privacy", "/terms", "/cookies",
];

/// Static crawl priority of a URL; higher is fetched first
///
/// | Tier | Score | Example paths |
/// |------|-------|---------------|
/// | high | 3 | `/products`, `/pricing`, `/docs`, `/blog` |
/// | medium | 2 | `/about`, `/faq`, `/integrations` |
/// | default | 1 | anything else |
/// | low | 0 | `/careers`, `/press`, `/legal` |
///
/// Tiers are checked high to low by substring on the lowercased path, so
/// `/docs/legal` is high.
pub fn url_priority(url: &str) -> i32 {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_lowercase(),
        Err(_) => url.to_lowercase(),
    };

    let in_tier = |tier: &[&str]| tier.iter().any(|fragment| path.contains(fragment));

    if in_tier(HIGH_PRIORITY) {
        3
    } else if in_tier(MEDIUM_PRIORITY) {
        2
    } else if in_tier(LOW_PRIORITY) {
        0
    } else {
        1
    }
}

/// A URL queued for fetching with priority information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedUrl {
    /// The URL to fetch (already normalized)
    pub url: String,

    /// Link distance from the crawl seed
    pub depth: u32,

    /// Priority value (higher is fetched first)
    pub priority: i32,

    /// Insertion order, breaks ties between equal priorities
    pub sequence: u64,
}

// BinaryHeap is a max-heap: the greatest entry pops first. Higher priority
// is greater; among equal priorities the earlier sequence is greater.
impl Ord for QueuedUrl {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for QueuedUrl {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue of URLs waiting to be fetched
///
/// Pops in strictly descending priority, first-in-first-out among equal
/// priorities.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<QueuedUrl>,
    next_sequence: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `url` at `depth` with its [`url_priority`]
    pub fn push(&mut self, url: String, depth: u32) {
        let priority = url_priority(&url);
        tracing::trace!("Queueing {} (priority {}, depth {})", url, priority, depth);
        self.heap.push(QueuedUrl {
            url,
            depth,
            priority,
            sequence: self.next_sequence,
        });
        self.next_sequence += 1;
    }

    pub fn pop(&mut self) -> Option<QueuedUrl> {
        self.heap.pop()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
