//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with retry logic
//! - HTML parsing and link extraction
//! - The priority frontier
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::{CrawlOutcome, CrawlRequest, Crawler, StopReason};
pub use fetcher::{
    backoff_delay, build_http_client, fetch_text, fetch_with_retry, is_html_content_type,
    parse_retry_after, AttemptOutcome, FetchedPage, RetryPolicy, ACCEPT_HEADER, DISCOVERY_TIMEOUT,
    SITEMAP_TIMEOUT,
};
pub use parser::extract_links;
pub use scheduler::{url_priority, Frontier, QueuedUrl};
