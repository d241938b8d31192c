//! llms-sitemap: page discovery and ranking for llms.txt manifests
//!
//! This crate discovers the public pages of a website (sitemaps, a polite
//! priority-ordered crawler and static lists), canonicalizes and deduplicates
//! them, and classifies the result into scored, grouped page entries.

pub mod classify;
pub mod collector;
pub mod config;
pub mod crawler;
pub mod discovery;
pub mod output;
pub mod robots;
pub mod sitemap;
pub mod url;

use thiserror::Error;

/// Configuration-specific errors
///
/// These are the only errors that abort a run, and they are raised before any
/// network activity begins.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
}

/// A single HTTP fetch that did not produce a usable response
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {url} failed: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Cannot fetch {url}: not an absolute http(s) URL")]
    InvalidUrl { url: String },
}

impl FetchError {
    /// Builds a fetch error from a reqwest failure, separating out timeouts
    pub fn from_reqwest(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else {
            Self::Transport {
                url: url.to_string(),
                source,
            }
        }
    }

    /// The HTTP status this error carries, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            Self::Timeout { .. } | Self::InvalidUrl { .. } => None,
        }
    }
}

/// Sitemap-specific errors
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("Failed to fetch sitemap: {0}")]
    Fetch(#[from] FetchError),

    #[error("Malformed sitemap XML at {url}: {message}")]
    Parse { url: String, message: String },
}

// Re-export commonly used types
pub use classify::{classify, Classifier, PageEntry};
pub use collector::{Collection, SourceCollector};
pub use config::Config;
pub use output::{FailedUrl, FailureLog};
pub use url::{normalize_url, should_skip_by_extension, NormalizeOptions};
