//! Failed URL records
//!
//! Every URL the crawler gives up on is appended here instead of aborting
//! the run. The log is only for diagnostics; nothing in it is retried.

use crate::FetchError;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A URL that permanently failed to fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedUrl {
    pub url: String,

    /// Human-readable error from the last attempt
    pub error: String,

    /// HTTP status when the server answered, `None` for transport errors
    pub status: Option<u16>,

    pub recorded_at: DateTime<Utc>,
}

/// Append-only collection of failed URLs for one run
#[derive(Debug, Clone, Default, Serialize)]
pub struct FailureLog {
    entries: Vec<FailedUrl>,
}

impl FailureLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `url` as failed with the error of its last attempt
    pub fn record(&mut self, url: &str, error: &FetchError) {
        self.entries.push(FailedUrl {
            url: url.to_string(),
            error: error.to_string(),
            status: error.status(),
            recorded_at: Utc::now(),
        });
    }

    pub fn entries(&self) -> &[FailedUrl] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
