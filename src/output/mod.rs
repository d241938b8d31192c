//! Output module for run diagnostics
//!
//! This module handles:
//! - Recording URLs that permanently failed to fetch
//! - Summarizing a run's classified pages for logs and display
//!
//! Rendering llms.txt, JSON or sitemap files is left to downstream tools.

mod failures;
pub mod stats;

pub use failures::{FailedUrl, FailureLog};
pub use stats::{group_counts, group_line, log_summary, print_summary, RunSummary};
