//! Classification and ranking
//!
//! This module turns the collected URL list into scored, grouped page
//! entries:
//! - Language filtering and include/exclude rules
//! - Automatic grouping from the first path segment
//! - Scoring and ordering
//! - Profile selection, per-group limits and a page cap

mod classifier;
mod groups;
mod rules;
mod selection;

pub use classifier::{classify, compute_score, page_order, Classifier, PageEntry, MAX_SCORE};
pub use groups::{auto_group_from_path, group_for_root, group_weight, HOME_GROUP, OTHER_GROUP};
pub use rules::{CompiledRule, LanguageFilter, DEFAULT_EXCLUDES};
pub use selection::{apply_group_limits, apply_group_profile, apply_max_pages};
