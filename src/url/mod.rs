//! URL handling module for llms-sitemap
//!
//! This module provides URL normalization, domain extraction, root-domain
//! heuristics and the asset-extension filter shared by every discovery path.

mod domain;
mod extension;
mod normalize;

// Re-export main functions
pub use domain::{extract_domain, host_of, is_same_root_domain, root_domain};
pub use extension::should_skip_by_extension;
pub use normalize::{canonical_key, normalize_url, CanonicalKey, NormalizeOptions};
