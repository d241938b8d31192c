//! Configuration module for llms-sitemap
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use llms_sitemap::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("llms-sitemap.toml")).unwrap();
//! println!("Global URL budget: {}", config.filters.max_urls);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, DiscoveryConfig, FilterRule, FiltersConfig, ProfileConfig,
    SiteConfig, SourceConfig, SourceKind, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
