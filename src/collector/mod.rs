//! Source collection
//!
//! This module runs every configured source (sitemaps, crawls and static
//! lists) under one global URL budget and produces the run's single
//! deduplicated, domain-scoped URL list.

mod sources;

pub use sources::{Collection, SourceCollector};
