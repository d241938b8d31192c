//! Subdomain discovery
//!
//! Finds other hosts under the site's root domain and turns them into extra
//! sitemap sources and allowed hosts for the collector.

mod augment;
mod subdomains;

pub use augment::{augment_sources, AugmentedSources};
pub use subdomains::SubdomainDiscoverer;
