//! Integration tests against wiremock servers

mod collector_tests;
mod common;
mod crawl_tests;
mod discovery_tests;
mod sitemap_tests;
