//! Sitemap reading
//!
//! Fetches `sitemap.xml` documents, tells a `<urlset>` from a
//! `<sitemapindex>`, and recursively expands indexes into leaf page URLs.

mod parser;
mod reader;

pub use parser::{parse_sitemap, SitemapDocument};
pub use reader::{ExpandFuture, SitemapReader, SitemapVisit};
