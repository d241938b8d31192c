use crate::crawler::{fetch_text, SITEMAP_TIMEOUT};
use crate::sitemap::{parse_sitemap, SitemapDocument};
use crate::url::{normalize_url, NormalizeOptions};
use crate::SitemapError;
use reqwest::Client;
use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Boxed future returned by the recursive sitemap expansion
pub type ExpandFuture<'b> =
    Pin<Box<dyn Future<Output = Result<Vec<String>, SitemapError>> + Send + 'b>>;

/// Sitemap URLs already fetched during a run
///
/// Shared across every sitemap source and every level of index recursion,
/// so cyclic or repeated index references are fetched at most once.
#[derive(Debug, Default)]
pub struct SitemapVisit {
    visited: HashSet<String>,
}

impl SitemapVisit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `url`; returns false if it was already visited
    pub fn mark(&mut self, url: &str) -> bool {
        self.visited.insert(normalize_url(url, NormalizeOptions::CANONICAL))
    }

    pub fn contains(&self, url: &str) -> bool {
        self.visited.contains(&normalize_url(url, NormalizeOptions::CANONICAL))
    }

    /// Number of distinct sitemap documents visited
    pub fn len(&self) -> usize {
        self.visited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }
}

/// Fetches sitemaps and expands sitemap indexes into page URLs
#[derive(Debug, Clone)]
pub struct SitemapReader<'a> {
    client: &'a Client,
    timeout: Duration,
}

impl<'a> SitemapReader<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self {
            client,
            timeout: SITEMAP_TIMEOUT,
        }
    }

    /// Overrides the per-document fetch timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Expands one sitemap with a fresh visited set
    pub async fn expand(&self, url: &str) -> Result<Vec<String>, SitemapError> {
        let mut visit = SitemapVisit::new();
        self.fetch_and_expand(url, &mut visit).await
    }

    /// Fetches `url` and returns every page URL it leads to
    ///
    /// A `<urlset>` yields its `<loc>` values. A `<sitemapindex>` is expanded
    /// recursively; a child that fails to fetch or parse is logged and
    /// contributes nothing. Any other root element yields no URLs. A URL
    /// already present in `visit` is skipped without a request.
    ///
    /// # Errors
    ///
    /// Only a failure of `url` itself is returned: `SitemapError::Fetch` for
    /// a transport error or non-2xx status, `SitemapError::Parse` for
    /// malformed XML.
    pub fn fetch_and_expand<'b>(
        &'b self,
        url: &'b str,
        visit: &'b mut SitemapVisit,
    ) -> ExpandFuture<'b> {
        Box::pin(async move {
            if !visit.mark(url) {
                tracing::debug!("Sitemap {} already visited, skipping", url);
                return Ok(Vec::new());
            }

            tracing::debug!("Fetching sitemap {}", url);
            let page = fetch_text(self.client, url, self.timeout).await?;
            let document = parse_sitemap(&page.body).map_err(|e| SitemapError::Parse {
                url: url.to_string(),
                message: e.to_string(),
            })?;

            match document {
                SitemapDocument::UrlSet(urls) => {
                    tracing::debug!("Sitemap {} lists {} URLs", url, urls.len());
                    Ok(urls)
                }
                SitemapDocument::Index(children) => {
                    tracing::debug!(
                        "Sitemap index {} lists {} child sitemaps",
                        url,
                        children.len()
                    );
                    let mut urls = Vec::new();
                    for child in &children {
                        match self.fetch_and_expand(child, visit).await {
                            Ok(found) => urls.extend(found),
                            Err(e) => tracing::warn!("Skipping child sitemap {}: {}", child, e),
                        }
                    }
                    Ok(urls)
                }
                SitemapDocument::Unknown(root) => {
                    tracing::warn!(
                        "Sitemap {} has unexpected root element <{}>; no URLs taken",
                        url,
                        root
                    );
                    Ok(Vec::new())
                }
            }
        })
    }
}
