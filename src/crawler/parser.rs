//! HTML parser for extracting links
//!
//! Anchors are pulled out of fetched pages with `scraper`. Besides the usual
//! non-navigational hrefs, the filter rejects the noise that broken
//! server-side rendering leaves in markup: component class names leaking
//! into hrefs, e-mail addresses without `mailto:`, and bare words that only
//! look like relative links.

use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Extracts candidate links from an HTML document
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` with an absolute http(s) URL, a root-relative path,
///   a query (`?x=1`), or an explicit `./` / `../` relative path
///
/// **Exclude:**
/// - Empty hrefs and `javascript:`, `mailto:`, `tel:` or `#` prefixes
/// - Hrefs containing `classname`, or anchors whose class mentions
///   `classname` or `react`
/// - Hrefs with `@` that are not absolute http(s) URLs
/// - Bare relative words such as `foo/bar`
///
/// Links are resolved against `base_url`, limited to http(s), and returned
/// in document order without duplicates. Fragments are left for the caller
/// to drop during normalization.
///
/// # Example
///
/// ```
/// use llms_sitemap::crawler::extract_links;
/// use url::Url;
///
/// let html = r#"<a href="/pricing">Pricing</a><a href="mailto:a@b.c">Mail</a>"#;
/// let base = Url::parse("https://example.com/").unwrap();
/// assert_eq!(extract_links(html, &base), vec!["https://example.com/pricing"]);
/// ```
pub fn extract_links(html: &str, base_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let class = element.value().attr("class").unwrap_or("");

        if is_noise_link(href, class) {
            continue;
        }

        if let Some(absolute) = resolve_link(href, base_url) {
            if seen.insert(absolute.clone()) {
                links.push(absolute);
            }
        }
    }

    links
}

/// True for hrefs that are not real navigation targets
fn is_noise_link(href: &str, class: &str) -> bool {
    let href = href.trim().to_lowercase();
    if href.is_empty() {
        return true;
    }

    if ["javascript:", "mailto:", "tel:", "#"]
        .iter()
        .any(|prefix| href.starts_with(prefix))
    {
        return true;
    }

    let class = class.to_lowercase();
    if href.contains("classname") || class.contains("classname") || class.contains("react") {
        return true;
    }

    let absolute = href.starts_with("http://") || href.starts_with("https://");
    if href.contains('@') && !absolute {
        return true;
    }

    let relative_ok = ["/", "?", "./", "../"]
        .iter()
        .any(|prefix| href.starts_with(prefix));
    !absolute && !relative_ok
}

/// Resolves a link href to an absolute http(s) URL
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let absolute = base_url.join(href.trim()).ok()?;
    match absolute.scheme() {
        "http" | "https" => Some(absolute.to_string()),
        _ => None,
    }
}
