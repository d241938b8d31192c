use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// The port is not part of the result.
///
/// # Arguments
///
/// * `url` - The URL to extract the domain from
///
/// # Returns
///
/// * `Some(String)` - The lowercase domain/host
/// * `None` - If the URL has no host
///
/// # Examples
///
/// ```
/// use url::Url;
/// use llms_sitemap::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Parses `raw` and returns its lowercase host, if any
pub fn host_of(raw: &str) -> Option<String> {
    Url::parse(raw.trim()).ok().as_ref().and_then(extract_domain)
}

/// Returns the last two dot-separated labels of a host
///
/// This is a coarse same-site heuristic, not public-suffix aware:
/// `shop.example.co.uk` yields `co.uk`.
///
/// # Examples
///
/// ```
/// use llms_sitemap::url::root_domain;
///
/// assert_eq!(root_domain("docs.example.com"), "example.com");
/// assert_eq!(root_domain("localhost"), "localhost");
/// ```
pub fn root_domain(host: &str) -> String {
    let host = host.trim().trim_end_matches('.').to_lowercase();
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() <= 2 {
        return host;
    }
    labels[labels.len() - 2..].join(".")
}

/// True if `host` is `root` itself or one of its subdomains
pub fn is_same_root_domain(host: &str, root: &str) -> bool {
    let host = host.to_lowercase();
    let root = root.to_lowercase();
    if root.is_empty() {
        return false;
    }
    host == root || host.ends_with(&format!(".{}", root))
}
