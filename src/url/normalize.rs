use url::Url;

/// Knobs for [`normalize_url`]
///
/// Every dedup boundary in a run must use the same options, otherwise the
/// same page can slip through twice under two spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Rewrite `http` to `https`
    pub prefer_https: bool,
    /// Remove `#fragment`
    pub drop_fragment: bool,
    /// Remove trailing slashes from non-root paths
    pub strip_trailing_slash: bool,
}

impl NormalizeOptions {
    /// All canonicalization steps enabled
    pub const CANONICAL: Self = Self {
        prefer_https: true,
        drop_fragment: true,
        strip_trailing_slash: true,
    };

    /// Same options with `prefer_https` replaced
    pub fn prefer_https(self, prefer_https: bool) -> Self {
        Self {
            prefer_https,
            ..self
        }
    }

    /// Same options but leaving trailing slashes alone
    pub fn keep_trailing_slash(self) -> Self {
        Self {
            strip_trailing_slash: false,
            ..self
        }
    }
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self::CANONICAL
    }
}

/// Normalized `(host, path)` pair identifying one page
///
/// Scheme, fragment, query and trailing-slash variance are not part of the
/// key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalKey {
    /// Lowercase host, with `:port` when non-default
    pub host: String,
    /// Path without trailing slashes, `/` for the root
    pub path: String,
}

/// Normalizes a URL string for comparison and deduplication
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace and parse
/// 2. Lowercase the host (done by the parser for http/https)
/// 3. Optionally rewrite `http://` to `https://`
/// 4. Optionally remove the fragment
/// 5. Optionally remove trailing slashes from non-root paths; `/` stays
///
/// The function is total: input the URL parser rejects still comes back in
/// a best-effort normalized form instead of failing the pipeline.
///
/// # Examples
///
/// ```
/// use llms_sitemap::url::{normalize_url, NormalizeOptions};
///
/// let url = normalize_url("http://EXAMPLE.COM/docs/#intro", NormalizeOptions::CANONICAL);
/// assert_eq!(url, "https://example.com/docs");
/// ```
pub fn normalize_url(raw: &str, options: NormalizeOptions) -> String {
    let trimmed = raw.trim();
    match Url::parse(trimmed) {
        Ok(url) => normalize_parsed(url, options),
        Err(_) => normalize_unparsed(trimmed, options),
    }
}

fn normalize_parsed(mut url: Url, options: NormalizeOptions) -> String {
    if options.prefer_https && url.scheme() == "http" {
        // Switching between special schemes cannot fail
        let _ = url.set_scheme("https");
    }

    if options.drop_fragment {
        url.set_fragment(None);
    }

    if options.strip_trailing_slash && !url.cannot_be_a_base() {
        let path = url.path();
        if path != "/" && path.ends_with('/') {
            let stripped = strip_trailing_slashes(path);
            url.set_path(&stripped);
        }
    }

    url.into()
}

/// Best-effort normalization of something the URL parser rejected
fn normalize_unparsed(raw: &str, options: NormalizeOptions) -> String {
    let without_fragment = if options.drop_fragment {
        raw.split_once('#').map_or(raw, |(before, _)| before)
    } else {
        raw
    };

    let (path, rest) = match without_fragment.find(['?', '#']) {
        Some(idx) => without_fragment.split_at(idx),
        None => (without_fragment, ""),
    };

    let path = if options.strip_trailing_slash && path.len() > 1 {
        match path.trim_end_matches(|c: char| c == '/' || c.is_whitespace()) {
            "" => "/",
            stripped => stripped,
        }
    } else {
        path
    };

    // Dropping a fragment or slashes can expose whitespace
    format!("{}{}", path, rest).trim().to_string()
}

fn strip_trailing_slashes(path: &str) -> String {
    let stripped = path.trim_end_matches('/');
    if stripped.is_empty() {
        "/".to_string()
    } else {
        stripped.to_string()
    }
}

/// Computes the canonical `(host, path)` key of a URL
pub fn canonical_key(raw: &str) -> CanonicalKey {
    match Url::parse(raw.trim()) {
        Ok(url) => {
            let host = url.host_str().unwrap_or_default().to_lowercase();
            let host = match url.port() {
                Some(port) => format!("{}:{}", host, port),
                None => host,
            };
            CanonicalKey {
                host,
                path: strip_trailing_slashes(url.path()),
            }
        }
        Err(_) => CanonicalKey {
            host: String::new(),
            path: normalize_unparsed(raw.trim(), NormalizeOptions::CANONICAL),
        },
    }
}
