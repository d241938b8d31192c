use url::Url;

/// File extensions that never lead to an HTML page
const SKIPPED_EXTENSIONS: &[&str] = &[
    "pdf", "png", "jpg", "jpeg", "gif", "webp", "svg", "ico", "zip", "rar", "7z", "gz", "tgz",
    "mp4", "mov", "avi", "mp3", "wav", "woff", "woff2", "ttf", "eot",
];

/// True if the URL path ends in a known binary/asset extension
///
/// Only the path is inspected; a query string such as `?format=pdf` does not
/// count. Matching is case-insensitive.
pub fn should_skip_by_extension(raw: &str) -> bool {
    let path = match Url::parse(raw.trim()) {
        Ok(url) => url.path().to_string(),
        Err(_) => raw
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    };

    let last_segment = path.rsplit('/').next().unwrap_or_default();
    match last_segment.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            let ext = ext.to_ascii_lowercase();
            SKIPPED_EXTENSIONS.contains(&ext.as_str())
        }
        _ => false,
    }
}
