use crate::config::types::{Config, FilterRule, SiteConfig, SourceConfig, SourceKind};
use crate::ConfigError;
use regex::Regex;
use url::Url;

/// Validates the entire configuration
///
/// Runs before any network activity; a configuration that fails here never
/// starts a run.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_sources(&config.sources)?;
    validate_rules(&config.filters.include, "include")?;
    validate_rules(&config.filters.exclude, "exclude")?;

    if config.filters.max_urls == 0 {
        return Err(ConfigError::Validation(
            "filters.max-urls must be >= 1".to_string(),
        ));
    }

    if config.crawler.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "crawler.timeout-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates site configuration
fn validate_site_config(site: &SiteConfig) -> Result<(), ConfigError> {
    validate_http_url(&site.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    validate_language_code(&site.default_language)?;

    for domain in &site.allowed_domains {
        validate_domain_string(domain)?;
    }

    Ok(())
}

/// Validates the source list
fn validate_sources(sources: &[SourceConfig]) -> Result<(), ConfigError> {
    if sources.is_empty() {
        return Err(ConfigError::Validation(
            "sources must contain at least one sitemap, crawl, or static source".to_string(),
        ));
    }

    for (idx, source) in sources.iter().enumerate() {
        match source.kind {
            SourceKind::Sitemap | SourceKind::Crawl => {
                if source.url.trim().is_empty() {
                    return Err(ConfigError::Validation(format!(
                        "sources[{}].url is required for type = \"{}\"",
                        idx, source.kind
                    )));
                }
                validate_http_url(&source.url).map_err(|e| {
                    ConfigError::InvalidUrl(format!("sources[{}].url: {}", idx, e))
                })?;
            }
            SourceKind::Static => {
                if source.urls.is_empty() && source.url.trim().is_empty() {
                    return Err(ConfigError::Validation(format!(
                        "sources[{}] is static and needs a non-empty urls list",
                        idx
                    )));
                }
                for (j, url) in source.urls.iter().enumerate() {
                    validate_http_url(url).map_err(|e| {
                        ConfigError::InvalidUrl(format!("sources[{}].urls[{}]: {}", idx, j, e))
                    })?;
                }
            }
        }
    }

    Ok(())
}

/// Checks that every rule pattern compiles
fn validate_rules(rules: &[FilterRule], list: &str) -> Result<(), ConfigError> {
    for rule in rules {
        if rule.pattern.is_empty() {
            return Err(ConfigError::InvalidPattern(format!(
                "filters.{} contains an empty pattern",
                list
            )));
        }
        Regex::new(&rule.pattern).map_err(|e| {
            ConfigError::InvalidPattern(format!("filters.{} '{}': {}", list, rule.pattern, e))
        })?;
    }
    Ok(())
}

/// Checks that a string is an absolute http(s) URL with a host
fn validate_http_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw.trim()).map_err(|e| format!("'{}': {}", raw, e))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(format!("'{}' must use http or https", raw));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(format!("'{}' has no host", raw));
    }

    Ok(())
}

/// ISO 639 style code: 2-3 ASCII letters
fn validate_language_code(lang: &str) -> Result<(), ConfigError> {
    let lang = lang.trim();
    if !(2..=3).contains(&lang.len()) || !lang.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ConfigError::Validation(format!(
            "default-language must be 2-3 letters, got '{}'",
            lang
        )));
    }
    Ok(())
}

/// Validates an allowed-domain entry
fn validate_domain_string(domain: &str) -> Result<(), ConfigError> {
    let domain = domain.trim();

    if domain.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Allowed domain cannot be empty".to_string(),
        ));
    }

    if domain.contains("://") {
        return Err(ConfigError::InvalidPattern(format!(
            "Allowed domain '{}' must not include a scheme",
            domain
        )));
    }

    if domain.contains('/') {
        return Err(ConfigError::InvalidPattern(format!(
            "Allowed domain '{}' must not include a path",
            domain
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::InvalidPattern(format!(
            "Allowed domain '{}' must contain at least one dot (e.g., 'example.com')",
            domain
        )));
    }

    Ok(())
}
