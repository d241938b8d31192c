use serde::Deserialize;
use std::collections::HashMap;
use url::Url;

/// Main configuration structure for llms-sitemap
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
    #[serde(default)]
    pub filters: FiltersConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
}

impl Config {
    /// Hosts URLs must belong to in order to survive collection
    ///
    /// Falls back to the host of `site.base-url` when no allowed domains are
    /// configured.
    pub fn allowed_hosts(&self) -> Vec<String> {
        if !self.site.allowed_domains.is_empty() {
            return self
                .site
                .allowed_domains
                .iter()
                .map(|d| d.trim().to_lowercase())
                .collect();
        }

        Url::parse(self.site.base_url.trim())
            .ok()
            .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
            .into_iter()
            .collect()
    }

    /// The base URL without trailing slashes
    pub fn base_url(&self) -> &str {
        self.site.base_url.trim().trim_end_matches('/')
    }
}

/// The site being mapped
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Primary URL of the site, e.g. "https://example.com"
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Language kept by automatic language filtering
    #[serde(rename = "default-language", default = "default_language")]
    pub default_language: String,

    /// Hosts whose URLs are kept; empty means the base URL host only
    #[serde(rename = "allowed-domains", default)]
    pub allowed_domains: Vec<String>,

    /// Free-form site description
    #[serde(default)]
    pub description: Option<String>,
}

/// Kind of URL source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// A sitemap.xml or sitemap index
    Sitemap,
    /// A crawl seeded from `url`
    Crawl,
    /// A literal URL list
    Static,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Sitemap => "sitemap",
            Self::Crawl => "crawl",
            Self::Static => "static",
        };
        f.write_str(name)
    }
}

/// One configured origin of URLs
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    #[serde(rename = "type")]
    pub kind: SourceKind,

    /// Sitemap URL or crawl seed
    #[serde(default)]
    pub url: String,

    /// Maximum link depth for crawl sources
    #[serde(rename = "max-depth", default = "default_source_depth")]
    pub max_depth: u32,

    /// Per-source URL budget; 0 inherits `filters.max-urls`
    #[serde(rename = "max-urls", default)]
    pub max_urls: usize,

    /// Literal URLs for static sources
    #[serde(default)]
    pub urls: Vec<String>,
}

impl SourceConfig {
    /// Creates a sitemap source with default depth and budget
    pub fn sitemap(url: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::Sitemap,
            url: url.into(),
            max_depth: default_source_depth(),
            max_urls: 0,
            urls: Vec::new(),
        }
    }

    /// Creates a crawl source
    pub fn crawl(url: impl Into<String>, max_depth: u32, max_urls: usize) -> Self {
        Self {
            kind: SourceKind::Crawl,
            url: url.into(),
            max_depth,
            max_urls,
            urls: Vec::new(),
        }
    }

    /// Creates a static source from a literal URL list
    pub fn static_list(urls: Vec<String>) -> Self {
        Self {
            kind: SourceKind::Static,
            url: String::new(),
            max_depth: default_source_depth(),
            max_urls: 0,
            urls,
        }
    }
}

/// A regex rule from the include or exclude list
#[derive(Debug, Clone, Deserialize)]
pub struct FilterRule {
    pub pattern: String,

    #[serde(default)]
    pub group: Option<String>,

    #[serde(default)]
    pub priority: i32,
}

impl FilterRule {
    /// A bare pattern with no group and zero priority
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            group: None,
            priority: 0,
        }
    }

    /// A pattern that assigns a group and priority
    pub fn grouped(pattern: impl Into<String>, group: impl Into<String>, priority: i32) -> Self {
        Self {
            pattern: pattern.into(),
            group: Some(group.into()),
            priority,
        }
    }
}

/// Named selection of groups for a run
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileConfig {
    #[serde(rename = "include-groups", default)]
    pub include_groups: Vec<String>,
}

/// Classification and truncation settings
#[derive(Debug, Clone, Deserialize)]
pub struct FiltersConfig {
    #[serde(default)]
    pub include: Vec<FilterRule>,

    #[serde(default)]
    pub exclude: Vec<FilterRule>,

    /// Global URL budget shared by all sources
    #[serde(rename = "max-urls", default = "default_max_urls")]
    pub max_urls: usize,

    #[serde(rename = "auto-group", default = "default_true")]
    pub auto_group: bool,

    #[serde(default)]
    pub profiles: HashMap<String, ProfileConfig>,

    #[serde(rename = "group-limits", default)]
    pub group_limits: HashMap<String, i64>,

    #[serde(rename = "default-group-limit", default)]
    pub default_group_limit: Option<i64>,

    /// Apply the built-in noise excludes (search, pagination, admin, feeds)
    #[serde(rename = "use-default-excludes", default = "default_true")]
    pub use_default_excludes: bool,

    /// Drop pages whose path names a language other than the default
    #[serde(rename = "auto-filter-languages", default = "default_true")]
    pub auto_filter_languages: bool,
}

impl Default for FiltersConfig {
    fn default() -> Self {
        Self {
            include: Vec::new(),
            exclude: Vec::new(),
            max_urls: default_max_urls(),
            auto_group: true,
            profiles: HashMap::new(),
            group_limits: HashMap::new(),
            default_group_limit: None,
            use_default_excludes: true,
            auto_filter_languages: true,
        }
    }
}

/// Crawler politeness and retry behavior
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Sleep `request-delay-ms` before every fetch attempt
    #[serde(default = "default_true")]
    pub polite: bool,

    #[serde(rename = "request-delay-ms", default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Retries after the first attempt for transient failures
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,

    /// Per-request timeout for page fetches
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Rewrite http:// to https:// during canonicalization
    #[serde(rename = "prefer-https", default = "default_true")]
    pub prefer_https: bool,

    /// Skip URLs disallowed by the host's robots.txt
    #[serde(rename = "respect-robots", default)]
    pub respect_robots: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            polite: true,
            request_delay_ms: default_request_delay_ms(),
            max_retries: default_max_retries(),
            timeout_secs: default_timeout_secs(),
            prefer_https: true,
            respect_robots: false,
        }
    }
}

/// Subdomain discovery toggles
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscoveryConfig {
    /// Discover same-root-domain hosts and add their sitemaps as sources
    #[serde(rename = "auto-subdomains", default)]
    pub auto_subdomains: bool,

    /// Use these hosts instead of running discovery
    #[serde(rename = "selected-subdomains", default)]
    pub selected_subdomains: Option<Vec<String>>,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url", default = "default_contact_url")]
    pub contact_url: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
            contact_url: default_contact_url(),
        }
    }
}

impl UserAgentConfig {
    /// Format: CrawlerName/Version (+ContactURL)
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{})",
            self.crawler_name, self.crawler_version, self.contact_url
        )
    }
}

fn default_language() -> String {
    "en".to_string()
}

fn default_source_depth() -> u32 {
    2
}

fn default_max_urls() -> usize {
    1000
}

fn default_true() -> bool {
    true
}

fn default_request_delay_ms() -> u64 {
    250
}

fn default_max_retries() -> u32 {
    4
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_crawler_name() -> String {
    "llms-sitemap".to_string()
}

fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_contact_url() -> String {
    "https://llmstxt.org/".to_string()
}
