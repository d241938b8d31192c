use crate::classify::groups::{auto_group_from_path, group_for_root, group_weight, OTHER_GROUP};
use crate::classify::rules::{
    compile_rules, default_exclude_rules, CompiledRule, LanguageFilter,
};
use crate::config::Config;
use crate::url::{canonical_key, normalize_url, NormalizeOptions};
use crate::ConfigError;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;
use url::Url;

/// Upper bound of a page score
pub const MAX_SCORE: i32 = 200;

/// A classified page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageEntry {
    /// Canonical URL
    pub url: String,
    /// Site-relative path, without the query
    pub path: String,
    pub group: String,
    /// Priority of the include rule that matched, 0 otherwise
    pub priority: i32,
    /// Importance in `0..=200`
    pub score: i32,
}

/// Computes the importance score of a page
///
/// `weight(group) + 2 * priority (when positive) - 2 * depth`, plus 10 for
/// the root path, clamped to `0..=200`. Depth is the number of path
/// segments minus one.
pub fn compute_score(group: &str, priority: i32, path: &str) -> i32 {
    let segments = path.split('/').filter(|s| !s.is_empty()).count() as i32;
    let depth = (segments - 1).max(0);

    let mut score = group_weight(group);
    if priority > 0 {
        score += priority * 2;
    }
    score -= depth * 2;

    if path == "/" || path.is_empty() {
        score += 10;
    }

    score.clamp(0, MAX_SCORE)
}

/// Ordering of classified pages: group, then score descending, then path
pub fn page_order(a: &PageEntry, b: &PageEntry) -> Ordering {
    a.group
        .cmp(&b.group)
        .then_with(|| b.score.cmp(&a.score))
        .then_with(|| a.path.cmp(&b.path))
}

/// Rules and settings compiled once per run
#[derive(Debug, Clone)]
pub struct Classifier {
    include: Vec<CompiledRule>,
    exclude: Vec<CompiledRule>,
    language: Option<LanguageFilter>,
    auto_group: bool,
    normalize: NormalizeOptions,
}

impl Classifier {
    /// Compiles the include, exclude and language rules of `config`
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let filters = &config.filters;

        let mut exclude = if filters.use_default_excludes {
            default_exclude_rules()?
        } else {
            Vec::new()
        };
        exclude.extend(compile_rules(&filters.exclude)?);

        let language = if filters.auto_filter_languages {
            Some(LanguageFilter::new(&config.site.default_language)?)
        } else {
            None
        };

        Ok(Self {
            include: compile_rules(&filters.include)?,
            exclude,
            language,
            auto_group: filters.auto_group,
            normalize: NormalizeOptions::CANONICAL.prefer_https(config.crawler.prefer_https),
        })
    }

    /// Classifies one URL, or returns `None` if it is filtered out
    ///
    /// The URL is canonicalized first. Language detection sees the path
    /// only; rules see the path with the query appended. When any include
    /// rule matches, only `^...$` exclude rules can still drop the page.
    pub fn classify_url(&self, raw: &str) -> Option<PageEntry> {
        let canonical = normalize_url(raw, self.normalize);
        let url = match Url::parse(&canonical) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("Skipping unparseable URL {}: {}", raw, e);
                return None;
            }
        };

        let path = match url.path() {
            "" => "/".to_string(),
            p => p.to_string(),
        };
        let target = match url.query() {
            Some(query) => format!("{}?{}", path, query),
            None => path.clone(),
        };

        if let Some(language) = &self.language {
            if language.is_foreign(&path) {
                tracing::debug!("Dropping {}: non-default language", raw);
                return None;
            }
        }

        let include_match = self.include.iter().find(|r| r.matches(&target));

        // Include matches narrow exclusion to exact-anchored rules
        let excluded = match include_match {
            Some(_) => self
                .exclude
                .iter()
                .any(|r| r.is_anchored() && r.matches(&target)),
            None => self.exclude.iter().any(|r| r.matches(&target)),
        };
        if excluded {
            tracing::debug!("Excluding {}", raw);
            return None;
        }

        let (group, priority) = match include_match {
            Some(rule) => (
                rule.group.clone().unwrap_or_else(|| OTHER_GROUP.to_string()),
                rule.priority,
            ),
            None if !self.auto_group => (OTHER_GROUP.to_string(), 0),
            None if path == "/" => {
                let host = url.host_str().unwrap_or_default();
                (group_for_root(host).to_string(), 0)
            }
            None => (auto_group_from_path(&path), 0),
        };

        let score = compute_score(&group, priority, &path);
        Some(PageEntry {
            url: canonical,
            path,
            group,
            priority,
            score,
        })
    }

    /// Classifies, deduplicates and sorts a URL list
    ///
    /// One entry is kept per canonical `(host, path)` key; the first
    /// surviving occurrence wins, so a filtered-out variant such as
    /// `/blog?page=2` never hides `/blog`.
    pub fn classify(&self, urls: &[String]) -> Vec<PageEntry> {
        let mut seen = HashSet::new();
        let mut pages: Vec<PageEntry> = urls
            .iter()
            .filter_map(|url| self.classify_url(url))
            .filter(|page| seen.insert(canonical_key(&page.url)))
            .collect();

        pages.sort_by(page_order);
        tracing::info!(
            "Classified {} of {} URLs into page entries",
            pages.len(),
            urls.len()
        );
        pages
    }
}

/// Classifies `urls` with the rules in `config`
///
/// # Errors
///
/// `ConfigError::InvalidPattern` if a filter rule does not compile.
pub fn classify(urls: &[String], config: &Config) -> Result<Vec<PageEntry>, ConfigError> {
    Ok(Classifier::new(config)?.classify(urls))
}
