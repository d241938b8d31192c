use crate::config::FilterRule;
use crate::ConfigError;
use regex::Regex;

/// Built-in noise excludes: admin, search, pagination, taxonomy, feeds
pub const DEFAULT_EXCLUDES: &[&str] = &[
    r"/wp-admin/",
    r"/wp-json/",
    r"/search",
    r"[?&]s=",
    r"[?&]page=\d+",
    r"/page/\d+/?$",
    r"/tag/",
    r"/category/",
    r"/feed/?$",
    r"\.xml$",
    r"\.rss$",
    r"/404",
];

/// A filter rule with its pattern compiled
#[derive(Debug, Clone)]
pub struct CompiledRule {
    regex: Regex,
    anchored: bool,
    pub group: Option<String>,
    pub priority: i32,
}

impl CompiledRule {
    pub fn compile(rule: &FilterRule) -> Result<Self, ConfigError> {
        let regex = Regex::new(&rule.pattern).map_err(|e| {
            ConfigError::InvalidPattern(format!("'{}': {}", rule.pattern, e))
        })?;
        Ok(Self {
            regex,
            anchored: rule.pattern.starts_with('^') && rule.pattern.ends_with('$'),
            group: rule.group.clone(),
            priority: rule.priority,
        })
    }

    /// True if the pattern is found anywhere in `target`
    pub fn matches(&self, target: &str) -> bool {
        self.regex.is_match(target)
    }

    /// True for `^...$` patterns, the only excludes an include match cannot
    /// override
    pub fn is_anchored(&self) -> bool {
        self.anchored
    }
}

/// Compiles a rule list, failing on the first invalid pattern
pub fn compile_rules(rules: &[FilterRule]) -> Result<Vec<CompiledRule>, ConfigError> {
    rules.iter().map(CompiledRule::compile).collect()
}

/// The built-in excludes as compiled rules
pub fn default_exclude_rules() -> Result<Vec<CompiledRule>, ConfigError> {
    DEFAULT_EXCLUDES
        .iter()
        .map(|pattern| CompiledRule::compile(&FilterRule::new(*pattern)))
        .collect()
}

/// Detects language codes such as `/de/` or `/zh-hk/` in a path
#[derive(Debug, Clone)]
pub struct LanguageFilter {
    leading: Regex,
    anywhere: Regex,
    default_language: String,
}

impl LanguageFilter {
    pub fn new(default_language: &str) -> Result<Self, ConfigError> {
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern(e.to_string()))
        };
        Ok(Self {
            leading: compile(r"^/([a-z]{2})(?:[-_][a-zA-Z]{2})?/")?,
            anywhere: compile(r"/([a-z]{2})(?:[-_][a-zA-Z]{2})?/")?,
            default_language: default_language.trim().to_lowercase(),
        })
    }

    /// The two-letter language named by `path`, preferring a leading segment
    pub fn detect(&self, path: &str) -> Option<String> {
        self.leading
            .captures(path)
            .or_else(|| self.anywhere.captures(path))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_lowercase())
    }

    /// True if `path` names a language other than the default one
    pub fn is_foreign(&self, path: &str) -> bool {
        self.detect(path)
            .is_some_and(|lang| lang != self.default_language)
    }
}
