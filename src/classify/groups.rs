//! Automatic grouping and group weights

/// Group used when nothing else applies
pub const OTHER_GROUP: &str = "Other";

/// Group of the site root
pub const HOME_GROUP: &str = "Home";

/// First-segment synonyms, checked in order
const SYNONYMS: &[(&str, &[&str])] = &[
    ("Blog", &["blog", "blogs", "article", "articles", "post", "posts"]),
    (
        "Docs",
        &[
            "doc",
            "docs",
            "documentation",
            "help",
            "guide",
            "guides",
            "developers",
            "developer",
        ],
    ),
    ("Products", &["product", "products", "solution", "solutions"]),
    ("Pricing", &["pricing", "price", "prices", "plan", "plans"]),
    ("About", &["about", "about-us", "company"]),
    ("Support", &["contact", "support"]),
    ("Use Cases", &["case", "cases", "use-case", "use-cases"]),
    (
        "Integrations",
        &["integration", "integrations", "resource", "resources"],
    ),
    (
        "Proxy Locations",
        &["location", "locations", "proxy-location", "proxy-locations"],
    ),
    ("Legal", &["legal", "privacy", "terms", "policy", "policies"]),
    ("Careers", &["career", "careers", "jobs", "hiring"]),
    ("Press", &["press", "news", "newsroom", "media"]),
    ("Partners", &["affiliate", "affiliates", "partner", "partners"]),
    ("Datasets", &["dataset", "datasets", "data"]),
    ("SERP", &["serp", "search"]),
    ("Scrapers", &["scraper", "scrapers", "scraping"]),
    ("Proxies", &["proxy", "proxies"]),
];

/// Base weights by lowercase group name
const WEIGHTS: &[(&[&str], i32)] = &[
    (&["home"], 40),
    (&["products", "product"], 35),
    (&["pricing"], 30),
    (&["docs", "documentation"], 28),
    (&["proxies", "proxy"], 27),
    (&["scrapers", "scraper", "scraping"], 26),
    (&["blog", "blogs"], 25),
    (&["serp"], 24),
    (&["use cases", "usecases"], 24),
    (&["integrations", "integration"], 24),
    (&["datasets", "dataset"], 23),
    (&["proxy locations", "locations"], 22),
    (&["about", "about us"], 20),
    (&["partners", "affiliates"], 19),
    (&["legal"], 18),
    (&["press", "news"], 17),
    (&["careers"], 15),
];

const DEFAULT_WEIGHT: i32 = 10;

fn is_language_segment(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    let is_code = |b: &[u8]| b.iter().all(u8::is_ascii_lowercase);
    match bytes.len() {
        2 => is_code(bytes),
        5 => {
            is_code(&bytes[..2])
                && matches!(bytes[2], b'-' | b'_')
                && bytes[3..].iter().all(u8::is_ascii_alphabetic)
        }
        _ => false,
    }
}

/// Derives a group from a non-root path
///
/// Uses the first path segment, or the second one when the first is a
/// language code such as `de` or `zh-hk`.
pub fn auto_group_from_path(path: &str) -> String {
    if path == "/" {
        return HOME_GROUP.to_string();
    }

    let segments: Vec<String> = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
        .collect();
    let Some(first) = segments.first() else {
        return OTHER_GROUP.to_string();
    };

    let segment = if is_language_segment(first) && segments.len() > 1 {
        &segments[1]
    } else {
        first
    };

    for (group, synonyms) in SYNONYMS {
        if synonyms.contains(&segment.as_str()) {
            return (*group).to_string();
        }
    }

    let name = title_case(&segment.replace('-', " "));
    if name.is_empty() {
        OTHER_GROUP.to_string()
    } else {
        name
    }
}

/// Group of a root page, decided by its host
pub fn group_for_root(host: &str) -> &'static str {
    let host = host.to_lowercase();
    if host.contains("blog") {
        "Blog"
    } else if host.contains("doc") || host.contains("developer") {
        "Docs"
    } else {
        HOME_GROUP
    }
}

/// Base score of a group
pub fn group_weight(group: &str) -> i32 {
    let key = group.to_lowercase();
    WEIGHTS
        .iter()
        .find(|(names, _)| names.contains(&key.as_str()))
        .map_or(DEFAULT_WEIGHT, |(_, weight)| *weight)
}

/// Uppercases the first letter of each word
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
