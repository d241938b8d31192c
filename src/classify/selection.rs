use crate::classify::classifier::{page_order, PageEntry};
use crate::config::FiltersConfig;
use std::collections::{HashMap, HashSet};

/// Keeps only the groups selected by `only_groups` or a named profile
///
/// An explicit group list wins over the profile. A profile listing `*`
/// selects every group; an unknown profile logs a warning and keeps
/// everything.
pub fn apply_group_profile(
    pages: Vec<PageEntry>,
    filters: &FiltersConfig,
    profile: Option<&str>,
    only_groups: &[String],
) -> Vec<PageEntry> {
    let selected: Option<HashSet<&str>> = if !only_groups.is_empty() {
        Some(only_groups.iter().map(String::as_str).collect())
    } else if let Some(name) = profile {
        match filters.profiles.get(name) {
            None => {
                tracing::warn!("Profile '{}' not found; using all groups", name);
                None
            }
            Some(p) if p.include_groups.iter().any(|g| g == "*") => None,
            Some(p) => Some(p.include_groups.iter().map(String::as_str).collect()),
        }
    } else {
        None
    };

    let Some(selected) = selected else {
        return pages;
    };

    let pages: Vec<PageEntry> = pages
        .into_iter()
        .filter(|p| selected.contains(p.group.as_str()))
        .collect();

    let mut names: Vec<&str> = selected.into_iter().collect();
    names.sort_unstable();
    tracing::info!(
        "Applied group filter; {} pages remain in groups: {}",
        pages.len(),
        names.join(", ")
    );
    pages
}

/// Keeps the highest-scoring pages of each group
///
/// The limit of a group comes from `group-limits`, falling back to
/// `default-group-limit`; a missing or non-positive limit keeps the whole
/// group. The result is re-sorted by group, score and path.
pub fn apply_group_limits(pages: Vec<PageEntry>, filters: &FiltersConfig) -> Vec<PageEntry> {
    if filters.group_limits.is_empty() && filters.default_group_limit.is_none() {
        return pages;
    }

    let mut by_group: HashMap<String, Vec<PageEntry>> = HashMap::new();
    for page in pages {
        by_group.entry(page.group.clone()).or_default().push(page);
    }

    let mut limited = Vec::new();
    for (group, mut group_pages) in by_group {
        let limit = filters
            .group_limits
            .get(&group)
            .copied()
            .or(filters.default_group_limit);

        match limit {
            Some(limit) if limit > 0 => {
                group_pages.sort_by(|a, b| b.score.cmp(&a.score));
                group_pages.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
                limited.extend(group_pages);
            }
            _ => limited.extend(group_pages),
        }
    }

    limited.sort_by(page_order);
    tracing::info!("Applied group limits; {} pages remain", limited.len());
    limited
}

/// Truncates to the first `max_pages` entries when a positive cap is given
pub fn apply_max_pages(mut pages: Vec<PageEntry>, max_pages: Option<usize>) -> Vec<PageEntry> {
    if let Some(max) = max_pages.filter(|&m| m > 0) {
        if pages.len() > max {
            pages.truncate(max);
            tracing::info!("Truncated to first {} pages (max pages)", max);
        }
    }
    pages
}
