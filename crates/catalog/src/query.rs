//! Search, filter, and pagination over the merged catalog.
//!
//! Pure functions over an already-merged part list. Filters AND-compose
//! and apply before pagination; the page slice keeps the fold's insertion
//! order, no re-sorting happens at query time.

use crate::models::{CatalogPage, CatalogQuery, Part, MAX_PAGE_SIZE};

/// Apply search/filters and slice one page out of the merged set.
pub fn apply(parts: &[Part], query: &CatalogQuery) -> CatalogPage {
    let page = query.page.max(1);
    let limit = query.limit.clamp(1, MAX_PAGE_SIZE);

    let filtered: Vec<&Part> = parts.iter().filter(|part| matches(part, query)).collect();
    let total = filtered.len();

    let start = (page as usize - 1) * limit as usize;
    let end = start + limit as usize;
    let page_parts: Vec<Part> = filtered
        .into_iter()
        .skip(start)
        .take(limit as usize)
        .cloned()
        .collect();

    CatalogPage {
        parts: page_parts,
        page,
        limit,
        total,
        has_more: end < total,
    }
}

fn matches(part: &Part, query: &CatalogQuery) -> bool {
    if let Some(search) = active(&query.search) {
        let needle = search.to_lowercase();
        let hit = part.name.to_lowercase().contains(&needle)
            || part
                .description
                .as_deref()
                .is_some_and(|text| text.to_lowercase().contains(&needle))
            || part.sku.to_lowercase().contains(&needle);
        if !hit {
            return false;
        }
    }

    if let Some(brand) = active(&query.brand) {
        if !contains_ci(part.brand.as_deref(), brand) {
            return false;
        }
    }

    if let Some(model) = active(&query.model) {
        if !contains_ci(part.model.as_deref(), model) {
            return false;
        }
    }

    if let Some(year) = query.year {
        if part.year != Some(year) {
            return false;
        }
    }

    true
}

/// A filter value counts only when present and non-empty.
fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

/// Case-insensitive substring match; an absent field never matches.
fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|text| text.to_lowercase().contains(&needle.to_lowercase()))
}
