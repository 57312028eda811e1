// src/services/links.rs

//! Link extraction from parsed documents.

use std::collections::HashSet;

use scraper::{Html, Selector};
use url::Url;

use crate::utils::resolve_url;

/// Collect the `attr` values of every element matching `selector`.
///
/// Values are deduplicated within the call and returned in first-seen
/// document order. Elements without the attribute, or with an empty one,
/// are skipped. Returns an empty vector when nothing matches.
pub fn extract_links(document: &Html, selector: &Selector, attr: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    document
        .select(selector)
        .filter_map(|el| el.value().attr(attr))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .filter(|href| seen.insert(*href))
        .map(str::to_string)
        .collect()
}

/// Read `attr` from the first element matching `selector`.
///
/// Only the first match is consulted; a missing or blank attribute there
/// yields `None` even if later matches carry one.
pub fn extract_first_link(document: &Html, selector: &Selector, attr: &str) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(str::to_string)
}

/// Resolve links against `base`, dropping duplicates produced by resolution.
pub fn resolve_all(base: &Url, links: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    links
        .into_iter()
        .map(|href| resolve_url(base, &href))
        .filter(|link| seen.insert(link.clone()))
        .collect()
}
