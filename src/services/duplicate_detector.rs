//! Duplicate link detection.
//!
//! Two links are duplicates when their URLs normalize to the same string.
//! Every later occurrence is paired with the first link seen for that
//! normalized URL, never with an intermediate duplicate.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::types::link::Link;

/// How many originals a duplicate report previews.
pub const PREVIEW_LIMIT: usize = 5;

/// A duplicate link and the first-seen link it repeats.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicatePair {
    pub original_id: String,
    pub duplicate_id: String,
}

/// Pair list plus a short preview for a confirmation prompt.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateReport {
    pub pairs: Vec<DuplicatePair>,
    /// `(title, url)` of the originals of the first few pairs.
    pub preview: Vec<(String, String)>,
    /// Pairs not covered by `preview`.
    pub more: usize,
}

/// Comparison key: lower-cased, scheme, leading `www.` and one trailing
/// slash removed.
pub fn normalize(url: &str) -> String {
    let lower = url.to_lowercase();
    let rest = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"))
        .unwrap_or(&lower);
    let rest = rest.strip_prefix("www.").unwrap_or(rest);
    rest.strip_suffix('/').unwrap_or(rest).to_string()
}

/// Scans `links` in order and pairs every repeat with its first occurrence.
pub fn find_duplicates(links: &[Link]) -> Vec<DuplicatePair> {
    let mut first_seen: HashMap<String, &str> = HashMap::new();
    let mut emitted: HashSet<(&str, &str)> = HashSet::new();
    let mut pairs = Vec::new();

    for link in links {
        let key = normalize(&link.url);
        match first_seen.get(&key) {
            Some(&original) => {
                if emitted.insert((original, link.id.as_str())) {
                    pairs.push(DuplicatePair {
                        original_id: original.to_string(),
                        duplicate_id: link.id.clone(),
                    });
                }
            }
            None => {
                first_seen.insert(key, link.id.as_str());
            }
        }
    }
    pairs
}

/// Ids to delete for the given pairs. Ids that only ever appear as an
/// original are not included.
pub fn removal_ids(pairs: &[DuplicatePair]) -> HashSet<String> {
    pairs.iter().map(|p| p.duplicate_id.clone()).collect()
}

/// Builds the confirmation report for `pairs` found in `links`.
pub fn report(links: &[Link], pairs: Vec<DuplicatePair>) -> DuplicateReport {
    let preview: Vec<(String, String)> = pairs
        .iter()
        .take(PREVIEW_LIMIT)
        .filter_map(|pair| links.iter().find(|l| l.id == pair.original_id))
        .map(|l| (l.title.clone(), l.url.clone()))
        .collect();
    let more = pairs.len().saturating_sub(PREVIEW_LIMIT);
    DuplicateReport {
        pairs,
        preview,
        more,
    }
}
