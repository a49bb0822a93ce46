//! Read-only views over the collection for the rendering layer.
//!
//! Filtering, sorting, statistics and favicon URLs. Nothing here mutates
//! state; callers pass slices and receive owned snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::link::Link;

/// Favicon service endpoint. The image itself is never fetched here.
pub const FAVICON_SERVICE: &str = "https://www.google.com/s2/favicons";

/// Group predicate of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GroupFilter {
    #[default]
    All,
    Only(String),
}

impl GroupFilter {
    /// `"all"` or an empty string selects every group.
    pub fn parse(value: &str) -> Self {
        if value.is_empty() || value == "all" {
            GroupFilter::All
        } else {
            GroupFilter::Only(value.to_string())
        }
    }

    fn matches(&self, link: &Link) -> bool {
        match self {
            GroupFilter::All => true,
            GroupFilter::Only(id) => &link.group == id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    Title,
    Domain,
}

impl SortOrder {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "newest" => Some(SortOrder::Newest),
            "oldest" => Some(SortOrder::Oldest),
            "title" => Some(SortOrder::Title),
            "domain" => Some(SortOrder::Domain),
            _ => None,
        }
    }
}

/// Parameters of one listing request.
#[derive(Debug, Clone, Default)]
pub struct LinkQuery {
    pub search: String,
    pub group: GroupFilter,
    pub sort: SortOrder,
}

/// Collection-wide counters shown next to the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_links: usize,
    pub total_groups: usize,
    pub today_links: usize,
}

/// Case-insensitive substring match against title, description, domain,
/// url and every tag.
pub fn matches_search(link: &Link, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    link.title.to_lowercase().contains(&term)
        || link.description.to_lowercase().contains(&term)
        || link.domain.to_lowercase().contains(&term)
        || link.url.to_lowercase().contains(&term)
        || link.tags.iter().any(|t| t.to_lowercase().contains(&term))
}

/// Filtered, sorted copy of `links`. Ties keep collection order.
pub fn snapshot(links: &[Link], query: &LinkQuery) -> Vec<Link> {
    let mut out: Vec<Link> = links
        .iter()
        .filter(|l| query.group.matches(l) && matches_search(l, &query.search))
        .cloned()
        .collect();

    match query.sort {
        SortOrder::Newest => out.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOrder::Oldest => out.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortOrder::Title => out.sort_by(|a, b| a.title.cmp(&b.title)),
        SortOrder::Domain => out.sort_by(|a, b| a.domain.cmp(&b.domain)),
    }
    out
}

pub fn statistics(links: &[Link], group_count: usize, now: DateTime<Utc>) -> Statistics {
    let today = now.date_naive();
    Statistics {
        total_links: links.len(),
        total_groups: group_count,
        today_links: links
            .iter()
            .filter(|l| l.created_at.date_naive() == today)
            .count(),
    }
}

pub fn favicon_url(domain: &str, size: u32) -> String {
    format!(
        "{}?domain={}&sz={}",
        FAVICON_SERVICE,
        urlencoding::encode(domain),
        size
    )
}
