//! Unit tests for duplicate detection and duplicate removal.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;

use linkshelf::database::MemoryStore;
use linkshelf::managers::collection_store::{CollectionStore, CollectionStoreTrait, Confirmation};
use linkshelf::services::duplicate_detector::{
    find_duplicates, normalize, removal_ids, report, DuplicatePair, PREVIEW_LIMIT,
};
use linkshelf::types::errors::CollectionError;
use linkshelf::types::group::UNCATEGORIZED_ID;
use linkshelf::types::link::{Link, LinkType};

fn link(id: &str, url: &str) -> Link {
    Link {
        id: id.to_string(),
        url: url.to_string(),
        domain: "a.com".to_string(),
        title: format!("Title {}", id),
        description: String::new(),
        tags: Vec::new(),
        kind: LinkType::Website,
        group: UNCATEGORIZED_ID.to_string(),
        created_at: Utc::now(),
    }
}

#[test]
fn test_normalize_equivalent_forms() {
    for url in ["http://a.com/", "https://www.a.com", "https://a.com", "HTTPS://A.COM/"] {
        assert_eq!(normalize(url), "a.com", "{}", url);
    }
}

#[test]
fn test_star_topology() {
    let links = vec![
        link("1", "http://a.com/"),
        link("2", "https://www.a.com"),
        link("3", "https://a.com"),
    ];
    let pairs = find_duplicates(&links);

    assert_eq!(
        pairs,
        vec![
            DuplicatePair { original_id: "1".into(), duplicate_id: "2".into() },
            DuplicatePair { original_id: "1".into(), duplicate_id: "3".into() },
        ]
    );
    let doomed = removal_ids(&pairs);
    assert_eq!(doomed, HashSet::from(["2".to_string(), "3".to_string()]));
}

#[test]
fn test_distinct_urls_have_no_duplicates() {
    let links = vec![link("1", "https://a.com/x"), link("2", "https://a.com/y")];
    assert!(find_duplicates(&links).is_empty());
}

#[test]
fn test_path_case_is_ignored() {
    let links = vec![link("1", "https://a.com/Page"), link("2", "https://a.com/page/")];
    assert_eq!(find_duplicates(&links).len(), 1);
}

#[test]
fn test_report_preview_is_limited() {
    let mut links = vec![link("orig", "https://a.com")];
    for i in 0..(PREVIEW_LIMIT + 2) {
        links.push(link(&format!("dup{}", i), "https://a.com/"));
    }
    let pairs = find_duplicates(&links);
    let rep = report(&links, pairs);

    assert_eq!(rep.pairs.len(), PREVIEW_LIMIT + 2);
    assert_eq!(rep.preview.len(), PREVIEW_LIMIT);
    assert_eq!(rep.more, 2);
    assert_eq!(rep.preview[0], ("Title orig".to_string(), "https://a.com".to_string()));
}

#[test]
fn test_store_removes_only_duplicates() {
    let mut store = CollectionStore::new(Arc::new(MemoryStore::new()));
    let ids = store
        .add_links("http://a.com/\nhttps://www.a.com\nhttps://a.com\nhttps://b.com", UNCATEGORIZED_ID)
        .unwrap();

    let pairs = store.find_duplicates();
    assert_eq!(pairs.len(), 2);
    assert!(pairs.iter().all(|p| p.original_id == ids[0]));

    let err = store.remove_duplicates(&pairs, Confirmation::Pending).unwrap_err();
    assert_eq!(err, CollectionError::ConfirmationRequired(2));
    assert_eq!(store.links().len(), 4);

    let removed = store.remove_duplicates(&pairs, Confirmation::Confirmed).unwrap();
    assert_eq!(removed, 2);
    let remaining: Vec<&str> = store.links().iter().map(|l| l.id.as_str()).collect();
    assert_eq!(remaining, vec![ids[0].as_str(), ids[3].as_str()]);
    assert!(store.find_duplicates().is_empty());
}

#[test]
fn test_remove_duplicates_with_no_pairs_is_noop() {
    let mut store = CollectionStore::new(Arc::new(MemoryStore::new()));
    store.add_links("https://a.com", UNCATEGORIZED_ID).unwrap();
    assert_eq!(store.remove_duplicates(&[], Confirmation::Pending).unwrap(), 0);
}
