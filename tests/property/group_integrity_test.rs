//! Property-based tests for group reference integrity.
//!
//! These tests apply random sequences of collection operations and verify
//! that every link always references an existing group, that group counts
//! match, and that the sentinel group stays first.

use std::collections::HashSet;
use std::sync::Arc;

use linkshelf::database::MemoryStore;
use linkshelf::managers::collection_store::{BulkAction, CollectionStore, CollectionStoreTrait, Confirmation};
use linkshelf::types::group::UNCATEGORIZED_ID;
use proptest::prelude::*;
use serde_json::json;

#[derive(Debug, Clone)]
enum Op {
    Add(Vec<usize>),
    CreateGroup(String),
    Move { picks: Vec<usize>, group: usize },
    Delete(Vec<usize>),
    AutoGroup(Vec<usize>),
    Bulk { action: usize, picks: Vec<usize>, group: usize },
    RemoveDuplicates,
    Import(Vec<(usize, String)>),
    DeleteAll,
    ToggleAutoGroup,
}

const URLS: &[&str] = &[
    "https://github.com/org/repo",
    "https://www.youtube.com/watch?v=abc",
    "https://youtu.be/xyz",
    "https://en.wikipedia.org/wiki/Rust",
    "https://example.com/some-page",
    "http://example.com/some-page/",
    "https://reddit.com/r/rust",
    "https://perplexity.ai/search",
    "not a url",
];

fn arb_picks() -> impl Strategy<Value = Vec<usize>> {
    proptest::collection::vec(0usize..32, 0..4)
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        proptest::collection::vec(0..URLS.len(), 1..4).prop_map(Op::Add),
        prop_oneof![
            Just("Work".to_string()),
            Just("work".to_string()),
            Just("Programming".to_string()),
            "[A-Z][a-z]{2,6}",
        ]
        .prop_map(Op::CreateGroup),
        (arb_picks(), 0usize..8).prop_map(|(picks, group)| Op::Move { picks, group }),
        arb_picks().prop_map(Op::Delete),
        arb_picks().prop_map(Op::AutoGroup),
        (0usize..4, arb_picks(), 0usize..8).prop_map(|(action, picks, group)| Op::Bulk { action, picks, group }),
        Just(Op::RemoveDuplicates),
        proptest::collection::vec(
            (
                0..URLS.len(),
                prop_oneof![
                    Just("uncategorized".to_string()),
                    Just("Videos".to_string()),
                    Just("old-id".to_string()),
                    Just("missing".to_string()),
                ],
            ),
            0..3
        )
        .prop_map(Op::Import),
        Just(Op::DeleteAll),
        Just(Op::ToggleAutoGroup),
    ]
}

fn pick_ids(store: &CollectionStore, picks: &[usize]) -> HashSet<String> {
    let links = store.links();
    if links.is_empty() {
        return HashSet::new();
    }
    picks.iter().map(|p| links[p % links.len()].id.clone()).collect()
}

fn pick_group(store: &CollectionStore, index: usize) -> String {
    let groups = store.groups();
    match groups.get(index) {
        Some(g) => g.id.clone(),
        None => "no-such-group".to_string(),
    }
}

fn apply(store: &mut CollectionStore, op: &Op, auto_group: &mut bool) {
    match op {
        Op::Add(indices) => {
            let text: Vec<&str> = indices.iter().map(|i| URLS[*i]).collect();
            let _ = store.add_links(&text.join("\n"), UNCATEGORIZED_ID);
        }
        Op::CreateGroup(name) => {
            let _ = store.create_group(name, None);
        }
        Op::Move { picks, group } => {
            let ids = pick_ids(store, picks);
            let target = pick_group(store, *group);
            let _ = store.move_links(&ids, &target);
        }
        Op::Delete(picks) => {
            let ids = pick_ids(store, picks);
            let _ = store.delete_links(&ids, Confirmation::Confirmed);
        }
        Op::AutoGroup(picks) => {
            let ids = pick_ids(store, picks);
            store.auto_group_links(&ids);
        }
        Op::Bulk { action, picks, group } => {
            let action = [None, Some(BulkAction::Move), Some(BulkAction::Delete), Some(BulkAction::AutoGroup)][*action];
            let ids = pick_ids(store, picks);
            let target = pick_group(store, *group);
            let _ = store.bulk_apply(action, &ids, Some(target.as_str()), Confirmation::Confirmed);
        }
        Op::RemoveDuplicates => {
            let pairs = store.find_duplicates();
            let _ = store.remove_duplicates(&pairs, Confirmation::Confirmed);
        }
        Op::Import(entries) => {
            let links: Vec<_> = entries
                .iter()
                .map(|(i, group)| json!({"url": URLS[*i], "group": group}))
                .collect();
            let doc = json!({
                "groups": [{"id": "old-id", "name": "Imported", "color": "#123456"}],
                "links": links,
            });
            let _ = store.import_json(&doc.to_string());
        }
        Op::DeleteAll => {
            let _ = store.delete_all(Confirmation::Confirmed);
        }
        Op::ToggleAutoGroup => {
            *auto_group = !*auto_group;
            store.set_auto_group(*auto_group);
        }
    }
}

fn check_invariants(store: &CollectionStore) -> Result<(), TestCaseError> {
    prop_assert_eq!(store.groups()[0].id.as_str(), UNCATEGORIZED_ID);

    let group_ids: HashSet<&str> = store.groups().iter().map(|g| g.id.as_str()).collect();
    prop_assert_eq!(group_ids.len(), store.groups().len(), "group ids must be unique");

    for link in store.links() {
        prop_assert!(
            group_ids.contains(link.group.as_str()),
            "link {} references missing group {}",
            link.url,
            link.group
        );
    }

    for group in store.groups() {
        let expected = store.links().iter().filter(|l| l.group == group.id).count();
        prop_assert_eq!(group.count, expected, "count of group {}", group.name);
    }
    Ok(())
}

// **Group foreign-key integrity**
//
// *For all* links in the collection after any sequence of operations, the
// link's group SHALL resolve to an existing group id.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(60))]

    #[test]
    fn every_link_references_existing_group(ops in proptest::collection::vec(arb_op(), 1..25)) {
        let backend = Arc::new(MemoryStore::new());
        let mut store = CollectionStore::load(backend.clone());
        let mut auto_group = true;

        for op in &ops {
            apply(&mut store, op, &mut auto_group);
            check_invariants(&store)?;
        }

        // The persisted state must satisfy the same invariants after a reload.
        let reloaded = CollectionStore::load(backend);
        prop_assert_eq!(reloaded.links(), store.links());
        check_invariants(&reloaded)?;
    }
}
