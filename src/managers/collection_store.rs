//! Collection Store for linkshelf.
//!
//! Implements `CollectionStoreTrait`: the only owner of the link and group
//! collections. Every successful mutation recomputes group counts and then
//! writes the affected collections to the key-value store. Write failures
//! are logged and otherwise ignored; memory stays authoritative.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::database::kv_store::{KeyValueStore, GROUPS_KEY, LINKS_KEY};
use crate::services::classifier::{self, GROUP_RULES};
use crate::services::duplicate_detector::{self, DuplicatePair, DuplicateReport};
use crate::services::input_normalizer;
use crate::services::url_canonicalizer::{canonicalize, domain_of};
use crate::types::backup::{BackupDocument, ImportDocument, ImportSummary, BACKUP_VERSION};
use crate::types::errors::{CollectionError, StorageError};
use crate::types::group::{Group, DEFAULT_GROUP_COLOR, UNCATEGORIZED_ID};
use crate::types::link::{ImportedLink, Link};

/// Whether the caller has confirmed a destructive operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Pending,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Confirmation::Confirmed
        } else {
            Confirmation::Pending
        }
    }
}

/// Actions applicable to a selection of links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    Move,
    Delete,
    /// Re-run group detection on each selected link. Parsed from `"group"`.
    AutoGroup,
}

impl BulkAction {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "move" => Some(BulkAction::Move),
            "delete" => Some(BulkAction::Delete),
            "group" => Some(BulkAction::AutoGroup),
            _ => None,
        }
    }
}

/// Trait defining collection mutation and read operations.
pub trait CollectionStoreTrait {
    fn links(&self) -> &[Link];
    fn groups(&self) -> &[Group];
    fn link(&self, id: &str) -> Option<&Link>;
    fn group(&self, id: &str) -> Option<&Group>;
    /// Parses `raw_text` and appends one link per valid line. Returns the new ids.
    fn add_links(&mut self, raw_text: &str, default_group_id: &str) -> Result<Vec<String>, CollectionError>;
    fn move_links(&mut self, ids: &HashSet<String>, target_group_id: &str) -> Result<usize, CollectionError>;
    fn move_link(&mut self, id: &str, target_group_id: &str) -> Result<bool, CollectionError>;
    fn delete_links(&mut self, ids: &HashSet<String>, confirm: Confirmation) -> Result<usize, CollectionError>;
    fn delete_link(&mut self, id: &str, confirm: Confirmation) -> Result<bool, CollectionError>;
    fn delete_all(&mut self, confirm: Confirmation) -> Result<usize, CollectionError>;
    fn create_group(&mut self, name: &str, color: Option<&str>) -> Result<String, CollectionError>;
    fn auto_group_links(&mut self, ids: &HashSet<String>) -> usize;
    fn bulk_apply(
        &mut self,
        action: Option<BulkAction>,
        ids: &HashSet<String>,
        target_group_id: Option<&str>,
        confirm: Confirmation,
    ) -> Result<usize, CollectionError>;
    fn find_duplicates(&self) -> Vec<DuplicatePair>;
    fn duplicate_report(&self) -> DuplicateReport;
    fn remove_duplicates(&mut self, pairs: &[DuplicatePair], confirm: Confirmation) -> Result<usize, CollectionError>;
    fn merge_import(&mut self, doc: ImportDocument) -> ImportSummary;
    fn import_json(&mut self, text: &str) -> Result<ImportSummary, CollectionError>;
    fn export_json(&self) -> Result<String, StorageError>;
    fn recompute_group_counts(&mut self);
}

/// In-memory collection with write-behind persistence.
pub struct CollectionStore {
    links: Vec<Link>,
    groups: Vec<Group>,
    storage: Arc<dyn KeyValueStore>,
    auto_group: bool,
}

impl CollectionStore {
    /// Creates an empty collection holding only the sentinel group.
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            links: Vec::new(),
            groups: vec![Group::uncategorized()],
            storage,
            auto_group: true,
        }
    }

    /// Loads both collections from `storage`.
    ///
    /// A missing, unreadable or malformed entry falls back to its default.
    /// The sentinel group is moved to (or inserted at) the front, and link
    /// group references that do not name a group are repaired. Repairs,
    /// including groups created for detection labels, are written back.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let links: Vec<Link> = Self::read_or_default(storage.as_ref(), LINKS_KEY);
        let mut groups: Vec<Group> = Self::read_or_default(storage.as_ref(), GROUPS_KEY);

        match groups.iter().position(Group::is_sentinel) {
            Some(0) => {}
            Some(pos) => {
                let sentinel = groups.remove(pos);
                groups.insert(0, sentinel);
            }
            None => groups.insert(0, Group::uncategorized()),
        }

        let mut store = Self {
            links,
            groups,
            storage,
            auto_group: true,
        };

        let groups_before = store.groups.len();
        let mut repaired = 0;
        for i in 0..store.links.len() {
            let current = store.links[i].group.clone();
            let resolved = store.resolve_group_reference(&current);
            if resolved != current {
                store.links[i].group = resolved;
                repaired += 1;
            }
        }
        if repaired > 0 {
            warn!(repaired, "repaired link group references on load");
        }

        store.recompute_group_counts();
        if store.groups.len() != groups_before {
            store.save_groups();
        }
        if repaired > 0 {
            store.save_links();
        }
        info!(
            links = store.links.len(),
            groups = store.groups.len(),
            "collection loaded"
        );
        store
    }

    /// Toggles group detection during [`CollectionStoreTrait::add_links`].
    pub fn set_auto_group(&mut self, enabled: bool) {
        self.auto_group = enabled;
    }

    fn read_or_default<T: serde::de::DeserializeOwned + Default>(
        storage: &dyn KeyValueStore,
        key: &str,
    ) -> T {
        match storage.get(key) {
            Ok(Some(value)) => serde_json::from_value(value).unwrap_or_else(|e| {
                warn!(key, error = %e, "stored value is malformed, using default");
                T::default()
            }),
            Ok(None) => T::default(),
            Err(e) => {
                warn!(key, error = %e, "failed to read from storage, using default");
                T::default()
            }
        }
    }

    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let result = serde_json::to_value(value)
            .map_err(StorageError::from)
            .and_then(|v| self.storage.set(key, &v));
        if let Err(e) = result {
            warn!(key, error = %e, "failed to persist collection");
        }
    }

    fn save_links(&self) {
        self.write(LINKS_KEY, &self.links);
    }

    fn save_groups(&self) {
        self.write(GROUPS_KEY, &self.groups);
    }

    /// Recomputes counts, then persists links and, when requested, groups.
    fn commit(&mut self, groups_changed: bool) {
        self.recompute_group_counts();
        self.save_links();
        if groups_changed {
            self.save_groups();
        }
    }

    fn group_exists(&self, id: &str) -> bool {
        self.groups.iter().any(|g| g.id == id)
    }

    fn find_group_by_name(&self, name: &str) -> Option<&Group> {
        let wanted = name.to_lowercase();
        self.groups.iter().find(|g| g.name.to_lowercase() == wanted)
    }

    fn push_group(&mut self, name: &str, color: &str) -> String {
        let id = Uuid::new_v4().to_string();
        self.groups.push(Group {
            id: id.clone(),
            name: name.to_string(),
            color: color.to_string(),
            count: 0,
        });
        id
    }

    /// Id of the group named `label`, creating it when missing.
    fn resolve_label(&mut self, label: &str) -> String {
        if let Some(group) = self.find_group_by_name(label) {
            return group.id.clone();
        }
        let id = self.push_group(label, DEFAULT_GROUP_COLOR);
        debug!(label, id = %id, "created group for detected label");
        id
    }

    /// Maps a stored group reference onto an existing group id.
    ///
    /// Accepts a group id, a group name, or a detection label; anything else
    /// lands in the sentinel group.
    fn resolve_group_reference(&mut self, value: &str) -> String {
        if self.group_exists(value) {
            return value.to_string();
        }
        if let Some(group) = self.find_group_by_name(value) {
            return group.id.clone();
        }
        if GROUP_RULES.iter().any(|(_, label)| *label == value) {
            return self.resolve_label(value);
        }
        UNCATEGORIZED_ID.to_string()
    }

    fn build_imported_link(
        &mut self,
        imported: ImportedLink,
        group_ids: &HashMap<String, String>,
    ) -> Option<Link> {
        let url = canonicalize(&imported.url)?;
        let domain = imported
            .domain
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| domain_of(url.as_str()));
        let derived = classifier::classify(&url, &domain, imported.title.as_deref().unwrap_or(""));

        let group = match imported.group.as_deref() {
            Some(value) => {
                let mapped = group_ids.get(value).map(String::as_str).unwrap_or(value);
                self.resolve_group_reference(mapped)
            }
            None => UNCATEGORIZED_ID.to_string(),
        };

        let mut tags: Vec<String> = Vec::new();
        for tag in imported.tags.unwrap_or(derived.tags) {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        Some(Link {
            id: Uuid::new_v4().to_string(),
            url: url.into_string(),
            domain,
            title: derived.title,
            description: imported.description.unwrap_or(derived.description),
            tags,
            kind: imported.kind.unwrap_or(derived.kind),
            group,
            created_at: imported.created_at.unwrap_or_else(Utc::now),
        })
    }

    fn ensure_confirmed(confirm: Confirmation, count: usize) -> Result<(), CollectionError> {
        match confirm {
            Confirmation::Confirmed => Ok(()),
            Confirmation::Pending => Err(CollectionError::ConfirmationRequired(count)),
        }
    }
}

impl CollectionStoreTrait for CollectionStore {
    fn links(&self) -> &[Link] {
        &self.links
    }

    fn groups(&self) -> &[Group] {
        &self.groups
    }

    fn link(&self, id: &str) -> Option<&Link> {
        self.links.iter().find(|l| l.id == id)
    }

    fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    fn add_links(&mut self, raw_text: &str, default_group_id: &str) -> Result<Vec<String>, CollectionError> {
        let parsed = input_normalizer::parse_block(raw_text);
        if parsed.is_empty() {
            return Err(CollectionError::NoValidInput);
        }

        let default_group = if self.group_exists(default_group_id) {
            default_group_id.to_string()
        } else {
            warn!(default_group_id, "unknown default group, using uncategorized");
            UNCATEGORIZED_ID.to_string()
        };

        let groups_before = self.groups.len();
        let now = Utc::now();
        let mut ids = Vec::with_capacity(parsed.len());

        for line in parsed {
            let domain = domain_of(line.url.as_str());
            let derived = classifier::classify(&line.url, &domain, &line.title);
            let group = match derived.group_label {
                Some(label) if self.auto_group => self.resolve_label(label),
                _ => default_group.clone(),
            };

            let id = Uuid::new_v4().to_string();
            self.links.push(Link {
                id: id.clone(),
                url: line.url.into_string(),
                domain,
                title: derived.title,
                description: derived.description,
                tags: derived.tags,
                kind: derived.kind,
                group,
                created_at: now,
            });
            ids.push(id);
        }

        self.commit(self.groups.len() != groups_before);
        info!(added = ids.len(), "links added");
        Ok(ids)
    }

    fn move_links(&mut self, ids: &HashSet<String>, target_group_id: &str) -> Result<usize, CollectionError> {
        if !self.group_exists(target_group_id) {
            return Err(CollectionError::GroupNotFound(target_group_id.to_string()));
        }

        let mut moved = 0;
        for link in self.links.iter_mut() {
            if ids.contains(&link.id) && link.group != target_group_id {
                link.group = target_group_id.to_string();
                moved += 1;
            }
        }

        if moved > 0 {
            self.commit(false);
            info!(moved, target = target_group_id, "links moved");
        }
        Ok(moved)
    }

    fn move_link(&mut self, id: &str, target_group_id: &str) -> Result<bool, CollectionError> {
        let ids = HashSet::from([id.to_string()]);
        Ok(self.move_links(&ids, target_group_id)? > 0)
    }

    fn delete_links(&mut self, ids: &HashSet<String>, confirm: Confirmation) -> Result<usize, CollectionError> {
        let matching = self.links.iter().filter(|l| ids.contains(&l.id)).count();
        if matching == 0 {
            return Ok(0);
        }
        Self::ensure_confirmed(confirm, matching)?;

        self.links.retain(|l| !ids.contains(&l.id));
        self.commit(false);
        info!(deleted = matching, "links deleted");
        Ok(matching)
    }

    fn delete_link(&mut self, id: &str, confirm: Confirmation) -> Result<bool, CollectionError> {
        let ids = HashSet::from([id.to_string()]);
        Ok(self.delete_links(&ids, confirm)? > 0)
    }

    fn delete_all(&mut self, confirm: Confirmation) -> Result<usize, CollectionError> {
        let count = self.links.len();
        if count == 0 {
            return Ok(0);
        }
        Self::ensure_confirmed(confirm, count)?;

        self.links.clear();
        self.commit(false);
        info!(deleted = count, "all links cleared");
        Ok(count)
    }

    fn create_group(&mut self, name: &str, color: Option<&str>) -> Result<String, CollectionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CollectionError::EmptyGroupName);
        }
        if self.find_group_by_name(name).is_some() {
            return Err(CollectionError::DuplicateGroupName(name.to_string()));
        }

        let color = color.filter(|c| !c.is_empty()).unwrap_or(DEFAULT_GROUP_COLOR);
        let id = self.push_group(name, color);
        self.recompute_group_counts();
        self.save_groups();
        info!(name, id = %id, "group created");
        Ok(id)
    }

    fn auto_group_links(&mut self, ids: &HashSet<String>) -> usize {
        let detected: Vec<(usize, &'static str)> = self
            .links
            .iter()
            .enumerate()
            .filter(|(_, l)| ids.contains(&l.id))
            .filter_map(|(i, l)| classifier::detect_group(&l.domain).map(|label| (i, label)))
            .collect();

        let groups_before = self.groups.len();
        let mut changed = 0;
        for (i, label) in detected {
            let group_id = self.resolve_label(label);
            if self.links[i].group != group_id {
                self.links[i].group = group_id;
                changed += 1;
            }
        }

        let groups_changed = self.groups.len() != groups_before;
        if changed > 0 || groups_changed {
            self.commit(groups_changed);
            info!(changed, "links auto-grouped");
        }
        changed
    }

    fn bulk_apply(
        &mut self,
        action: Option<BulkAction>,
        ids: &HashSet<String>,
        target_group_id: Option<&str>,
        confirm: Confirmation,
    ) -> Result<usize, CollectionError> {
        let action = action.ok_or(CollectionError::NoActionSelected)?;
        match action {
            BulkAction::Move => {
                let target = target_group_id
                    .filter(|t| !t.is_empty())
                    .ok_or(CollectionError::NoTargetGroup)?;
                self.move_links(ids, target)
            }
            BulkAction::Delete => self.delete_links(ids, confirm),
            BulkAction::AutoGroup => Ok(self.auto_group_links(ids)),
        }
    }

    fn find_duplicates(&self) -> Vec<DuplicatePair> {
        duplicate_detector::find_duplicates(&self.links)
    }

    fn duplicate_report(&self) -> DuplicateReport {
        duplicate_detector::report(&self.links, self.find_duplicates())
    }

    fn remove_duplicates(&mut self, pairs: &[DuplicatePair], confirm: Confirmation) -> Result<usize, CollectionError> {
        let doomed = duplicate_detector::removal_ids(pairs);
        let removed = self.delete_links(&doomed, confirm)?;
        if removed > 0 {
            info!(removed, "duplicate links removed");
        }
        Ok(removed)
    }

    fn merge_import(&mut self, doc: ImportDocument) -> ImportSummary {
        let mut summary = ImportSummary::default();
        let mut group_ids: HashMap<String, String> = HashMap::new();

        for imported in doc.groups {
            let existing = self
                .groups
                .iter()
                .find(|g| g.name == imported.name)
                .map(|g| g.id.clone());
            let id = match existing {
                Some(id) => id,
                None => {
                    let color = imported.color.as_deref().unwrap_or(DEFAULT_GROUP_COLOR);
                    summary.groups_added += 1;
                    self.push_group(&imported.name, color)
                }
            };
            if let Some(old_id) = imported.id {
                group_ids.insert(old_id, id);
            }
        }

        for imported in doc.links {
            let literal = canonicalize(&imported.url).map(|u| u.into_string());
            if let Some(url) = &literal {
                if self.links.iter().any(|l| &l.url == url) {
                    continue;
                }
            }
            let raw = imported.url.clone();
            match self.build_imported_link(imported, &group_ids) {
                Some(link) => {
                    self.links.push(link);
                    summary.links_added += 1;
                }
                None => {
                    debug!(url = %raw, "skipping imported link with invalid URL");
                    summary.links_skipped += 1;
                }
            }
        }

        self.commit(true);
        info!(
            links_added = summary.links_added,
            links_skipped = summary.links_skipped,
            groups_added = summary.groups_added,
            "backup merged"
        );
        summary
    }

    fn import_json(&mut self, text: &str) -> Result<ImportSummary, CollectionError> {
        let doc = ImportDocument::from_json(text)?;
        Ok(self.merge_import(doc))
    }

    fn export_json(&self) -> Result<String, StorageError> {
        let doc = BackupDocument {
            links: &self.links,
            groups: &self.groups,
            exported_at: Utc::now(),
            version: BACKUP_VERSION,
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    fn recompute_group_counts(&mut self) {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for link in &self.links {
            *counts.entry(link.group.as_str()).or_insert(0) += 1;
        }
        for group in self.groups.iter_mut() {
            group.count = counts.get(group.id.as_str()).copied().unwrap_or(0);
        }
    }
}
