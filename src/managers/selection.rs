//! The set of link ids the user has ticked for a bulk action.

use std::collections::HashSet;

/// Trait defining selection operations.
pub trait SelectionTrait {
    /// Adds `id` when absent, removes it when present. Returns whether it is now selected.
    fn toggle(&mut self, id: &str) -> bool;
    fn clear(&mut self);
    fn ids(&self) -> &HashSet<String>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool;
    /// Drops ids for which `exists` returns false.
    fn retain_existing(&mut self, exists: &dyn Fn(&str) -> bool);
}

#[derive(Debug, Default, Clone)]
pub struct Selection {
    ids: HashSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SelectionTrait for Selection {
    fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    fn clear(&mut self) {
        self.ids.clear();
    }

    fn ids(&self) -> &HashSet<String> {
        &self.ids
    }

    fn len(&self) -> usize {
        self.ids.len()
    }

    fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn retain_existing(&mut self, exists: &dyn Fn(&str) -> bool) {
        self.ids.retain(|id| exists(id));
    }
}
