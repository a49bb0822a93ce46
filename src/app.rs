//! App Core for linkshelf.
//!
//! Central struct holding storage, the collection store, settings and the
//! current selection.

use std::sync::Arc;

use tracing::info;

use crate::database::{Database, KeyValueStore, SqliteStore};
use crate::managers::collection_store::{CollectionStore, CollectionStoreTrait, Confirmation};
use crate::managers::selection::{Selection, SelectionTrait};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::group::UNCATEGORIZED_ID;

pub struct App {
    pub storage: Arc<dyn KeyValueStore>,
    pub store: CollectionStore,
    pub settings_engine: SettingsEngine,
    pub selection: Selection,
    /// Group new links fall into when detection finds nothing.
    pub current_group: String,
}

impl App {
    /// Opens (or creates) the SQLite database at `db_path` and loads state from it.
    pub fn new(db_path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let db = Database::open(db_path)?;
        info!(path = db_path, "database opened");
        Ok(Self::with_storage(Arc::new(SqliteStore::new(db))))
    }

    /// Loads settings and both collections from `storage`.
    pub fn with_storage(storage: Arc<dyn KeyValueStore>) -> Self {
        let mut settings_engine = SettingsEngine::new(storage.clone());
        settings_engine.load();

        let store = CollectionStore::load(storage.clone());

        let mut app = Self {
            storage,
            store,
            settings_engine,
            selection: Selection::new(),
            current_group: UNCATEGORIZED_ID.to_string(),
        };
        app.apply_settings();
        app
    }

    /// Pushes settings that affect core behavior into the store.
    pub fn apply_settings(&mut self) {
        let auto_group = self.settings_engine.get_settings().auto_group;
        self.store.set_auto_group(auto_group);
    }

    /// Confirmation to pass to a destructive operation. With the
    /// `confirmDelete` setting off every request counts as confirmed.
    pub fn confirmation(&self, confirmed: bool) -> Confirmation {
        if self.settings_engine.get_settings().confirm_delete {
            Confirmation::from(confirmed)
        } else {
            Confirmation::Confirmed
        }
    }

    /// Switches the default group for new links. Unknown ids are ignored.
    pub fn set_current_group(&mut self, group_id: &str) -> bool {
        if self.store.group(group_id).is_some() {
            self.current_group = group_id.to_string();
            true
        } else {
            false
        }
    }

    /// Drops selected ids whose link no longer exists.
    pub fn prune_selection(&mut self) {
        let store = &self.store;
        self.selection
            .retain_existing(&|id: &str| store.link(id).is_some());
    }
}
