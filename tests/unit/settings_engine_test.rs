//! Unit tests for the SettingsEngine public API.

use std::sync::Arc;

use serde_json::{json, Value};

use linkshelf::database::kv_store::SETTINGS_KEY;
use linkshelf::database::{KeyValueStore, MemoryStore};
use linkshelf::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use linkshelf::types::errors::{SettingsError, StorageError};
use linkshelf::types::settings::LinkSettings;

struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Result<Option<Value>, StorageError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &Value) -> Result<(), StorageError> {
        Err(StorageError::Database("read-only".to_string()))
    }
}

#[test]
fn test_defaults() {
    let s = LinkSettings::default();
    assert!(s.auto_group);
    assert!(s.auto_parse);
    assert!(s.show_favicons);
    assert!(s.confirm_delete);
    assert!(!s.remove_after_open);
    assert_eq!(s.favicon_size, 128);
}

#[test]
fn test_load_without_stored_value_uses_defaults() {
    let mut engine = SettingsEngine::new(Arc::new(MemoryStore::new()));
    assert_eq!(engine.load(), LinkSettings::default());
}

#[test]
fn test_load_partial_document_fills_defaults() {
    let backend = Arc::new(MemoryStore::new());
    backend.set(SETTINGS_KEY, &json!({"faviconSize": 32})).unwrap();

    let mut engine = SettingsEngine::new(backend);
    let loaded = engine.load();
    assert_eq!(loaded.favicon_size, 32);
    assert!(loaded.confirm_delete);
}

#[test]
fn test_load_malformed_document_uses_defaults() {
    let backend = Arc::new(MemoryStore::new());
    backend.set(SETTINGS_KEY, &json!({"faviconSize": "huge"})).unwrap();

    let mut engine = SettingsEngine::new(backend);
    assert_eq!(engine.load(), LinkSettings::default());
}

#[test]
fn test_set_value_persists() {
    let backend = Arc::new(MemoryStore::new());
    let mut engine = SettingsEngine::new(backend.clone());
    engine.set_value("autoGroup", json!(false)).unwrap();
    engine.set_value("faviconSize", json!(64)).unwrap();

    let stored = backend.get(SETTINGS_KEY).unwrap().unwrap();
    assert_eq!(stored["autoGroup"], json!(false));
    assert_eq!(stored["faviconSize"], json!(64));

    let mut reloaded = SettingsEngine::new(backend);
    let s = reloaded.load();
    assert!(!s.auto_group);
    assert_eq!(s.favicon_size, 64);
}

#[test]
fn test_set_value_rejects_bad_input() {
    let mut engine = SettingsEngine::new(Arc::new(MemoryStore::new()));
    assert!(matches!(
        engine.set_value("", json!(true)),
        Err(SettingsError::InvalidKey(_))
    ));
    assert!(matches!(
        engine.set_value("theme", json!("dark")),
        Err(SettingsError::InvalidKey(_))
    ));
    assert!(matches!(
        engine.set_value("faviconSize", json!(-1)),
        Err(SettingsError::InvalidValue(_))
    ));
    assert_eq!(engine.get_settings(), &LinkSettings::default());
}

#[test]
fn test_set_value_survives_failed_save() {
    let mut engine = SettingsEngine::new(Arc::new(ReadOnlyStore));
    engine.set_value("showFavicons", json!(false)).unwrap();
    assert!(!engine.get_settings().show_favicons);
}

#[test]
fn test_reset_restores_defaults() {
    let backend = Arc::new(MemoryStore::new());
    let mut engine = SettingsEngine::new(backend.clone());
    engine.set_value("confirmDelete", json!(false)).unwrap();

    engine.reset().unwrap();
    assert_eq!(engine.get_settings(), &LinkSettings::default());
    assert_eq!(
        backend.get(SETTINGS_KEY).unwrap().unwrap()["confirmDelete"],
        json!(true)
    );
}

#[test]
fn test_reset_reports_storage_failure() {
    let mut engine = SettingsEngine::new(Arc::new(ReadOnlyStore));
    assert!(matches!(engine.reset(), Err(SettingsError::Storage(_))));
}
