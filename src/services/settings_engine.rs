// linkshelf Settings Engine
// Manages user settings: loading, saving, updating individual values, and resetting to defaults.
// Settings are stored as one JSON document in the key-value store.

use std::sync::Arc;

use tracing::warn;

use crate::database::kv_store::{KeyValueStore, SETTINGS_KEY};
use crate::types::errors::SettingsError;
use crate::types::settings::LinkSettings;

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> LinkSettings;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &LinkSettings;
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
}

/// Settings engine persisting through a [`KeyValueStore`].
pub struct SettingsEngine {
    storage: Arc<dyn KeyValueStore>,
    settings: LinkSettings,
}

impl SettingsEngine {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            settings: LinkSettings::default(),
        }
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads settings from storage.
    ///
    /// Absent, unreadable or malformed settings fall back to defaults; the
    /// failure is logged, never returned.
    fn load(&mut self) -> LinkSettings {
        self.settings = match self.storage.get(SETTINGS_KEY) {
            Ok(Some(value)) => serde_json::from_value(value).unwrap_or_else(|e| {
                warn!(error = %e, "stored settings are malformed, using defaults");
                LinkSettings::default()
            }),
            Ok(None) => LinkSettings::default(),
            Err(e) => {
                warn!(error = %e, "failed to read settings, using defaults");
                LinkSettings::default()
            }
        };
        self.settings.clone()
    }

    fn save(&self) -> Result<(), SettingsError> {
        let value = serde_json::to_value(&self.settings).map_err(|e| {
            SettingsError::Serialization(format!("Failed to serialize settings: {}", e))
        })?;
        self.storage.set(SETTINGS_KEY, &value)?;
        Ok(())
    }

    fn get_settings(&self) -> &LinkSettings {
        &self.settings
    }

    /// Updates one setting by its JSON key (`"confirmDelete"`, `"faviconSize"`, ...).
    ///
    /// The new value is validated by deserializing the patched document back
    /// into `LinkSettings`. The updated settings are saved immediately; a
    /// failed save is logged and the in-memory value kept.
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError> {
        if key.is_empty() {
            return Err(SettingsError::InvalidKey("Key cannot be empty".to_string()));
        }

        let mut json_value = serde_json::to_value(&self.settings).map_err(|e| {
            SettingsError::Serialization(format!("Failed to serialize settings: {}", e))
        })?;

        match json_value.as_object_mut() {
            Some(map) if map.contains_key(key) => {
                map.insert(key.to_string(), value);
            }
            _ => {
                return Err(SettingsError::InvalidKey(format!(
                    "Key '{}' not found in settings",
                    key
                )))
            }
        }

        let new_settings: LinkSettings = serde_json::from_value(json_value).map_err(|e| {
            SettingsError::InvalidValue(format!("Invalid value for key '{}': {}", key, e))
        })?;
        self.settings = new_settings;

        if let Err(e) = self.save() {
            warn!(key, error = %e, "failed to persist settings");
        }
        Ok(())
    }

    /// Restores factory defaults and saves them.
    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = LinkSettings::default();
        self.save()
    }
}
