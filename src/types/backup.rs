use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::CollectionError;
use super::group::{Group, ImportedGroup};
use super::link::{ImportedLink, Link};

/// Version tag written into every export.
pub const BACKUP_VERSION: &str = "1.0";

/// Full collection snapshot written by export.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument<'a> {
    pub links: &'a [Link],
    pub groups: &'a [Group],
    pub exported_at: DateTime<Utc>,
    pub version: &'static str,
}

/// Parsed import document, shape-checked but not yet merged.
#[derive(Debug, Clone, Default)]
pub struct ImportDocument {
    pub links: Vec<ImportedLink>,
    pub groups: Vec<ImportedGroup>,
}

#[derive(Deserialize)]
struct RawImport {
    links: Option<Value>,
    #[serde(default)]
    groups: Option<Value>,
}

impl ImportDocument {
    /// Parses an import document from JSON text.
    ///
    /// The `links` array is mandatory; `groups` is optional. Any entry that
    /// does not have the expected shape rejects the whole document.
    pub fn from_json(text: &str) -> Result<Self, CollectionError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| CollectionError::InvalidBackup(e.to_string()))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, CollectionError> {
        let raw: RawImport = serde_json::from_value(value)
            .map_err(|e| CollectionError::InvalidBackup(e.to_string()))?;

        let links = match raw.links {
            Some(Value::Array(items)) => items
                .into_iter()
                .map(serde_json::from_value::<ImportedLink>)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| CollectionError::InvalidBackup(format!("bad link entry: {}", e)))?,
            _ => {
                return Err(CollectionError::InvalidBackup(
                    "missing links array".to_string(),
                ))
            }
        };

        let groups = match raw.groups {
            Some(Value::Array(items)) => items
                .into_iter()
                .map(serde_json::from_value::<ImportedGroup>)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| CollectionError::InvalidBackup(format!("bad group entry: {}", e)))?,
            _ => Vec::new(),
        };

        Ok(Self { links, groups })
    }
}

/// Counts reported by a merge-import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub links_added: usize,
    pub links_skipped: usize,
    pub groups_added: usize,
}
