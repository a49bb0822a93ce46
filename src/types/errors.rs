use thiserror::Error;

// === CollectionError ===

/// Errors reported by collection store operations.
///
/// All of these abort the operation before any state is mutated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CollectionError {
    /// No line of the pasted text survived URL canonicalization.
    #[error("No valid links found in input")]
    NoValidInput,
    /// A group with the same name (ignoring case) already exists.
    #[error("Group already exists: {0}")]
    DuplicateGroupName(String),
    /// The requested group name is blank.
    #[error("Group name cannot be empty")]
    EmptyGroupName,
    /// The referenced group id does not exist.
    #[error("Group not found: {0}")]
    GroupNotFound(String),
    /// A bulk request was submitted without an action.
    #[error("No bulk action selected")]
    NoActionSelected,
    /// A bulk move was submitted without a target group.
    #[error("No target group selected")]
    NoTargetGroup,
    /// A destructive operation was attempted without confirmation.
    #[error("Confirmation required to delete {0} link(s)")]
    ConfirmationRequired(usize),
    /// The import document is malformed or lacks a `links` array.
    #[error("Invalid backup file: {0}")]
    InvalidBackup(String),
}

// === StorageError ===

/// Errors raised by the key-value persistence backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The SQLite backend failed.
    #[error("Storage database error: {0}")]
    Database(String),
    /// A stored value could not be encoded or decoded.
    #[error("Storage serialization error: {0}")]
    Serialization(String),
    /// The in-memory store lock was poisoned by a panicking writer.
    #[error("Storage lock poisoned")]
    Poisoned,
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The provided settings key is invalid.
    #[error("Invalid settings key: {0}")]
    InvalidKey(String),
    /// The provided settings value is invalid.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
    /// Failed to serialize or deserialize settings.
    #[error("Settings serialization error: {0}")]
    Serialization(String),
    /// The persistence backend rejected the write.
    #[error("Settings storage error: {0}")]
    Storage(#[from] StorageError),
}
