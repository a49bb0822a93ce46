use linkshelf::types::errors::*;

// === CollectionError Tests ===

#[test]
fn collection_error_display_variants() {
    assert_eq!(CollectionError::NoValidInput.to_string(), "No valid links found in input");
    assert_eq!(
        CollectionError::DuplicateGroupName("Work".to_string()).to_string(),
        "Group already exists: Work"
    );
    assert_eq!(CollectionError::EmptyGroupName.to_string(), "Group name cannot be empty");
    assert_eq!(
        CollectionError::GroupNotFound("g-1".to_string()).to_string(),
        "Group not found: g-1"
    );
    assert_eq!(CollectionError::NoActionSelected.to_string(), "No bulk action selected");
    assert_eq!(CollectionError::NoTargetGroup.to_string(), "No target group selected");
    assert_eq!(
        CollectionError::ConfirmationRequired(3).to_string(),
        "Confirmation required to delete 3 link(s)"
    );
    assert_eq!(
        CollectionError::InvalidBackup("missing links array".to_string()).to_string(),
        "Invalid backup file: missing links array"
    );
}

#[test]
fn collection_error_implements_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(CollectionError::NoValidInput);
    assert!(err.source().is_none());
}

// === StorageError Tests ===

#[test]
fn storage_error_from_serde_json() {
    let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let err: StorageError = json_err.into();
    assert!(matches!(err, StorageError::Serialization(_)));
    assert!(err.to_string().starts_with("Storage serialization error:"));
}

#[test]
fn storage_error_from_rusqlite() {
    let err: StorageError = rusqlite::Error::InvalidQuery.into();
    assert!(matches!(err, StorageError::Database(_)));
}

#[test]
fn storage_error_poisoned_display() {
    assert_eq!(StorageError::Poisoned.to_string(), "Storage lock poisoned");
}

// === SettingsError Tests ===

#[test]
fn settings_error_display_variants() {
    assert_eq!(
        SettingsError::InvalidKey("x".to_string()).to_string(),
        "Invalid settings key: x"
    );
    assert_eq!(
        SettingsError::InvalidValue("bad".to_string()).to_string(),
        "Invalid settings value: bad"
    );
}

#[test]
fn settings_error_wraps_storage_error() {
    let err: SettingsError = StorageError::Poisoned.into();
    assert_eq!(err.to_string(), "Settings storage error: Storage lock poisoned");
}
