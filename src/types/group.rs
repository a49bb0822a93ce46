use serde::{Deserialize, Serialize};

/// Id of the permanent default group.
pub const UNCATEGORIZED_ID: &str = "uncategorized";

/// Display name of the permanent default group.
pub const UNCATEGORIZED_NAME: &str = "Uncategorized";

/// Color token of the permanent default group.
pub const UNCATEGORIZED_COLOR: &str = "#64748b";

/// Color given to groups created without an explicit color.
pub const DEFAULT_GROUP_COLOR: &str = "#4f46e5";

/// A named, colored bucket that links are filed under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub name: String,
    pub color: String,
    /// Number of links filed under this group. Derived, recomputed after
    /// every mutation.
    #[serde(default)]
    pub count: usize,
}

impl Group {
    /// The sentinel group every collection starts with.
    pub fn uncategorized() -> Self {
        Self {
            id: UNCATEGORIZED_ID.to_string(),
            name: UNCATEGORIZED_NAME.to_string(),
            color: UNCATEGORIZED_COLOR.to_string(),
            count: 0,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.id == UNCATEGORIZED_ID
    }
}

/// A group as it arrives in an import document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedGroup {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}
