use serde::{Deserialize, Serialize};

/// User preferences persisted alongside the collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkSettings {
    /// Apply domain-based group detection when links are added.
    pub auto_group: bool,
    /// Offer the `url | title` auto-format pass on pasted text.
    pub auto_parse: bool,
    pub show_favicons: bool,
    /// Destructive operations need an explicit confirmation.
    pub confirm_delete: bool,
    pub remove_after_open: bool,
    pub favicon_size: u32,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            auto_group: true,
            auto_parse: true,
            show_favicons: true,
            confirm_delete: true,
            remove_after_open: false,
            favicon_size: 128,
        }
    }
}
