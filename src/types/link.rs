use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Content category derived from a link's domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    Video,
    Code,
    Article,
    Ai,
    #[default]
    Website,
}

impl LinkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkType::Video => "video",
            LinkType::Code => "code",
            LinkType::Article => "article",
            LinkType::Ai => "ai",
            LinkType::Website => "website",
        }
    }
}

/// One bookmarked entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: String,
    pub url: String,
    pub domain: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    #[serde(rename = "type")]
    pub kind: LinkType,
    pub group: String,
    pub created_at: DateTime<Utc>,
}

/// A link as it arrives in an import document, before classification
/// fills in whatever the document left out.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedLink {
    pub url: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default, rename = "type")]
    pub kind: Option<LinkType>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
