//! Catalog records as stored by the external catalog store.

use crate::error::{EntryError, StoreError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Image reference used when a record has none.
pub const PLACEHOLDER_IMAGE: &str = "N/A";

/// A single catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Unique, positive identifier
    pub id: u32,
    /// Display name
    pub name: String,
    /// Category tags, e.g. "electric"
    #[serde(default)]
    pub types: Vec<String>,
    /// Capability tags, e.g. "static"
    #[serde(default)]
    pub abilities: Vec<String>,
    #[serde(default)]
    pub image_url: String,
    /// View counter, never decreases
    #[serde(default)]
    pub popularity: u64,
    /// RFC 3339 timestamp of the last upstream sync
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl CatalogEntry {
    /// Create an entry with no tags, zero popularity and a placeholder image.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            types: Vec::new(),
            abilities: Vec::new(),
            image_url: PLACEHOLDER_IMAGE.to_string(),
            popularity: 0,
            last_updated: None,
        }
    }

    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_abilities<I, S>(mut self, abilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.abilities = abilities.into_iter().map(Into::into).collect();
        self
    }

    pub const fn with_popularity(mut self, popularity: u64) -> Self {
        self.popularity = popularity;
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    /// Apply the store's storage conventions: tags behave as sets and a blank
    /// image reference becomes [`PLACEHOLDER_IMAGE`].
    pub(crate) fn normalize(mut self) -> Self {
        dedup_in_order(&mut self.types);
        dedup_in_order(&mut self.abilities);
        if self.image_url.trim().is_empty() {
            self.image_url = PLACEHOLDER_IMAGE.to_string();
        }
        self
    }

    /// Case-insensitive exact tag match against the category tags.
    pub fn has_type(&self, wanted: &str) -> bool {
        self.types.iter().any(|t| t.to_lowercase() == wanted.to_lowercase())
    }

    /// Case-insensitive exact tag match against the capability tags.
    pub fn has_ability(&self, wanted: &str) -> bool {
        self.abilities
            .iter()
            .any(|a| a.to_lowercase() == wanted.to_lowercase())
    }
}

/// Keep the first spelling of each tag, comparing case-insensitively.
fn dedup_in_order(tags: &mut Vec<String>) {
    let mut seen = ahash::AHashSet::with_capacity(tags.len());
    tags.retain(|tag| seen.insert(tag.to_lowercase()));
}

/// Check a whole catalog: ids are positive and unique, names are not blank.
pub fn validate_entries(entries: &[CatalogEntry]) -> Result<(), EntryError> {
    let mut seen = ahash::AHashSet::with_capacity(entries.len());
    for entry in entries {
        if entry.id == 0 {
            return Err(EntryError::Unusable {
                id: 0,
                reason: "id must be positive",
            });
        }
        if entry.name.trim().is_empty() {
            return Err(EntryError::Unusable {
                id: entry.id,
                reason: "empty name",
            });
        }
        if !seen.insert(entry.id) {
            return Err(EntryError::DuplicateId(entry.id));
        }
    }
    Ok(())
}

/// Load a catalog from a JSON file containing an array of entries.
///
/// Entries are validated with [`validate_entries`], normalized, and returned
/// ordered by ascending id.
pub async fn load_json(path: &Path) -> Result<Vec<CatalogEntry>, StoreError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let entries: Vec<CatalogEntry> =
        serde_json::from_str(&content).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    validate_entries(&entries).map_err(|source| StoreError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;

    let mut entries: Vec<CatalogEntry> = entries.into_iter().map(CatalogEntry::normalize).collect();
    entries.sort_by_key(|e| e.id);

    tracing::debug!("Loaded {} catalog entries from {}", entries.len(), path.display());
    Ok(entries)
}
