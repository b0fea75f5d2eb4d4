//! The catalog store seam and its in-memory implementation.

use super::entry::{CatalogEntry, load_json};
use crate::error::StoreError;
use futures::future::BoxFuture;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tokio::sync::RwLock;

/// Largest page a listing returns.
pub const MAX_PAGE_SIZE: usize = 100;

/// Source of the full catalog.
///
/// The engine calls [`fetch_all_entries`](Self::fetch_all_entries) once per
/// snapshot build. A failure propagates as an initialization failure.
pub trait CatalogStore: Send + Sync {
    /// Return every entry in the catalog, ordered by ascending id.
    fn fetch_all_entries(&self) -> BoxFuture<'_, Result<Vec<CatalogEntry>, StoreError>>;
}

/// Filters for [`MemoryStore::list`].
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub entry_type: Option<String>,
    pub ability: Option<String>,
}

/// One page of a filtered listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_count: usize,
}

/// Internally synchronized in-memory catalog store.
///
/// Holds the authoritative popularity counters: [`record_view`](Self::record_view)
/// bumps them here, never in an engine snapshot.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<u32, CatalogEntry>>,
}

impl MemoryStore {
    pub fn new(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|e| (e.id, e.normalize()))
            .collect();
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Create a store seeded from a JSON catalog file.
    pub async fn from_json_file(path: &Path) -> Result<Self, StoreError> {
        Ok(Self::new(load_json(path).await?))
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub async fn get(&self, id: u32) -> Option<CatalogEntry> {
        self.entries.read().await.get(&id).cloned()
    }

    /// Look up an entry and count the view, returning the updated entry.
    pub async fn record_view(&self, id: u32) -> Option<CatalogEntry> {
        let mut entries = self.entries.write().await;
        let entry = entries.get_mut(&id)?;
        entry.popularity = entry.popularity.saturating_add(1);
        Some(entry.clone())
    }

    /// Paged listing filtered by exact, case-insensitive tag match.
    ///
    /// `page` is 1-based; 0 is treated as 1. `page_size` is clamped to
    /// `1..=MAX_PAGE_SIZE`.
    pub async fn list(&self, filter: &ListFilter, page: usize, page_size: usize) -> Page<CatalogEntry> {
        let page = page.max(1);
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE);

        let entries = self.entries.read().await;
        let matching: Vec<&CatalogEntry> = entries
            .values()
            .filter(|e| {
                filter
                    .entry_type
                    .as_deref()
                    .filter(|t| !t.is_empty())
                    .is_none_or(|t| e.has_type(t))
            })
            .filter(|e| {
                filter
                    .ability
                    .as_deref()
                    .filter(|a| !a.is_empty())
                    .is_none_or(|a| e.has_ability(a))
            })
            .collect();

        let total_count = matching.len();
        let items = matching
            .into_iter()
            .skip((page - 1).saturating_mul(page_size))
            .take(page_size)
            .cloned()
            .collect();

        Page {
            items,
            page,
            page_size,
            total_count,
        }
    }

    /// Replace the catalog contents.
    ///
    /// For ids present both before and after, the larger popularity wins so
    /// that counters never go backwards.
    pub async fn reload(&self, incoming: impl IntoIterator<Item = CatalogEntry>) -> usize {
        let mut entries = self.entries.write().await;
        let mut next = BTreeMap::new();
        for entry in incoming {
            let mut entry = entry.normalize();
            if let Some(existing) = entries.get(&entry.id) {
                entry.popularity = entry.popularity.max(existing.popularity);
            }
            next.insert(entry.id, entry);
        }
        *entries = next;
        tracing::info!("Catalog store reloaded with {} entries", entries.len());
        entries.len()
    }
}

impl CatalogStore for MemoryStore {
    fn fetch_all_entries(&self) -> BoxFuture<'_, Result<Vec<CatalogEntry>, StoreError>> {
        Box::pin(async move { Ok(self.entries.read().await.values().cloned().collect()) })
    }
}
