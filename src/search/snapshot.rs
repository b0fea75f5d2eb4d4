//! Immutable in-memory catalog snapshot with precomputed search fields.

use super::trigram::{TrigramSet, build_trigrams};
use crate::catalog::{CatalogEntry, validate_entries};
use crate::error::InitError;
use ahash::AHashSet;

/// Number of entries served when a query matches nothing.
pub const FALLBACK_SIZE: usize = 50;

/// A catalog entry with every field the search path needs, derived once.
#[derive(Debug, Clone)]
pub struct IndexedEntry {
    pub id: u32,
    pub name: String,
    pub name_lower: String,
    /// `name_lower` as characters, for edit distance
    pub name_chars: Vec<char>,
    pub types_lower: Vec<String>,
    pub abilities_lower: Vec<String>,
    pub image_url: String,
    pub popularity: u64,
    pub trigrams: TrigramSet,
}

impl From<CatalogEntry> for IndexedEntry {
    fn from(entry: CatalogEntry) -> Self {
        let name_lower = entry.name.to_lowercase();
        Self {
            id: entry.id,
            name_chars: name_lower.chars().collect(),
            trigrams: build_trigrams(&name_lower),
            name_lower,
            types_lower: lowercase_tags(&entry.types),
            abilities_lower: lowercase_tags(&entry.abilities),
            name: entry.name,
            image_url: entry.image_url,
            popularity: entry.popularity,
        }
    }
}

/// Lowercased tags, first occurrence kept.
fn lowercase_tags(tags: &[String]) -> Vec<String> {
    let mut seen = AHashSet::with_capacity(tags.len());
    tags.iter()
        .map(|t| t.to_lowercase())
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

/// Point-in-time copy of the catalog.
///
/// Built once per (re)initialization and never mutated afterwards.
#[derive(Debug)]
pub struct CatalogSnapshot {
    entries: Vec<IndexedEntry>,
    max_popularity: u64,
    /// Indices into `entries` of the most popular entries, most popular first
    fallback: Vec<usize>,
    generation: u64,
}

impl CatalogSnapshot {
    /// Index a full catalog.
    ///
    /// Fails on an id of 0, a blank name, or a repeated id.
    pub fn build(entries: Vec<CatalogEntry>, generation: u64) -> Result<Self, InitError> {
        validate_entries(&entries)?;

        let mut entries: Vec<IndexedEntry> = entries.into_iter().map(IndexedEntry::from).collect();
        entries.sort_by_key(|e| e.id);

        let max_popularity = entries
            .iter()
            .map(|e| e.popularity)
            .max()
            .unwrap_or(0)
            .max(1);

        // Stable sort keeps id order among equally popular entries
        let mut fallback: Vec<usize> = (0..entries.len()).collect();
        fallback.sort_by(|&a, &b| entries[b].popularity.cmp(&entries[a].popularity));
        fallback.truncate(FALLBACK_SIZE);

        Ok(Self {
            entries,
            max_popularity,
            fallback,
            generation,
        })
    }

    pub fn entries(&self) -> &[IndexedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest popularity in the catalog, never below 1.
    pub const fn max_popularity(&self) -> u64 {
        self.max_popularity
    }

    /// The most popular entries, most popular first.
    pub fn most_popular(&self) -> impl Iterator<Item = &IndexedEntry> {
        self.fallback.iter().map(|&i| &self.entries[i])
    }

    /// Build counter of the engine that produced this snapshot.
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}
