//! Candidate selection over a catalog snapshot.

use super::snapshot::{CatalogSnapshot, IndexedEntry};
use super::trigram::{build_trigrams, shares_trigram};

/// Select the entries worth scoring for a normalized (trimmed, lowercase) query.
///
/// An entry qualifies when its lowercase name starts with or contains the
/// query, or shares at least one trigram with it. When nothing qualifies, the
/// most popular entries are returned instead, so only an empty catalog yields
/// no candidates.
pub fn select_candidates<'a>(snapshot: &'a CatalogSnapshot, query: &str) -> Vec<&'a IndexedEntry> {
    let query_trigrams = build_trigrams(query);

    let candidates: Vec<&IndexedEntry> = snapshot
        .entries()
        .iter()
        .filter(|e| {
            e.name_lower.starts_with(query)
                || e.name_lower.contains(query)
                || shares_trigram(&e.trigrams, &query_trigrams)
        })
        .collect();

    if candidates.is_empty() {
        tracing::debug!("No lexical match for '{}', falling back to most popular", query);
        return snapshot.most_popular().collect();
    }

    candidates
}
