//! Name-suggestion search over an in-memory catalog snapshot.
//!
//! This module provides trigram shingling, the immutable snapshot, candidate
//! selection, bounded edit distance, and the weighted scorer used by
//! [`SuggestionEngine`](crate::engine::SuggestionEngine).

pub mod candidates;
pub mod distance;
pub mod scoring;
pub mod snapshot;
pub mod trigram;

pub use candidates::select_candidates;
pub use distance::{bounded_levenshtein, max_allowed_edits};
pub use scoring::{ScoringQuery, Signals, fuzzy_score, rank};
pub use snapshot::{CatalogSnapshot, FALLBACK_SIZE, IndexedEntry};
pub use trigram::{Trigram, TrigramSet, build_trigrams, shares_trigram};
