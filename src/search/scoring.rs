//! Multi-signal relevance scoring and ranking.
//!
//! Every candidate gets six signals in `[0, 1]`, combined by a fixed weighted
//! sum. The weights add up to 1, so the composite is in `[0, 1]` as well.

use super::distance::{bounded_levenshtein, max_allowed_edits};
use super::snapshot::IndexedEntry;
use crate::types::{ScoredResult, round_score};
use std::cmp::Ordering;

pub const PREFIX_WEIGHT: f64 = 0.40;
pub const SUBSTRING_WEIGHT: f64 = 0.15;
pub const FUZZY_WEIGHT: f64 = 0.10;
pub const POPULARITY_WEIGHT: f64 = 0.25;
pub const TYPE_WEIGHT: f64 = 0.06;
pub const ABILITY_WEIGHT: f64 = 0.04;

/// A normalized query plus the optional tag filters that boost matching entries.
#[derive(Debug, Clone)]
pub struct ScoringQuery {
    text: String,
    chars: Vec<char>,
    entry_type: Option<String>,
    ability: Option<String>,
}

impl ScoringQuery {
    /// `text` must already be trimmed and lowercased. Blank filters count as absent.
    pub fn new(text: &str, entry_type: Option<&str>, ability: Option<&str>) -> Self {
        let normalize = |filter: Option<&str>| {
            filter
                .filter(|f| !f.trim().is_empty())
                .map(str::to_lowercase)
        };
        Self {
            text: text.to_string(),
            chars: text.chars().collect(),
            entry_type: normalize(entry_type),
            ability: normalize(ability),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// The individual relevance signals for one candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Signals {
    pub prefix: f64,
    pub substring: f64,
    pub fuzzy: f64,
    pub popularity: f64,
    pub type_match: f64,
    pub ability_match: f64,
}

impl Signals {
    pub fn compute(entry: &IndexedEntry, query: &ScoringQuery, max_popularity: u64) -> Self {
        let tag_match = |tags: &[String], wanted: Option<&String>| {
            indicator(wanted.is_some_and(|w| tags.contains(w)))
        };

        Self {
            prefix: indicator(entry.name_lower.starts_with(&query.text)),
            substring: indicator(entry.name_lower.contains(&query.text)),
            fuzzy: fuzzy_score(&query.chars, &entry.name_chars),
            popularity: entry.popularity as f64 / max_popularity.max(1) as f64,
            type_match: tag_match(&entry.types_lower, query.entry_type.as_ref()),
            ability_match: tag_match(&entry.abilities_lower, query.ability.as_ref()),
        }
    }

    /// Weighted sum of all signals.
    pub fn composite(&self) -> f64 {
        PREFIX_WEIGHT * self.prefix
            + SUBSTRING_WEIGHT * self.substring
            + FUZZY_WEIGHT * self.fuzzy
            + POPULARITY_WEIGHT * self.popularity
            + TYPE_WEIGHT * self.type_match
            + ABILITY_WEIGHT * self.ability_match
    }
}

const fn indicator(hit: bool) -> f64 {
    if hit { 1.0 } else { 0.0 }
}

/// Similarity derived from the bounded edit distance between query and name.
///
/// Returns exactly 0.0 when the distance exceeds the query's edit budget.
pub fn fuzzy_score(query: &[char], name: &[char]) -> f64 {
    let max_len = query.len().max(name.len());
    if max_len == 0 {
        return 0.0;
    }
    match bounded_levenshtein(query, name, max_allowed_edits(query.len())) {
        Some(distance) => (1.0 - distance as f64 / max_len as f64).max(0.0),
        None => 0.0,
    }
}

/// Score every candidate and return the best `limit`.
///
/// Ordered by composite score, then popularity, then name, all but the name
/// descending. Entries identical in all three are ordered by id.
pub fn rank(
    candidates: &[&IndexedEntry],
    query: &ScoringQuery,
    max_popularity: u64,
    limit: usize,
) -> Vec<ScoredResult> {
    let mut scored: Vec<(&IndexedEntry, f64)> = candidates
        .iter()
        .map(|&entry| (entry, Signals::compute(entry, query, max_popularity).composite()))
        .collect();

    scored.sort_by(|(a, a_score), (b, b_score)| compare_ranked(a, *a_score, b, *b_score));
    scored.truncate(limit);

    scored
        .into_iter()
        .map(|(entry, score)| ScoredResult {
            id: entry.id,
            name: entry.name.clone(),
            image_url: entry.image_url.clone(),
            types: entry.types_lower.clone(),
            abilities: entry.abilities_lower.clone(),
            popularity: entry.popularity,
            score: round_score(score),
        })
        .collect()
}

fn compare_ranked(a: &IndexedEntry, a_score: f64, b: &IndexedEntry, b_score: f64) -> Ordering {
    b_score
        .total_cmp(&a_score)
        .then_with(|| b.popularity.cmp(&a.popularity))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}
