use serde::Serialize;
use std::sync::Arc;

/// One ranked suggestion as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredResult {
    pub id: u32,
    pub name: String,
    pub image_url: String,
    /// Lowercase category tags
    pub types: Vec<String>,
    /// Lowercase capability tags
    pub abilities: Vec<String>,
    pub popularity: u64,
    /// Composite relevance in `[0, 1]`, rounded to 4 decimal places
    pub score: f64,
}

/// An ordered, shareable result list. Cache hits hand out the same allocation.
pub type Suggestions = Arc<[ScoredResult]>;

/// Round a score to 4 decimal places (half to even).
pub fn round_score(score: f64) -> f64 {
    (score * 10_000.0).round_ties_even() / 10_000.0
}
