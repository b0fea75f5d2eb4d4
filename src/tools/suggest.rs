//! Name-suggestion handler.

use crate::state::SuggestState;
use crate::types::ScoredResult;
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SuggestRequest {
    /// Partial Pokémon name (at least 2 characters)
    pub query: String,
    /// Maximum number of suggestions (default: 5)
    #[serde(default)]
    pub limit: Option<usize>,
    /// Rank Pokémon of this type higher, e.g. "electric"
    #[serde(default, rename = "type")]
    pub entry_type: Option<String>,
    /// Rank Pokémon with this ability higher, e.g. "static"
    #[serde(default)]
    pub ability: Option<String>,
}

/// Run a suggestion request and render the results as a JSON array.
pub async fn handle_suggest(state: &SuggestState, request: SuggestRequest) -> Result<String, String> {
    let limit = request.limit.unwrap_or(state.default_limit);
    let results = state
        .engine
        .suggest(
            &request.query,
            limit,
            request.entry_type.as_deref(),
            request.ability.as_deref(),
        )
        .await
        .map_err(|e| format!("{} (retry later)", e))?;

    serde_json::to_string_pretty(&*results).map_err(|e| format!("Failed to serialize results: {}", e))
}

/// Render results as numbered lines for terminal output.
pub fn format_suggestions(query: &str, results: &[ScoredResult]) -> String {
    if results.is_empty() {
        return format!("No suggestions for '{}'.\n", query.trim());
    }

    let mut output = format!("Suggestions for '{}':\n\n", query.trim());
    for (idx, result) in results.iter().enumerate() {
        let _ = writeln!(
            output,
            "{}. {} (score {:.4}, popularity {})",
            idx + 1,
            result.name,
            result.score,
            result.popularity
        );

        if !result.types.is_empty() {
            let _ = writeln!(output, "   types: {}", result.types.join(", "));
        }
    }
    output
}
