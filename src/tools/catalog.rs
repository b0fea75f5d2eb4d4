//! Catalog browsing handlers: filtered listing and single-entry lookup.

use crate::catalog::ListFilter;
use crate::state::SuggestState;
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListRequest {
    /// Only Pokémon with this type (case-insensitive)
    #[serde(default, rename = "type")]
    pub entry_type: Option<String>,
    /// Only Pokémon with this ability (case-insensitive)
    #[serde(default)]
    pub ability: Option<String>,
    /// 1-based page number (default: 1)
    #[serde(default = "default_page")]
    pub page: usize,
    /// Entries per page, at most 100 (default: 20)
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

const fn default_page() -> usize {
    1
}

const fn default_page_size() -> usize {
    20
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetRequest {
    /// Pokémon id
    pub id: u32,
}

/// List catalog entries page by page, filtered by type and ability.
pub async fn handle_list(state: &SuggestState, request: ListRequest) -> Result<String, String> {
    let filter = ListFilter {
        entry_type: request.entry_type,
        ability: request.ability,
    };
    let page = state.store.list(&filter, request.page, request.page_size).await;
    serde_json::to_string_pretty(&page).map_err(|e| format!("Failed to serialize page: {}", e))
}

/// Fetch one entry and count the view towards its popularity.
///
/// The engine's snapshot keeps the old popularity until it is refreshed.
pub async fn handle_get(state: &SuggestState, request: GetRequest) -> Result<String, String> {
    let entry = state
        .store
        .record_view(request.id)
        .await
        .ok_or_else(|| format!("Pokémon {} not found", request.id))?;
    serde_json::to_string_pretty(&entry).map_err(|e| format!("Failed to serialize entry: {}", e))
}
