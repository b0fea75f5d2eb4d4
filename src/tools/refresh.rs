//! Catalog refresh handler.

use crate::state::SuggestState;

/// Reload the catalog file and rebuild the search snapshot.
pub async fn handle_refresh(state: &SuggestState) -> Result<String, String> {
    let count = state
        .refresh()
        .await
        .map_err(|e| format!("Failed to refresh catalog: {:#}", e))?;
    Ok(format!(
        "Catalog refreshed from {}: {} entries",
        state.catalog_path.display(),
        count
    ))
}
