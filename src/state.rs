//! Shared state handed to every request handler.

use crate::catalog::{MemoryStore, load_json};
use crate::config::Config;
use crate::engine::SuggestionEngine;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

/// The catalog store, the engine reading from it, and request defaults.
#[derive(Debug)]
pub struct SuggestState {
    pub store: Arc<MemoryStore>,
    pub engine: Arc<SuggestionEngine>,
    /// Where `refresh` re-reads the catalog from
    pub catalog_path: PathBuf,
    pub default_limit: usize,
}

impl SuggestState {
    /// Assemble state around an existing store.
    pub fn new(store: Arc<MemoryStore>, config: &Config) -> Self {
        let engine = SuggestionEngine::with_options(store.clone(), config.engine_options());
        Self {
            store,
            engine: Arc::new(engine),
            catalog_path: config.catalog_path.clone(),
            default_limit: config.default_limit,
        }
    }

    /// Seed the store from the configured catalog file.
    ///
    /// The engine snapshot is still built lazily on the first query.
    pub async fn load(config: &Config) -> Result<Self> {
        let store = MemoryStore::from_json_file(&config.catalog_path)
            .await
            .with_context(|| format!("Failed to load catalog {}", config.catalog_path.display()))?;
        tracing::info!(
            "Loaded {} catalog entries from {}",
            store.len().await,
            config.catalog_path.display()
        );
        Ok(Self::new(Arc::new(store), config))
    }

    /// Re-read the catalog file into the store and rebuild the engine snapshot.
    ///
    /// The file is validated before the store is touched, so a rejected file
    /// leaves both the store and the snapshot as they were.
    pub async fn refresh(&self) -> Result<usize> {
        let entries = load_json(&self.catalog_path).await?;
        self.store.reload(entries).await;
        let count = self.engine.refresh().await?;
        Ok(count)
    }
}
