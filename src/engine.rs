//! Suggestion engine: lazy snapshot initialization, result caching, ranking.
//!
//! The engine owns one [`CatalogSnapshot`] per process lifetime (or per
//! explicit [`refresh`](SuggestionEngine::refresh)). The snapshot is built on
//! first use under a mutex with a double-checked flag, then shared read-only
//! by every request. Results are memoized in a [`ResultCache`].

use crate::cache::{CacheKey, CacheStats, DEFAULT_CAPACITY, RESULT_TTL, ResultCache};
use crate::catalog::CatalogStore;
use crate::error::{InitError, SuggestError};
use crate::search::{CatalogSnapshot, ScoringQuery, rank, select_candidates};
use crate::types::Suggestions;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

/// Queries shorter than this (after trimming) return no suggestions.
pub const MIN_QUERY_LEN: usize = 2;

/// Result count used when a caller does not ask for one.
pub const DEFAULT_LIMIT: usize = 5;

/// Tunables for [`SuggestionEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    pub cache_ttl: Duration,
    pub cache_capacity: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            cache_ttl: RESULT_TTL,
            cache_capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Ranks catalog entries against partial names.
///
/// Construct one per catalog store and share it (behind an `Arc`) with every
/// request handler.
pub struct SuggestionEngine {
    store: Arc<dyn CatalogStore>,
    /// Set once a snapshot has been published
    initialized: AtomicBool,
    /// Serializes snapshot builds
    init_lock: Mutex<()>,
    snapshot: RwLock<Option<Arc<CatalogSnapshot>>>,
    generation: AtomicU64,
    cache: ResultCache,
}

impl std::fmt::Debug for SuggestionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuggestionEngine")
            .field("initialized", &self.is_initialized())
            .field("generation", &self.generation.load(Ordering::Relaxed))
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl SuggestionEngine {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self::with_options(store, EngineOptions::default())
    }

    pub fn with_options(store: Arc<dyn CatalogStore>, options: EngineOptions) -> Self {
        Self {
            store,
            initialized: AtomicBool::new(false),
            init_lock: Mutex::new(()),
            snapshot: RwLock::new(None),
            generation: AtomicU64::new(0),
            cache: ResultCache::new(options.cache_ttl, options.cache_capacity),
        }
    }

    /// Whether a snapshot has been built and published.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Number of entries in the current snapshot, if any.
    pub async fn snapshot_len(&self) -> Option<usize> {
        self.snapshot.read().await.as_ref().map(|s| s.len())
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Suggest up to `limit` catalog entries for a partial name.
    ///
    /// Queries shorter than [`MIN_QUERY_LEN`] characters after trimming return
    /// an empty list without touching the catalog. The only possible error is
    /// a failed first-time snapshot build, which callers may retry.
    pub async fn suggest(
        &self,
        query: &str,
        limit: usize,
        entry_type: Option<&str>,
        ability: Option<&str>,
    ) -> Result<Suggestions, SuggestError> {
        let normalized = query.trim().to_lowercase();
        if normalized.chars().count() < MIN_QUERY_LEN {
            return Ok(Suggestions::from(Vec::new()));
        }

        let snapshot = self.ensure_initialized().await?;
        let key = CacheKey::new(&normalized, entry_type, ability, limit);

        if let Some(cached) = self.cache.get(&key, snapshot.generation()) {
            tracing::debug!("Cache hit for '{}'", normalized);
            return Ok(cached);
        }
        tracing::debug!("Cache miss for '{}'", normalized);

        let scoring_query = ScoringQuery::new(&normalized, entry_type, ability);
        let candidates = select_candidates(&snapshot, scoring_query.text());
        let results: Suggestions = rank(&candidates, &scoring_query, snapshot.max_popularity(), limit).into();

        tracing::trace!(
            "Ranked {} candidates for '{}', returning {}",
            candidates.len(),
            normalized,
            results.len()
        );

        self.cache.put(key, results.clone(), snapshot.generation());
        Ok(results)
    }

    /// Return the published snapshot, building it first if needed.
    ///
    /// Concurrent first callers wait on a single build. A failed build leaves
    /// the engine uninitialized, so the next call starts over.
    pub async fn ensure_initialized(&self) -> Result<Arc<CatalogSnapshot>, SuggestError> {
        if let Some(snapshot) = self.published().await {
            return Ok(snapshot);
        }

        let _guard = self.init_lock.lock().await;
        if let Some(snapshot) = self.published().await {
            return Ok(snapshot);
        }

        let snapshot = self.build_snapshot().await.inspect_err(|e| {
            tracing::error!("Catalog initialization failed: {}", e);
        })?;
        self.publish(snapshot.clone()).await;
        Ok(snapshot)
    }

    /// Rebuild the snapshot from the store and drop all cached results.
    ///
    /// On failure the previous snapshot, if any, stays in service.
    pub async fn refresh(&self) -> Result<usize, SuggestError> {
        let _guard = self.init_lock.lock().await;

        let snapshot = self.build_snapshot().await.inspect_err(|e| {
            tracing::warn!("Catalog refresh failed, keeping previous snapshot: {}", e);
        })?;
        let len = snapshot.len();
        self.publish(snapshot).await;
        self.cache.clear();

        tracing::info!("Catalog snapshot refreshed ({} entries)", len);
        Ok(len)
    }

    async fn published(&self) -> Option<Arc<CatalogSnapshot>> {
        if !self.is_initialized() {
            return None;
        }
        self.snapshot.read().await.clone()
    }

    async fn publish(&self, snapshot: Arc<CatalogSnapshot>) {
        *self.snapshot.write().await = Some(snapshot);
        self.initialized.store(true, Ordering::Release);
    }

    async fn build_snapshot(&self) -> Result<Arc<CatalogSnapshot>, InitError> {
        let start = std::time::Instant::now();
        tracing::info!("Building catalog snapshot");

        let entries = self.store.fetch_all_entries().await?;
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let snapshot = CatalogSnapshot::build(entries, generation)?;

        tracing::info!(
            "Catalog snapshot built: {} entries, max popularity {} in {:?}",
            snapshot.len(),
            snapshot.max_popularity(),
            start.elapsed()
        );
        Ok(Arc::new(snapshot))
    }
}
