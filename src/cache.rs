//! Time-bounded memo of computed suggestion lists.
//!
//! Entries expire lazily: an expired entry is dropped when it is next looked
//! up, or swept when the cache reaches capacity. Reads and writes go through a
//! sharded concurrent map, so callers never serialize on the whole cache.

use crate::types::Suggestions;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::time::{Duration, Instant};

/// How long a computed result list stays valid.
pub const RESULT_TTL: Duration = Duration::from_secs(60);

/// Default entry cap.
pub const DEFAULT_CAPACITY: usize = 10_000;

/// Identity of a suggestion request.
///
/// The query is trimmed and lowercased so that equivalent requests collide.
/// Filters are kept as supplied (absent becomes empty).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    query: String,
    entry_type: String,
    ability: String,
    limit: usize,
}

impl CacheKey {
    pub fn new(query: &str, entry_type: Option<&str>, ability: Option<&str>, limit: usize) -> Self {
        Self {
            query: query.trim().to_lowercase(),
            entry_type: entry_type.unwrap_or_default().to_string(),
            ability: ability.unwrap_or_default().to_string(),
            limit,
        }
    }
}

#[derive(Debug)]
struct CachedResults {
    results: Suggestions,
    /// Snapshot generation the results were computed from
    generation: u64,
    expires_at: Instant,
}

/// Counters reported by [`ResultCache::stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

pub struct ResultCache {
    entries: DashMap<CacheKey, CachedResults, ahash::RandomState>,
    ttl: Duration,
    capacity: usize,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl std::fmt::Debug for ResultCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultCache")
            .field("entries", &self.entries.len())
            .field("ttl", &self.ttl)
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(RESULT_TTL, DEFAULT_CAPACITY)
    }
}

impl ResultCache {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: DashMap::with_hasher(ahash::RandomState::new()),
            ttl,
            capacity: capacity.max(1),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Look up unexpired results computed from snapshot `generation`.
    pub fn get(&self, key: &CacheKey, generation: u64) -> Option<Suggestions> {
        let now = Instant::now();
        let fresh = self
            .entries
            .get(key)
            .and_then(|e| (e.expires_at > now && e.generation == generation).then(|| e.results.clone()));

        if fresh.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.entries
                .remove_if(key, |_, e| e.expires_at <= now || e.generation != generation);
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        fresh
    }

    /// Store results for `key`, replacing whatever was there.
    pub fn put(&self, key: CacheKey, results: Suggestions, generation: u64) {
        if self.entries.len() >= self.capacity && !self.entries.contains_key(&key) {
            self.evict();
        }

        self.entries.insert(
            key,
            CachedResults {
                results,
                generation,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Drop expired entries, then the quarter closest to expiry if still full.
    fn evict(&self) {
        let now = Instant::now();
        self.entries.retain(|_, e| e.expires_at > now);
        if self.entries.len() < self.capacity {
            return;
        }

        let mut by_expiry: Vec<(CacheKey, Instant)> = self
            .entries
            .iter()
            .map(|e| (e.key().clone(), e.value().expires_at))
            .collect();
        by_expiry.sort_by_key(|(_, expires_at)| *expires_at);

        let to_evict = (self.capacity / 4).max(1);
        for (key, _) in by_expiry.into_iter().take(to_evict) {
            self.entries.remove(&key);
        }
        tracing::debug!("Result cache full, evicted {} entries", to_evict);
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.len(),
        }
    }
}
