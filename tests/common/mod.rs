//! Shared test fixtures and utilities for integration tests.
//!
//! # Available Fixtures
//!
//! - `pokedex`: a small catalog of real Pokémon with types, abilities and popularity
//! - `engine`: a [`SuggestionEngine`] over a [`ScriptedStore`] seeded with `pokedex`
//! - `catalog_dir`: a [`CatalogDir`] with `pokedex` written to `catalog.json`
//!
//! [`ScriptedStore`] counts fetches and can be told to fail or stall, for
//! exercising initialization races and retries.

use futures::future::BoxFuture;
use poke_suggest::{CatalogEntry, CatalogStore, StoreError, SuggestionEngine};
use rstest::fixture;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::TempDir;

/// Fifteen first-generation Pokémon. Pikachu is the most popular at 1000.
#[fixture]
pub fn pokedex() -> Vec<CatalogEntry> {
    vec![
        mon(1, "bulbasaur", &["grass", "poison"], &["overgrow", "chlorophyll"], 40),
        mon(4, "charmander", &["fire"], &["blaze", "solar-power"], 120),
        mon(5, "charmeleon", &["fire"], &["blaze", "solar-power"], 30),
        mon(6, "charizard", &["fire", "flying"], &["blaze", "solar-power"], 300),
        mon(7, "squirtle", &["water"], &["torrent", "rain-dish"], 90),
        mon(25, "pikachu", &["electric"], &["static", "lightning-rod"], 1000),
        mon(26, "raichu", &["electric"], &["static", "lightning-rod"], 60),
        mon(39, "jigglypuff", &["normal", "fairy"], &["cute-charm", "competitive"], 50),
        mon(52, "meowth", &["normal"], &["pickup", "technician"], 45),
        mon(122, "mr mime", &["psychic", "fairy"], &["soundproof", "filter"], 5),
        mon(133, "eevee", &["normal"], &["run-away", "adaptability"], 200),
        mon(143, "snorlax", &["normal"], &["immunity", "thick-fat"], 150),
        mon(150, "mewtwo", &["psychic"], &["pressure", "unnerve"], 400),
        mon(151, "mew", &["psychic"], &["synchronize"], 80),
        mon(172, "pichu", &["electric"], &["static", "lightning-rod"], 20),
    ]
}

pub fn mon(id: u32, name: &str, types: &[&str], abilities: &[&str], popularity: u64) -> CatalogEntry {
    CatalogEntry::new(id, name)
        .with_types(types.iter().copied())
        .with_abilities(abilities.iter().copied())
        .with_popularity(popularity)
        .with_image_url(format!("https://img.example/{id}.png"))
}

/// Catalog store that counts fetches and fails or stalls on request.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct ScriptedStore {
    entries: Vec<CatalogEntry>,
    fetches: AtomicUsize,
    failures_left: AtomicUsize,
    delay: Duration,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl ScriptedStore {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self {
            entries,
            fetches: AtomicUsize::new(0),
            failures_left: AtomicUsize::new(0),
            delay: Duration::ZERO,
        }
    }

    /// Make every fetch sleep first, so concurrent callers overlap.
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Fail the next `count` fetches.
    pub fn fail_next(&self, count: usize) {
        self.failures_left.store(count, Ordering::SeqCst);
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl CatalogStore for ScriptedStore {
    fn fetch_all_entries(&self) -> BoxFuture<'_, Result<Vec<CatalogEntry>, StoreError>> {
        Box::pin(async move {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            let failing = self
                .failures_left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if failing {
                return Err(StoreError::Unavailable("store offline".to_string()));
            }
            Ok(self.entries.clone())
        })
    }
}

/// A [`SuggestionEngine`] together with the store it reads from.
#[allow(dead_code)] // Fields used across different integration test crates
pub struct TestEngine {
    pub store: Arc<ScriptedStore>,
    pub engine: Arc<SuggestionEngine>,
}

#[allow(dead_code)] // Used across different integration test crates
pub fn engine_over(store: ScriptedStore) -> TestEngine {
    let store = Arc::new(store);
    let engine = Arc::new(SuggestionEngine::new(store.clone()));
    TestEngine { store, engine }
}

#[fixture]
pub fn engine(pokedex: Vec<CatalogEntry>) -> TestEngine {
    engine_over(ScriptedStore::new(pokedex))
}

/// A temporary directory holding `catalog.json`.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct CatalogDir {
    _temp: TempDir,
    path: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl CatalogDir {
    pub fn new(entries: &[CatalogEntry]) -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().join("catalog.json");
        let dir = Self { _temp: temp, path };
        dir.write(entries);
        dir
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the catalog file.
    pub fn write(&self, entries: &[CatalogEntry]) {
        let json = serde_json::to_string_pretty(entries).expect("Failed to serialize catalog");
        std::fs::write(&self.path, json)
            .unwrap_or_else(|e| panic!("Failed to write '{}': {}", self.path.display(), e));
    }
}

#[fixture]
pub fn catalog_dir(pokedex: Vec<CatalogEntry>) -> CatalogDir {
    CatalogDir::new(&pokedex)
}
