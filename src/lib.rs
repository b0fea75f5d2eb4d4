pub mod cache;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod search;
pub mod server;
pub mod state;
pub mod tools;
pub mod tracing;
pub mod types;

pub use catalog::{CatalogEntry, CatalogStore, MemoryStore};
pub use engine::{EngineOptions, SuggestionEngine};
pub use error::{EntryError, InitError, StoreError, SuggestError};
pub use types::{ScoredResult, Suggestions};
