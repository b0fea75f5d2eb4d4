//! Catalog records and the store the engine reads them from.

pub mod entry;
pub mod store;

pub use entry::{CatalogEntry, PLACEHOLDER_IMAGE, load_json, validate_entries};
pub use store::{CatalogStore, ListFilter, MAX_PAGE_SIZE, MemoryStore, Page};
