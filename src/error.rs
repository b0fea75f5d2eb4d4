//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for application glue (CLI, config, server startup).
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods throughout the binary.
pub type Result<T> = anyhow::Result<T>;

/// Error returned by a [`CatalogStore`](crate::catalog::CatalogStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Catalog file could not be read.
    #[error("failed to read catalog at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Catalog file is not a valid JSON array of entries.
    #[error("failed to parse catalog at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Catalog file parsed but holds entries no snapshot can be built from.
    #[error("invalid catalog at {}: {source}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: EntryError,
    },
    /// The backing store could not be reached.
    #[error("catalog store unavailable: {0}")]
    Unavailable(String),
}

/// A catalog entry that breaks the catalog's integrity rules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryError {
    #[error("catalog contains duplicate id {0}")]
    DuplicateId(u32),
    #[error("catalog entry {id} is unusable: {reason}")]
    Unusable { id: u32, reason: &'static str },
}

/// Why a snapshot build failed.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Entry(#[from] EntryError),
}

/// Error surfaced by [`SuggestionEngine`](crate::engine::SuggestionEngine).
#[derive(Debug, thiserror::Error)]
pub enum SuggestError {
    /// The catalog snapshot could not be built. The engine stays uninitialized,
    /// so the next call retries from scratch.
    #[error("catalog initialization failed: {0}")]
    Initialization(#[source] InitError),
}

impl SuggestError {
    /// Whether a caller may retry the same request later.
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Initialization(_) => true,
        }
    }
}

impl From<InitError> for SuggestError {
    fn from(err: InitError) -> Self {
        Self::Initialization(err)
    }
}
