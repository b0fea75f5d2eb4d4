//! TOML configuration file.
//!
//! Every field has a default, so an absent file means default settings.

use crate::cache::{DEFAULT_CAPACITY, RESULT_TTL};
use crate::engine::{DEFAULT_LIMIT, EngineOptions};
use crate::error::Result;
use anyhow::Context;
use serde::Deserialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name looked up under the user's config directory.
const CONFIG_FILE: &str = "poke-suggest/config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// JSON catalog file
    pub catalog_path: PathBuf,
    /// Result count used when a request omits one
    pub default_limit: usize,
    pub cache: CacheConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
    pub ttl_secs: u64,
    pub capacity: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("catalog.json"),
            default_limit: DEFAULT_LIMIT,
            cache: CacheConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: RESULT_TTL.as_secs(),
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, the file under the user's
    /// config directory is used when present, otherwise defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match default_config_path().filter(|p| p.is_file()) {
                Some(path) => path,
                None => {
                    tracing::debug!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content)?;
        config.catalog_path = PathBuf::from(&*expand_tilde(&config.catalog_path.to_string_lossy()));
        Ok(config)
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            cache_ttl: Duration::from_secs(self.cache.ttl_secs),
            cache_capacity: self.cache.capacity,
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_FILE))
}

/// Expands tilde (`~`) in a path to the user's home directory.
///
/// - `~/foo` becomes `/home/user/foo`
/// - `~` becomes `/home/user`
/// - Other paths are returned unchanged
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}
