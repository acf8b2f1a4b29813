use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use nd_cache::DEFAULT_CAPACITY;
use nd_diff::EngineOptions;

use crate::error::{SdkError, SdkResult};

/// Configuration for a [`DiffService`](crate::DiffService).
///
/// Every field has a default, so a TOML file only needs the keys it changes:
///
/// ```toml
/// cache_capacity = 250
/// deadline_ms = 500
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Maximum number of cached results. Zero disables the cache.
    pub cache_capacity: usize,
    /// Per-side ceiling on input length, in characters.
    pub max_input_chars: Option<usize>,
    /// Time budget for one edit script, in milliseconds.
    pub deadline_ms: Option<u64>,
    /// Fold small equalities into the surrounding edits.
    pub semantic_cleanup: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let options = EngineOptions::default();
        Self {
            cache_capacity: DEFAULT_CAPACITY,
            max_input_chars: options.max_input_chars,
            deadline_ms: options.deadline.map(|d| d.as_millis() as u64),
            semantic_cleanup: options.semantic_cleanup,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> SdkResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: &Path) -> SdkResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| SdkError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check the engine bounds.
    pub fn validate(&self) -> SdkResult<()> {
        self.engine_options().validate()?;
        Ok(())
    }

    /// The options handed to the diff engine.
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            max_input_chars: self.max_input_chars,
            deadline: self.deadline_ms.map(Duration::from_millis),
            semantic_cleanup: self.semantic_cleanup,
        }
    }
}
