//! Store configuration.
//!
//! Configuration is a small JSON document. Every field is optional; missing
//! fields take the values the counter app has always used.

use crate::domain::{counter::UNTITLED_COUNTER, snapshot::DEFAULT_EXPORT_PREFIX};
use crate::error::{Result, TallyError};
use crate::storage::{COUNTERS_KEY, CURRENT_COUNTER_KEY};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TallyConfig {
    /// Storage key holding the JSON array of counters
    pub counters_key: String,

    /// Storage key holding the current counter id
    pub current_counter_key: String,

    /// Title stored when a rename is blank
    pub untitled_title: String,

    /// New counters are titled `"{prefix} {N}"`
    pub default_title_prefix: String,

    /// Export files are named `"{prefix}-YYYY-MM-DD.json"`
    pub export_file_prefix: String,
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self {
            counters_key: COUNTERS_KEY.to_string(),
            current_counter_key: CURRENT_COUNTER_KEY.to_string(),
            untitled_title: UNTITLED_COUNTER.to_string(),
            default_title_prefix: "Counter".to_string(),
            export_file_prefix: DEFAULT_EXPORT_PREFIX.to_string(),
        }
    }
}

impl TallyConfig {
    pub fn validate(&self) -> Result<()> {
        if self.counters_key.trim().is_empty() {
            return Err(TallyError::ConfigError(
                "counters_key must not be empty".to_string(),
            ));
        }
        if self.current_counter_key.trim().is_empty() {
            return Err(TallyError::ConfigError(
                "current_counter_key must not be empty".to_string(),
            ));
        }
        if self.counters_key == self.current_counter_key {
            return Err(TallyError::ConfigError(
                "counters_key and current_counter_key must differ".to_string(),
            ));
        }
        if self.untitled_title.trim().is_empty() {
            return Err(TallyError::ConfigError(
                "untitled_title must not be blank".to_string(),
            ));
        }
        Ok(())
    }

    /// Loads configuration from a JSON file
    ///
    /// A missing or unparsable file yields the defaults. The result is
    /// validated either way.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "Configuration file not found, using defaults");
            return Ok(Self::default());
        }

        let json = std::fs::read_to_string(path)?;
        let config = match serde_json::from_str::<Self>(&json) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to parse configuration, using defaults: {}", e);
                Self::default()
            }
        };

        config.validate()?;
        Ok(config)
    }
}
