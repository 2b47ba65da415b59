//! Runtime tunables for the synchronization channels.

use std::time::Duration;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Quiet periods for the two coalescing channels, overridable from the
/// environment (`VODNOTE_URL_DEBOUNCE_MS`, `VODNOTE_AUTOSAVE_DEBOUNCE_MS`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    /// Quiet period for notes-only URL writes, in milliseconds.
    pub url_debounce_ms: u64,
    /// Quiet period for coalescing session autosaves, in milliseconds.
    pub autosave_debounce_ms: u64,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            url_debounce_ms: 500,
            autosave_debounce_ms: 500,
        }
    }
}

impl SyncSettings {
    /// Defaults layered under `VODNOTE_`-prefixed environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Environment::with_prefix("VODNOTE"))
            .build()?
            .try_deserialize()
    }

    pub fn url_debounce(&self) -> Duration {
        Duration::from_millis(self.url_debounce_ms)
    }

    pub fn autosave_debounce(&self) -> Duration {
        Duration::from_millis(self.autosave_debounce_ms)
    }
}
