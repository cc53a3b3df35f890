//! Startup configuration
//!
//! Sources, later wins: built-in defaults, the `#sim-config` JSON block in the
//! page, then the URL query string. Nothing is written back.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DEFAULT_GRAVITY, DEFAULT_SPAWN_RATE};

/// What happens to a shape that falls past the bottom of the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FallPolicy {
    /// Drop it from both the display list and the live list
    #[default]
    Prune,
    /// Drop it from the display list only; it keeps counting in the stats
    Legacy,
}

impl FallPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallPolicy::Prune => "prune",
            FallPolicy::Legacy => "legacy",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "prune" => Some(FallPolicy::Prune),
            "legacy" => Some(FallPolicy::Legacy),
            _ => None,
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid value {value:?} for query parameter `{key}`")]
    InvalidQuery { key: String, value: String },
    #[error("spawn rate must be at least 1")]
    ZeroSpawnRate,
    #[error("gravity must be at least 1")]
    ZeroGravity,
}

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimConfig {
    /// Initial shapes per second
    pub spawn_rate: u32,
    /// Initial pixels per frame
    pub gravity: u32,
    /// RNG seed (clock-derived when absent)
    pub seed: Option<u64>,
    pub fall_policy: FallPolicy,
    /// `log` level name (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            spawn_rate: DEFAULT_SPAWN_RATE,
            gravity: DEFAULT_GRAVITY,
            seed: None,
            fall_policy: FallPolicy::Prune,
            log_level: "info".to_string(),
        }
    }
}

impl SimConfig {
    /// Parse a JSON config block; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `key=value` pairs from a URL query string (leading `?` optional)
    pub fn apply_query(&mut self, query: &str) -> Result<(), ConfigError> {
        let query = query.trim_start_matches('?');
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let invalid = || ConfigError::InvalidQuery {
                key: key.to_string(),
                value: value.to_string(),
            };
            match key {
                "spawnRate" | "rate" => self.spawn_rate = value.parse().map_err(|_| invalid())?,
                "gravity" => self.gravity = value.parse().map_err(|_| invalid())?,
                "seed" => self.seed = Some(value.parse().map_err(|_| invalid())?),
                "fall" => self.fall_policy = FallPolicy::parse(value).ok_or_else(invalid)?,
                "log" => {
                    if log_level_filter(value).is_none() {
                        return Err(invalid());
                    }
                    self.log_level = value.to_lowercase();
                }
                _ => log::debug!("Ignoring unknown query parameter `{}`", key),
            }
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.spawn_rate == 0 {
            return Err(ConfigError::ZeroSpawnRate);
        }
        if self.gravity == 0 {
            return Err(ConfigError::ZeroGravity);
        }
        Ok(())
    }

    /// Configured log level (falls back to `Info` for unknown names)
    pub fn log_level(&self) -> log::Level {
        log_level_filter(&self.log_level)
            .and_then(|f| f.to_level())
            .unwrap_or(log::Level::Info)
    }

    /// Element id of the optional JSON config block
    #[cfg(target_arch = "wasm32")]
    const CONFIG_ELEMENT_ID: &'static str = "sim-config";

    /// Load config from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let window = web_sys::window();
        let mut config = window
            .as_ref()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content())
            .map(|json| match Self::from_json(&json) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("Ignoring #{}: {}", Self::CONFIG_ELEMENT_ID, e);
                    Self::default()
                }
            })
            .unwrap_or_default();

        if let Some(search) = window.and_then(|w| w.location().search().ok()) {
            let fallback = config.clone();
            if let Err(e) = config.apply_query(&search) {
                log::warn!("Ignoring query string {:?}: {}", search, e);
                config = fallback;
            }
        }

        config
    }

    /// Native builds have no page to read from
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

fn log_level_filter(name: &str) -> Option<log::LevelFilter> {
    name.parse().ok()
}
