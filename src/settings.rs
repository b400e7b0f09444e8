//! Play-area and cadence settings
//!
//! Read from a JSON file by the driver; every field has a default so partial
//! files work.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{SNAKE_STEP_MS, TICK_MS};
use crate::sim::Arena;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("arena must have positive width and height (got {width}x{height})")]
    EmptyArena { width: f32, height: f32 },

    #[error("tick_ms must be non-zero")]
    ZeroTick,

    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Play area in pixels
    pub arena: Arena,
    /// Nominal host callback period
    pub tick_ms: u32,
    /// Snake grid-advance period
    pub snake_step_ms: u32,
    /// Fixed RNG seed (None = derive one per run)
    pub seed: Option<u64>,
    /// Simulate cosmetic parallax stars
    pub starfield: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena: Arena::default(),
            tick_ms: TICK_MS,
            snake_step_ms: SNAKE_STEP_MS,
            seed: None,
            starfield: true,
        }
    }
}

impl Settings {
    /// Strict parse
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a file, falling back to defaults when it is missing or invalid
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path)
            .map_err(SettingsError::from)
            .and_then(|json| Self::from_json(&json))
        {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        // Negated comparisons so NaN is rejected too
        if !(self.arena.width > 0.0 && self.arena.height > 0.0) {
            return Err(SettingsError::EmptyArena {
                width: self.arena.width,
                height: self.arena.height,
            });
        }
        if self.tick_ms == 0 {
            return Err(SettingsError::ZeroTick);
        }
        Ok(())
    }

    /// Ticks between snake cell advances (at least 1)
    pub fn snake_step_ticks(&self) -> u64 {
        let ticks = (self.snake_step_ms as f32 / self.tick_ms.max(1) as f32).round() as u64;
        ticks.max(1)
    }
}
