//! Tunable game configuration.
//!
//! Every field has a default from `constants`, so a JSON file only needs the
//! keys it wants to change.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::enums::Archetype;

/// Errors raised while loading or validating a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Session-wide tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// RNG seed. Same seed and same inputs give the same game.
    pub seed: u64,
    pub world_width: f64,
    pub world_height: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
    /// Clamp for one tick's elapsed time (seconds).
    pub max_frame_dt: f64,
    /// Scale per-frame damping factors by elapsed time instead of applying them flat.
    pub normalize_damping: bool,
    /// Player sprite set used when the host does not choose one.
    pub default_hero: Archetype,
    pub waves: WaveConfig,
}

/// Wave pacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Seconds every hostile must stay down before the next wave.
    pub delay_secs: f64,
    pub base_soldiers: u32,
    pub base_zombies: u32,
    pub soldiers_per_wave: f64,
    pub zombies_per_wave: f64,
    pub max_soldiers: u32,
    pub max_zombies: u32,
    pub bonus_base: u64,
    pub bonus_per_wave: u64,
    pub heal: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            max_frame_dt: MAX_FRAME_DT,
            normalize_damping: true,
            default_hero: Archetype::default(),
            waves: WaveConfig::default(),
        }
    }
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            delay_secs: WAVE_DELAY,
            base_soldiers: WAVE_BASE_SOLDIERS,
            base_zombies: WAVE_BASE_ZOMBIES,
            soldiers_per_wave: WAVE_SOLDIERS_PER_WAVE,
            zombies_per_wave: WAVE_ZOMBIES_PER_WAVE,
            max_soldiers: WAVE_MAX_SOLDIERS,
            max_zombies: WAVE_MAX_ZOMBIES,
            bonus_base: WAVE_BONUS_BASE,
            bonus_per_wave: WAVE_BONUS_PER_WAVE,
            heal: WAVE_HEAL,
        }
    }
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.world_width > 0.0 && self.world_height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "world must have positive extent, got {}x{}",
                self.world_width, self.world_height
            )));
        }
        if !(self.viewport_width > 0.0 && self.viewport_height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "viewport must have positive extent, got {}x{}",
                self.viewport_width, self.viewport_height
            )));
        }
        if !(self.max_frame_dt > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "max_frame_dt must be positive, got {}",
                self.max_frame_dt
            )));
        }
        if self.waves.max_soldiers == 0 || self.waves.max_zombies == 0 {
            return Err(ConfigError::Invalid(format!(
                "max per wave must be positive, got {} soldiers and {} zombies",
                self.waves.max_soldiers, self.waves.max_zombies
            )));
        }
        if !(self.waves.delay_secs >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "wave delay must not be negative, got {}",
                self.waves.delay_secs
            )));
        }
        Ok(())
    }

    /// Per-frame factor adjusted to `dt` when normalization is on.
    pub fn damping(&self, factor: f64, dt: f64) -> f64 {
        if self.normalize_damping {
            factor.powf(dt / DAMPING_REFERENCE_DT)
        } else {
            factor
        }
    }
}

impl WaveConfig {
    /// Soldiers spawned for `wave`, capped at `max_soldiers`.
    pub fn soldier_count(&self, wave: u32) -> u32 {
        scaled_count(self.base_soldiers, self.soldiers_per_wave, wave, self.max_soldiers)
    }

    /// Zombies spawned for `wave`, capped at `max_zombies`.
    pub fn zombie_count(&self, wave: u32) -> u32 {
        scaled_count(self.base_zombies, self.zombies_per_wave, wave, self.max_zombies)
    }

    /// Score bonus awarded when `wave` starts.
    pub fn bonus(&self, wave: u32) -> u64 {
        self.bonus_base + self.bonus_per_wave * wave as u64
    }
}

fn scaled_count(base: u32, per_wave: f64, wave: u32, max: u32) -> u32 {
    let extra = (per_wave.max(0.0) * wave as f64).floor() as u32;
    base.saturating_add(extra).min(max)
}
