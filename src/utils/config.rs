//! Runtime settings, optionally overridden by a `cube.toml` next to the binary.
use std::path::Path;
use std::time::Duration;

use bevy::prelude::*;
use serde::Deserialize;

use crate::utils::constants::animation_constants::{
    SCRAMBLE_LENGTH, SCRAMBLE_TURN_DURATION_MS, TURN_DURATION_MS,
};
use crate::utils::constants::game_constants::{CONFIG_PATH, HISTORY_WINDOW, SEED};
use crate::utils::constants::gesture_constants::SWIPE_DEADZONE_PX;
use crate::utils::cube_state::Easing;

/// How a layer gesture decides which face was touched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitPolicy {
    /// The sticker under the pointer, falling back to the surface normal on bare bodies.
    #[default]
    Sticker,
    /// Always the dominant axis of the hit surface normal.
    DominantNormal,
}

#[derive(Resource, Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CubeConfig {
    pub turn_duration_ms: u64,
    pub scramble_turn_duration_ms: u64,
    pub scramble_length: usize,
    pub seed: u64,
    pub easing: Easing,
    pub deadzone_px: f32,
    pub history_window: usize,
    pub hit_policy: HitPolicy,
}

impl Default for CubeConfig {
    fn default() -> Self {
        Self {
            turn_duration_ms: TURN_DURATION_MS,
            scramble_turn_duration_ms: SCRAMBLE_TURN_DURATION_MS,
            scramble_length: SCRAMBLE_LENGTH,
            seed: SEED,
            easing: Easing::default(),
            deadzone_px: SWIPE_DEADZONE_PX,
            history_window: HISTORY_WINDOW,
            hit_policy: HitPolicy::default(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl CubeConfig {
    pub fn turn_duration(&self) -> Duration {
        Duration::from_millis(self.turn_duration_ms)
    }

    pub fn scramble_turn_duration(&self) -> Duration {
        Duration::from_millis(self.scramble_turn_duration_ms)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Loads `path` if it exists. Falls back to defaults on any error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                log::info!("loaded config from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!("{err}; using defaults");
                Self::default()
            }
        }
    }
}

/// Reads `cube.toml` at startup. Runs as a system so its log lines reach the subscriber.
pub fn load_config(mut commands: Commands) {
    commands.insert_resource(CubeConfig::load_or_default(CONFIG_PATH));
}
