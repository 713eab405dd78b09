//! Game configuration, loaded from RON with defaults for every field.

use std::path::Path;

use bevy::prelude::*;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Reads and parses a RON file.
pub fn load_ron<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, LoadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_ron(&text, &path.display().to_string())
}

/// Parses RON text; `origin` names the source in errors.
pub fn parse_ron<T: DeserializeOwned>(text: &str, origin: &str) -> Result<T, LoadError> {
    ron::from_str(text).map_err(|source| LoadError::Parse {
        path: origin.to_string(),
        source,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub width: u32,
    pub height: u32,
    /// Simulation ticks per second; every tick advances the clock by `1 / fps`.
    pub fps: u32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fps: 120,
        }
    }
}

impl DisplaySettings {
    pub fn frame_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / f64::from(self.fps.max(1)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Pixels per second.
    pub speed: f32,
    pub hitbox: (f32, f32),
    pub interact_ms: u64,
    pub tool_use_ms: u64,
    pub tool_switch_ms: u64,
    pub seed_use_ms: u64,
    pub starting_seeds: i32,
    /// Debit one seed per successful planting.
    pub consume_seeds: bool,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            speed: 300.0,
            hitbox: (66.0, 122.0),
            interact_ms: 50,
            tool_use_ms: 500,
            tool_switch_ms: 200,
            seed_use_ms: 200,
            starting_seeds: 5,
            consume_seeds: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherTuning {
    /// Chance that a new day starts with rain.
    pub rain_chance: f64,
    /// Brightness lost (and regained) per tick while the player sleeps.
    pub fade_speed: i32,
}

impl Default for WeatherTuning {
    fn default() -> Self {
        Self {
            rain_chance: 3.0 / 11.0,
            fade_speed: 2,
        }
    }
}

#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub display: DisplaySettings,
    pub player: PlayerTuning,
    pub weather: WeatherTuning,
    /// Fixed RNG seed for reproducible runs.
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        load_ron(path)
    }

    /// Loads the config, falling back to defaults when the file is missing
    /// or malformed.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                warn!("[Config] {err}; using defaults");
                Self::default()
            }
        }
    }
}
