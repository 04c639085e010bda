//! Runtime configuration
//!
//! Read from `config.ron` in the data directory, falling back to defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{DATA_DIR, FOV_PARITY_BONUS, INVENTORY_VOLUME, RAY_STEP, REGEN_TIME, SIGHT_RADIUS};
use crate::error::DataError;

/// Tunable settings for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Player sight radius in tiles
    pub sight_radius: i32,
    /// Extra tiles given to AI observers (see `FOV_PARITY_BONUS`)
    pub enemy_sight_bonus: i32,
    /// Degrees between visibility rays
    pub ray_step: usize,
    /// Turns between regeneration ticks
    pub regen_time: u64,
    /// Where creature/item tables live
    pub data_dir: PathBuf,
    /// Player container capacity
    pub inventory_volume: f32,
    /// Fixed RNG seed, or entropy when absent
    pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            sight_radius: SIGHT_RADIUS,
            enemy_sight_bonus: FOV_PARITY_BONUS,
            ray_step: RAY_STEP,
            regen_time: REGEN_TIME,
            data_dir: PathBuf::from(DATA_DIR),
            inventory_volume: INVENTORY_VOLUME,
            rng_seed: None,
        }
    }
}

impl GameConfig {
    /// Sight radius used when an AI creature evaluates its turn
    pub fn enemy_sight_radius(&self) -> i32 {
        self.sight_radius + self.enemy_sight_bonus
    }

    /// Parse a config file
    pub fn from_file(path: &Path) -> Result<Self, DataError> {
        let content = fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&content).map_err(|source| DataError::Ron {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `config.ron` from `dir`, using defaults if it is missing or broken
    pub fn load_or_default(dir: &Path) -> Self {
        let path = dir.join("config.ron");
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Self { data_dir: dir.to_path_buf(), ..Self::default() };
        }
        match Self::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{}. Using default config.", e);
                Self { data_dir: dir.to_path_buf(), ..Self::default() }
            }
        }
    }
}
