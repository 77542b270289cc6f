//! Gameplay tuning
//!
//! Loaded from a JSON file. Missing fields take their defaults, so a settings
//! file only needs the values it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;
use crate::sim::actor::EnemyTuning;
use crate::sim::arena::Difficulty;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Starting difficulty (can be cycled from the menu)
    pub difficulty: Difficulty,
    /// Seed for the autopilot input generator
    pub seed: u64,

    // === Player ===
    /// Gravity magnitude at 60 fps
    pub gravity: f32,
    /// Drive speed at 60 fps
    pub player_speed: f32,
    pub player_max_health: i32,
    pub bullet_speed: f32,

    // === Enemies ===
    pub enemy_speed: f32,
    /// Frames between patrol direction changes
    pub enemy_change_at: u32,
    pub enemy_shoot_range: f32,
    pub enemy_bullet_speed: f32,
    /// Frames an enemy waits after firing
    pub enemy_reload_frames: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            seed: 0,

            gravity: GRAVITY,
            player_speed: PLAYER_SPEED,
            player_max_health: PLAYER_MAX_HEALTH,
            bullet_speed: BULLET_SPEED,

            enemy_speed: ENEMY_SPEED,
            enemy_change_at: ENEMY_CHANGE_AT,
            enemy_shoot_range: ENEMY_SHOOT_RANGE,
            enemy_bullet_speed: ENEMY_BULLET_SPEED,
            enemy_reload_frames: ENEMY_RELOAD_FRAMES,
        }
    }
}

impl Settings {
    /// Enemy tuning derived from these settings
    pub fn enemy_tuning(&self) -> EnemyTuning {
        EnemyTuning {
            speed: self.enemy_speed,
            change_at: self.enemy_change_at.max(1),
            max_shoot_length: self.enemy_shoot_range,
            bullet_speed: self.enemy_bullet_speed,
            reload_frames: self.enemy_reload_frames,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults if the file is missing or invalid
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::from_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}
