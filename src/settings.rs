//! Simulation settings and actor tuning
//!
//! Loaded from JSON; every field has a default so partial files work.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimResult;

/// Engine-wide physics parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Gravity acceleration (pixels/s², +Y down)
    pub gravity: Vec2,
    /// Speed bound given to bodies created through the engine
    pub max_speed: Vec2,
    /// Pulled off trailing edges when sampling tiles (pixels)
    pub tile_tolerance: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            max_speed: DEFAULT_MAX_SPEED,
            tile_tolerance: TILE_TOLERANCE,
        }
    }
}

/// Per-actor movement and reaction tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorTuning {
    /// Horizontal force applied while a direction is held
    pub move_force: f32,
    /// Horizontal speed cap while walking or airborne
    pub max_speed: f32,
    pub climb_speed: f32,
    /// Upward speed set when a jump starts
    pub jump_velocity: f32,
    /// Horizontal velocity multiplier per idle update
    pub friction_factor: f32,
    /// Grace period after leaving the ground during which jumping still works
    pub coyote_time: f32,
    /// Half of one invincibility flicker cycle
    pub flash_interval: f32,
    /// Time spent in the hurt state before control returns mid-air
    pub stunned_duration: f32,
    /// Velocity applied when hurt while facing right
    pub knockback: Vec2,
    /// Upward speed of the death hop
    pub dead_bounce: f32,
    pub max_health: i32,
    pub invincibility_duration: f32,
}

impl Default for ActorTuning {
    fn default() -> Self {
        Self {
            move_force: 200.0,
            max_speed: 120.0,
            climb_speed: 100.0,
            jump_velocity: 350.0,
            friction_factor: 0.85,
            coyote_time: COYOTE_TIME,
            flash_interval: FLASH_INTERVAL,
            stunned_duration: 0.4,
            knockback: Vec2::new(-100.0, -150.0),
            dead_bounce: 200.0,
            max_health: 3,
            invincibility_duration: 2.0,
        }
    }
}

/// All settings in one document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub physics: PhysicsSettings,
    pub player: ActorTuning,
}

impl Settings {
    pub fn from_json(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}
