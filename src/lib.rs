//! Tile Platformer - simulation core for a tile-based 2D platformer
//!
//! Core modules:
//! - `sim`: Physics (bodies, colliders, tile layers, the per-frame engine)
//! - `actor`: Actor state machines driven by input and physics results
//! - `input`: Named-action input queries
//! - `settings`: Data-driven physics and actor tuning
//! - `logging`: `env_logger` setup for binaries
//!
//! A frame runs input -> actor input handling -> `PhysicsEngine::update`
//! -> actor update, after which collision pairs and tile triggers are read
//! by gameplay code.

pub mod actor;
pub mod error;
pub mod input;
pub mod logging;
pub mod settings;
pub mod sim;

pub use error::{SimError, SimResult};
pub use settings::{ActorTuning, PhysicsSettings, Settings};

/// Simulation configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep used by the demo loop
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Default gravity (pixels/s², +Y down)
    pub const DEFAULT_GRAVITY: Vec2 = Vec2::new(0.0, 980.0);
    /// Default per-axis body speed bound
    pub const DEFAULT_MAX_SPEED: Vec2 = Vec2::new(500.0, 500.0);
    /// Trailing-edge inset when sampling tiles, one pixel
    pub const TILE_TOLERANCE: f32 = 1.0;

    /// Jump grace period after leaving the ground (seconds)
    pub const COYOTE_TIME: f32 = 0.1;
    /// Invincibility flicker half-period (seconds)
    pub const FLASH_INTERVAL: f32 = 0.1;
}
