//! Physics body: per-entity velocity, force, and mass state

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::world::EntityId;
use crate::consts::DEFAULT_MAX_SPEED;

/// Contacts recorded during the most recent resolution pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionFlags {
    pub below: bool,
    pub above: bool,
    pub left: bool,
    pub right: bool,
    /// Resting box overlaps a ladder tile
    pub ladder: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsBody {
    /// Back-reference to the owning entity, set by `World::spawn`
    #[serde(skip)]
    pub owner: Option<EntityId>,
    pub velocity: Vec2,
    /// Accumulated force, consumed and cleared every update
    force: Vec2,
    mass: f32,
    pub use_gravity: bool,
    pub enabled: bool,
    /// Per-axis velocity bound
    pub max_speed: Vec2,
    #[serde(skip)]
    pub collided: CollisionFlags,
}

impl Default for PhysicsBody {
    fn default() -> Self {
        Self {
            owner: None,
            velocity: Vec2::ZERO,
            force: Vec2::ZERO,
            mass: 1.0,
            use_gravity: true,
            enabled: true,
            max_speed: DEFAULT_MAX_SPEED,
            collided: CollisionFlags::default(),
        }
    }
}

impl PhysicsBody {
    pub fn new(mass: f32, use_gravity: bool) -> Self {
        let mut body = Self {
            use_gravity,
            ..Default::default()
        };
        body.set_mass(mass);
        body
    }

    pub fn with_max_speed(mut self, max_speed: Vec2) -> Self {
        self.max_speed = max_speed.abs();
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    #[inline]
    pub fn add_force(&mut self, force: Vec2) {
        self.force += force;
    }

    #[inline]
    pub fn force(&self) -> Vec2 {
        self.force
    }

    #[inline]
    pub fn clear_force(&mut self) {
        self.force = Vec2::ZERO;
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Non-positive or non-finite masses are replaced with 1.0
    pub fn set_mass(&mut self, mass: f32) {
        if mass > 0.0 && mass.is_finite() {
            self.mass = mass;
        } else {
            log::warn!("Rejected body mass {}, using 1.0", mass);
            self.mass = 1.0;
        }
    }

    #[inline]
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Clamp each velocity component to `[-max_speed, max_speed]`
    #[inline]
    pub fn clamp_velocity(&mut self) {
        let bound = self.max_speed.abs();
        self.velocity = self.velocity.max(-bound).min(bound);
    }

    /// Integrate accumulated force into velocity and clear it
    pub fn integrate(&mut self, gravity: Vec2, dt: f32) {
        if self.use_gravity {
            self.add_force(gravity * self.mass);
        }
        self.velocity += (self.force / self.mass) * dt;
        self.clear_force();
    }

    #[inline]
    pub fn has_collided_below(&self) -> bool {
        self.collided.below
    }

    #[inline]
    pub fn has_collided_ladder(&self) -> bool {
        self.collided.ladder
    }
}
