//! Collider component: a shape plus activity and trigger flags

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::shape::{Rect, Shape, WorldShape};
use super::world::Transform;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub shape: Shape,
    /// Offset of the shape's top-left corner from the owner's position
    pub offset: Vec2,
    /// Inactive colliders never participate in any collision pass
    pub active: bool,
    /// Triggers are skipped by tile resolution
    pub trigger: bool,
    /// Whether a trigger collider still takes part in object-pair detection
    pub report_pairs_as_trigger: bool,
}

impl Collider {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            offset: Vec2::ZERO,
            active: true,
            trigger: false,
            report_pairs_as_trigger: true,
        }
    }

    pub fn aabb(size: Vec2) -> Self {
        Self::new(Shape::Aabb { size })
    }

    pub fn circle(radius: f32) -> Self {
        Self::new(Shape::Circle { radius })
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    pub fn as_trigger(mut self) -> Self {
        self.trigger = true;
        self
    }

    /// Bounding box in world space
    pub fn world_bounds(&self, transform: &Transform) -> Rect {
        Rect::new(
            transform.position + self.offset,
            self.shape.size() * transform.scale,
        )
    }

    /// The shape placed in world space. Circles use the x extent of the
    /// scaled bounds as their diameter.
    pub fn world_shape(&self, transform: &Transform) -> WorldShape {
        let bounds = self.world_bounds(transform);
        match self.shape {
            Shape::Aabb { .. } => WorldShape::Aabb(bounds),
            Shape::Circle { .. } => WorldShape::Circle {
                center: bounds.center(),
                radius: bounds.size.x * 0.5,
            },
        }
    }

    /// Whether this collider takes part in object-pair detection
    pub fn detects_pairs(&self) -> bool {
        self.active && (!self.trigger || self.report_pairs_as_trigger)
    }

    /// Whether this collider is pushed out of solid tiles
    pub fn resolves_tiles(&self) -> bool {
        self.active && !self.trigger
    }
}
