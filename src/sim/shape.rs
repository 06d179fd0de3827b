//! Collision shape geometry
//!
//! Shapes are described in local space (size only) and resolved into world
//! space by a collider once the owner's transform is known:
//! - `Shape`: the local description (box size or circle radius)
//! - `Rect`: an axis-aligned box in world space (top-left origin, +Y down)
//! - `WorldShape`: a shape placed in the world, ready for intersection tests

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, `pos` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Zero or negative extent on either axis
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Overlap test where shared edges do not count as contact
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
    }

    /// Closest point inside the rectangle to `point`
    #[inline]
    pub fn clamp_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min(), self.max())
    }
}

/// Local shape description owned by a collider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Axis-aligned box of the given size
    Aabb { size: Vec2 },
    /// Circle inscribed in a `2r x 2r` box
    Circle { radius: f32 },
}

impl Shape {
    /// Size of the local bounding box
    pub fn size(&self) -> Vec2 {
        match *self {
            Shape::Aabb { size } => size,
            Shape::Circle { radius } => Vec2::splat(radius * 2.0),
        }
    }
}

/// A shape positioned in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldShape {
    Aabb(Rect),
    Circle { center: Vec2, radius: f32 },
}

impl WorldShape {
    /// Axis-aligned bounds of this shape
    pub fn bounds(&self) -> Rect {
        match *self {
            WorldShape::Aabb(rect) => rect,
            WorldShape::Circle { center, radius } => {
                Rect::new(center - Vec2::splat(radius), Vec2::splat(radius * 2.0))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0));
        assert_eq!(rect.max(), Vec2::new(40.0, 60.0));
        assert_eq!(rect.center(), Vec2::new(25.0, 40.0));
        assert!(!rect.is_degenerate());
        assert!(Rect::new(Vec2::ZERO, Vec2::new(0.0, 5.0)).is_degenerate());
        assert!(Rect::new(Vec2::ZERO, Vec2::new(5.0, -1.0)).is_degenerate());
    }

    #[test]
    fn test_rect_shared_edge_is_not_overlap() {
        let a = Rect::new(Vec2::ZERO, Vec2::splat(16.0));
        let b = Rect::new(Vec2::new(16.0, 0.0), Vec2::splat(16.0));
        assert!(!a.overlaps(&b));

        let c = Rect::new(Vec2::new(15.5, 0.0), Vec2::splat(16.0));
        assert!(a.overlaps(&c));
    }

    #[test]
    fn test_circle_bounds() {
        let shape = Shape::Circle { radius: 8.0 };
        assert_eq!(shape.size(), Vec2::splat(16.0));

        let placed = WorldShape::Circle {
            center: Vec2::new(50.0, 50.0),
            radius: 8.0,
        };
        assert_eq!(placed.bounds(), Rect::new(Vec2::splat(42.0), Vec2::splat(16.0)));
    }
}
