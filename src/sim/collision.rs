//! Narrow-phase intersection tests between placed shapes
//!
//! Every test is strict: shapes that only touch along an edge or at a
//! single point do not intersect. The dispatcher normalizes the pair order
//! so `shapes_intersect(a, b) == shapes_intersect(b, a)` always holds.

use glam::Vec2;

use super::shape::{Rect, WorldShape};

/// Box vs box overlap (shared edges are not contact)
#[inline]
pub fn aabb_aabb(a: &Rect, b: &Rect) -> bool {
    a.overlaps(b)
}

/// Circle vs circle: squared center distance against squared radius sum
#[inline]
pub fn circle_circle(center_a: Vec2, radius_a: f32, center_b: Vec2, radius_b: f32) -> bool {
    let reach = radius_a + radius_b;
    center_a.distance_squared(center_b) < reach * reach
}

/// Box vs circle: clamp the circle center into the box and compare
/// the clamped point's distance to the radius
#[inline]
pub fn aabb_circle(rect: &Rect, center: Vec2, radius: f32) -> bool {
    let closest = rect.clamp_point(center);
    closest.distance_squared(center) < radius * radius
}

/// Dispatch over every shape pairing
pub fn shapes_intersect(a: &WorldShape, b: &WorldShape) -> bool {
    match (a, b) {
        (WorldShape::Aabb(ra), WorldShape::Aabb(rb)) => aabb_aabb(ra, rb),
        (
            WorldShape::Circle {
                center: ca,
                radius: ra,
            },
            WorldShape::Circle {
                center: cb,
                radius: rb,
            },
        ) => circle_circle(*ca, *ra, *cb, *rb),
        (WorldShape::Aabb(rect), WorldShape::Circle { center, radius })
        | (WorldShape::Circle { center, radius }, WorldShape::Aabb(rect)) => {
            aabb_circle(rect, *center, *radius)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn boxed(x: f32, y: f32, w: f32, h: f32) -> WorldShape {
        WorldShape::Aabb(Rect::new(Vec2::new(x, y), Vec2::new(w, h)))
    }

    fn circle(x: f32, y: f32, r: f32) -> WorldShape {
        WorldShape::Circle {
            center: Vec2::new(x, y),
            radius: r,
        }
    }

    #[test]
    fn test_aabb_overlap_and_touching() {
        assert!(shapes_intersect(
            &boxed(0.0, 0.0, 32.0, 32.0),
            &boxed(16.0, 16.0, 32.0, 32.0)
        ));
        // Touching along x = 32 only
        assert!(!shapes_intersect(
            &boxed(0.0, 0.0, 32.0, 32.0),
            &boxed(32.0, 0.0, 32.0, 32.0)
        ));
        assert!(!shapes_intersect(
            &boxed(0.0, 0.0, 32.0, 32.0),
            &boxed(100.0, 100.0, 8.0, 8.0)
        ));
    }

    #[test]
    fn test_circle_circle() {
        assert!(shapes_intersect(&circle(0.0, 0.0, 10.0), &circle(15.0, 0.0, 10.0)));
        // Exactly touching
        assert!(!shapes_intersect(&circle(0.0, 0.0, 10.0), &circle(20.0, 0.0, 10.0)));
    }

    #[test]
    fn test_aabb_circle_corner() {
        let rect = boxed(0.0, 0.0, 10.0, 10.0);
        // Diagonal from the (10, 10) corner: distance ~7.07
        assert!(!shapes_intersect(&rect, &circle(15.0, 15.0, 7.0)));
        assert!(shapes_intersect(&rect, &circle(15.0, 15.0, 7.5)));
        // Center inside the box
        assert!(shapes_intersect(&rect, &circle(5.0, 5.0, 1.0)));
    }

    #[test]
    fn test_aabb_circle_order_independent() {
        let rect = boxed(0.0, 0.0, 10.0, 10.0);
        let c = circle(12.0, 5.0, 3.0);
        assert!(shapes_intersect(&rect, &c));
        assert!(shapes_intersect(&c, &rect));
    }

    fn any_shape() -> impl Strategy<Value = WorldShape> {
        prop_oneof![
            (-50.0f32..50.0, -50.0f32..50.0, 0.5f32..40.0, 0.5f32..40.0)
                .prop_map(|(x, y, w, h)| boxed(x, y, w, h)),
            (-50.0f32..50.0, -50.0f32..50.0, 0.5f32..20.0).prop_map(|(x, y, r)| circle(x, y, r)),
        ]
    }

    proptest! {
        #[test]
        fn prop_intersection_is_symmetric(a in any_shape(), b in any_shape()) {
            prop_assert_eq!(shapes_intersect(&a, &b), shapes_intersect(&b, &a));
        }
    }
}
