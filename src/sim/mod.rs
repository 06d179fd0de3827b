//! Physics simulation module
//!
//! Single-threaded and frame-stepped:
//! - One `PhysicsEngine::update` per frame, no internal threading
//! - Stable iteration order (registration order)
//! - No rendering or platform dependencies

pub mod body;
pub mod collider;
pub mod collision;
pub mod engine;
pub mod shape;
pub mod tile;
pub mod world;

pub use body::{CollisionFlags, PhysicsBody};
pub use collider::Collider;
pub use collision::{aabb_aabb, aabb_circle, circle_circle, shapes_intersect};
pub use engine::{CollisionPair, LayerId, PhysicsEngine, TileTrigger};
pub use shape::{Rect, Shape, WorldShape};
pub use tile::{TileGrid, TileLayer, TileType};
pub use world::{Entity, EntityId, Transform, World};
