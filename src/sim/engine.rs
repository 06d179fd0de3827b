//! Per-frame physics step
//!
//! Each `update` runs, strictly in this order:
//! 1. clear last frame's collision pairs and tile triggers
//! 2. integrate forces (gravity included) into velocity
//! 3. resolve tile collisions axis by axis and commit positions
//! 4. detect overlapping object pairs
//!
//! Iteration follows registration order, so results are reproducible for a
//! given set of registrations.

use std::rc::Rc;

use glam::{IVec2, Vec2};

use super::body::{CollisionFlags, PhysicsBody};
use super::collision::shapes_intersect;
use super::shape::{Rect, WorldShape};
use super::tile::{TileLayer, TileType};
use super::world::{Entity, EntityId, World};
use crate::error::{SimError, SimResult};
use crate::settings::PhysicsSettings;

/// Two entities whose colliders overlapped this frame, in scan order
pub type CollisionPair = (EntityId, EntityId);

/// An entity's resting bounds overlapped a trigger tile this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileTrigger {
    pub entity: EntityId,
    pub tile: TileType,
}

/// Handle returned by `register_collision_layer`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(u32);

pub struct PhysicsEngine {
    /// Registered bodies, in insertion order
    bodies: Vec<EntityId>,
    /// Tile layers checked during resolution, in insertion order
    layers: Vec<(LayerId, Rc<dyn TileLayer>)>,
    next_layer_id: u32,
    gravity: Vec2,
    /// Subtracted from trailing edges when sampling cells
    tolerance: f32,
    /// Defaults for bodies built through `new_body`
    default_max_speed: Vec2,
    world_bounds: Option<Rect>,
    collision_pairs: Vec<CollisionPair>,
    tile_triggers: Vec<TileTrigger>,
}

impl Default for PhysicsEngine {
    fn default() -> Self {
        Self::new(&PhysicsSettings::default())
    }
}

impl PhysicsEngine {
    pub fn new(settings: &PhysicsSettings) -> Self {
        log::debug!(
            "Physics engine created (gravity {:?}, tolerance {})",
            settings.gravity,
            settings.tile_tolerance
        );
        Self {
            bodies: Vec::new(),
            layers: Vec::new(),
            next_layer_id: 0,
            gravity: settings.gravity,
            tolerance: settings.tile_tolerance,
            default_max_speed: settings.max_speed,
            world_bounds: None,
            collision_pairs: Vec::new(),
            tile_triggers: Vec::new(),
        }
    }

    /// A body using this engine's default speed bound
    pub fn new_body(&self, mass: f32, use_gravity: bool) -> PhysicsBody {
        PhysicsBody::new(mass, use_gravity).with_max_speed(self.default_max_speed)
    }

    // --- Registration ---

    pub fn register_body(&mut self, id: EntityId) {
        if self.bodies.contains(&id) {
            log::trace!("Body {:?} already registered", id);
            return;
        }
        self.bodies.push(id);
        log::trace!("Registered body {:?}", id);
    }

    /// Remove a body. Unknown handles are ignored.
    pub fn unregister_body(&mut self, id: EntityId) {
        let before = self.bodies.len();
        self.bodies.retain(|&b| b != id);
        if self.bodies.len() != before {
            log::trace!("Unregistered body {:?}", id);
        }
    }

    /// Add a tile layer to the resolution pass. The first layer registered
    /// also provides the world bounds unless bounds were set explicitly.
    pub fn register_collision_layer(&mut self, layer: Rc<dyn TileLayer>) -> LayerId {
        let id = LayerId(self.next_layer_id);
        self.next_layer_id += 1;
        if self.world_bounds.is_none() {
            self.world_bounds = Some(Rect::new(layer.offset(), layer.world_size()));
        }
        self.layers.push((id, layer));
        log::trace!("Registered collision layer {:?}", id);
        id
    }

    /// Remove a tile layer. Unknown handles are ignored.
    pub fn unregister_collision_layer(&mut self, id: LayerId) {
        let before = self.layers.len();
        self.layers.retain(|(layer_id, _)| *layer_id != id);
        if self.layers.len() != before {
            log::trace!("Unregistered collision layer {:?}", id);
        }
    }

    // --- Accessors ---

    pub fn bodies(&self) -> &[EntityId] {
        &self.bodies
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    pub fn world_bounds(&self) -> Option<Rect> {
        self.world_bounds
    }

    /// Bodies with colliders are kept inside these bounds (bottom excluded)
    pub fn set_world_bounds(&mut self, bounds: Option<Rect>) {
        self.world_bounds = bounds;
    }

    /// Object pairs detected by the last `update`
    pub fn collision_pairs(&self) -> &[CollisionPair] {
        &self.collision_pairs
    }

    /// Trigger tiles touched during the last `update`
    pub fn tile_trigger_events(&self) -> &[TileTrigger] {
        &self.tile_triggers
    }

    // --- Tile queries ---

    /// First non-empty classification at a world point across all layers
    pub fn tile_type_at(&self, world_pos: Vec2) -> TileType {
        self.layers
            .iter()
            .map(|(_, layer)| layer.tile_type_at(layer.cell_at(world_pos)))
            .find(|tile| *tile != TileType::Empty)
            .unwrap_or_default()
    }

    /// Distinct non-empty classifications overlapped by `rect`, in layer
    /// then row-major cell order
    pub fn tile_types_in(&self, rect: Rect) -> Vec<TileType> {
        let mut found = Vec::new();
        for (_, layer) in &self.layers {
            let (min, max) = self.cell_span(layer.as_ref(), rect);
            for y in min.y..=max.y {
                for x in min.x..=max.x {
                    let tile = layer.tile_type_at(IVec2::new(x, y));
                    if tile != TileType::Empty && !found.contains(&tile) {
                        found.push(tile);
                    }
                }
            }
        }
        found
    }

    /// Cells covered by `rect`, with the trailing edges pulled in by the
    /// tolerance so a box flush with a cell border does not spill over
    fn cell_span(&self, layer: &dyn TileLayer, rect: Rect) -> (IVec2, IVec2) {
        let min = layer.cell_at(rect.min());
        let trailing = (rect.max() - Vec2::splat(self.tolerance)).max(rect.min());
        (min, layer.cell_at(trailing))
    }

    // --- Frame step ---

    /// Advance every registered body by `dt` seconds
    pub fn update(&mut self, world: &mut World, dt: f32) {
        self.collision_pairs.clear();
        self.tile_triggers.clear();

        self.bodies.retain(|&id| {
            let alive = world.contains(id);
            if !alive {
                log::debug!("Dropping dangling body handle {:?}", id);
            }
            alive
        });

        for i in 0..self.bodies.len() {
            let id = self.bodies[i];
            if let Err(err) = self.step_body(world, id, dt) {
                log::debug!("Skipped body {:?} this frame: {}", id, err);
            }
        }

        self.detect_object_collisions(world);
    }

    fn step_body(&mut self, world: &mut World, id: EntityId, dt: f32) -> SimResult<()> {
        let Entity {
            transform,
            body,
            collider,
            ..
        } = world.get_mut(id)?;
        let body = body.as_mut().ok_or(SimError::MissingComponent {
            entity: id,
            component: "physics body",
        })?;
        if !body.enabled {
            // Frozen in place, but the speed bound still holds
            body.clamp_velocity();
            return Ok(());
        }

        body.integrate(self.gravity, dt);
        body.collided = CollisionFlags::default();

        let resolving = collider
            .as_ref()
            .filter(|c| c.resolves_tiles())
            .map(|c| c.world_bounds(transform))
            .filter(|bounds| !bounds.is_degenerate());

        match resolving {
            Some(bounds) => {
                let resolved = self.resolve_tiles(body, bounds, dt);
                let resolved = self.clamp_to_world(body, bounds.size, resolved);
                transform.translate(resolved - bounds.pos);
            }
            None => {
                if collider.as_ref().is_some_and(|c| c.resolves_tiles()) {
                    log::trace!("{}", SimError::DegenerateCollider(id));
                }
                transform.translate(body.velocity * dt);
            }
        }
        body.clamp_velocity();

        let resting = collider
            .as_ref()
            .filter(|c| c.active)
            .map(|c| c.world_bounds(transform))
            .filter(|bounds| !bounds.is_degenerate());
        if let Some(bounds) = resting {
            self.collect_tile_triggers(id, body, bounds);
        }
        Ok(())
    }

    /// Axis-separated sweep against every layer. Returns the corrected
    /// top-left of `bounds`; velocity is zeroed on blocked axes.
    fn resolve_tiles(&self, body: &mut PhysicsBody, bounds: Rect, dt: f32) -> Vec2 {
        let ds = body.velocity * dt;
        let size = bounds.size;
        let origin = bounds.pos;
        let mut target = origin + ds;

        // X, sampled over the unmoved vertical extent
        if ds.x != 0.0 {
            for (_, layer) in &self.layers {
                let (ts, off) = (layer.tile_size(), layer.offset());
                let edge = if ds.x > 0.0 { target.x + size.x } else { target.x };
                let tile_x = ((edge - off.x) / ts.x).floor() as i32;
                let (row_min, row_max) = self.cell_span(layer.as_ref(), bounds);
                let blocked =
                    (row_min.y..=row_max.y).any(|y| layer.tile_type_at(IVec2::new(tile_x, y)).is_solid());
                if blocked {
                    if ds.x > 0.0 {
                        target.x = off.x + tile_x as f32 * ts.x - size.x;
                        body.collided.right = true;
                    } else {
                        target.x = off.x + (tile_x + 1) as f32 * ts.x;
                        body.collided.left = true;
                    }
                    body.velocity.x = 0.0;
                    break;
                }
            }
        }

        // Y, sampled over the already corrected horizontal extent
        if ds.y != 0.0 {
            let swept = Rect::new(Vec2::new(target.x, origin.y), size);
            for (_, layer) in &self.layers {
                let (ts, off) = (layer.tile_size(), layer.offset());
                let edge = if ds.y > 0.0 { target.y + size.y } else { target.y };
                let tile_y = ((edge - off.y) / ts.y).floor() as i32;
                let tile_top = off.y + tile_y as f32 * ts.y;
                let (col_min, col_max) = self.cell_span(layer.as_ref(), swept);
                let blocked = (col_min.x..=col_max.x).any(|x| {
                    match layer.tile_type_at(IVec2::new(x, tile_y)) {
                        TileType::Solid => true,
                        // One-way platforms only catch bodies that started above them
                        TileType::Unisolid => ds.y > 0.0 && origin.y + size.y <= tile_top,
                        _ => false,
                    }
                });
                if blocked {
                    if ds.y > 0.0 {
                        target.y = tile_top - size.y;
                        body.collided.below = true;
                    } else {
                        target.y = tile_top + ts.y;
                        body.collided.above = true;
                    }
                    body.velocity.y = 0.0;
                    break;
                }
            }
        }

        target
    }

    /// Keep a box of `size` at `pos` inside the world bounds. The bottom is
    /// left open so bodies can fall out of the level.
    fn clamp_to_world(&self, body: &mut PhysicsBody, size: Vec2, mut pos: Vec2) -> Vec2 {
        let Some(bounds) = self.world_bounds else {
            return pos;
        };
        let (min, max) = (bounds.min(), bounds.max());
        if pos.x < min.x {
            pos.x = min.x;
            body.velocity.x = 0.0;
            body.collided.left = true;
        } else if pos.x + size.x > max.x {
            pos.x = max.x - size.x;
            body.velocity.x = 0.0;
            body.collided.right = true;
        }
        if pos.y < min.y {
            pos.y = min.y;
            body.velocity.y = 0.0;
            body.collided.above = true;
        }
        pos
    }

    /// Record trigger tiles under the resting bounds, once per kind
    fn collect_tile_triggers(&mut self, id: EntityId, body: &mut PhysicsBody, bounds: Rect) {
        for tile in self.tile_types_in(bounds) {
            if tile == TileType::Ladder {
                body.collided.ladder = true;
            }
            if tile.is_trigger() {
                self.tile_triggers.push(TileTrigger { entity: id, tile });
            }
        }
    }

    /// O(n^2) scan over enabled bodies with pair-detecting colliders
    fn detect_object_collisions(&mut self, world: &World) {
        let candidates: Vec<(EntityId, WorldShape)> = self
            .bodies
            .iter()
            .filter_map(|&id| {
                let entity = world.get(id).ok()?;
                let body = entity.body.as_ref()?;
                let collider = entity.collider.as_ref()?;
                (body.enabled && collider.detects_pairs())
                    .then(|| (id, collider.world_shape(&entity.transform)))
            })
            .collect();

        for (i, (id_a, shape_a)) in candidates.iter().enumerate() {
            for (id_b, shape_b) in &candidates[i + 1..] {
                if shapes_intersect(shape_a, shape_b) {
                    self.collision_pairs.push((*id_a, *id_b));
                }
            }
        }
    }
}
