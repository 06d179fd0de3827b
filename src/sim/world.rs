//! Entity store
//!
//! Scene ownership lives outside the physics core; `World` is the minimal
//! store the core reads from. Entities sit in a generational slot map so a
//! handle kept after removal is detected as dangling instead of aliasing
//! whatever reuses the slot.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use slotmap::{SlotMap, new_key_type};

use super::body::PhysicsBody;
use super::collider::Collider;
use crate::error::{SimError, SimResult};

new_key_type! {
    /// Non-owning handle to an entity in a `World`
    pub struct EntityId;
}

/// Position and scale of an entity (top-left origin, +Y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec2,
    pub scale: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: Vec2::ONE,
        }
    }
}

impl Transform {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    #[inline]
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}

/// A game object with the components the core understands
#[derive(Debug, Clone)]
pub struct Entity {
    pub name: String,
    pub transform: Transform,
    pub body: Option<PhysicsBody>,
    pub collider: Option<Collider>,
}

impl Entity {
    pub fn new(name: impl Into<String>, position: Vec2) -> Self {
        Self {
            name: name.into(),
            transform: Transform::at(position),
            body: None,
            collider: None,
        }
    }

    pub fn with_body(mut self, body: PhysicsBody) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_collider(mut self, collider: Collider) -> Self {
        self.collider = Some(collider);
        self
    }
}

/// Owner of every entity in a scene
#[derive(Debug, Default)]
pub struct World {
    entities: SlotMap<EntityId, Entity>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity, stamping its body with the new owner handle
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = self.entities.insert(entity);
        if let Some(body) = self.entities[id].body.as_mut() {
            body.owner = Some(id);
        }
        log::trace!("Spawned entity {:?} ({})", id, self.entities[id].name);
        id
    }

    /// Remove an entity. Handles to it become dangling.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let removed = self.entities.remove(id);
        if removed.is_some() {
            log::trace!("Despawned entity {:?}", id);
        }
        removed
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, id: EntityId) -> SimResult<&Entity> {
        self.entities.get(id).ok_or(SimError::UnknownEntity(id))
    }

    pub fn get_mut(&mut self, id: EntityId) -> SimResult<&mut Entity> {
        self.entities.get_mut(id).ok_or(SimError::UnknownEntity(id))
    }

    pub fn body(&self, id: EntityId) -> SimResult<&PhysicsBody> {
        self.get(id)?
            .body
            .as_ref()
            .ok_or(SimError::MissingComponent {
                entity: id,
                component: "physics body",
            })
    }

    pub fn body_mut(&mut self, id: EntityId) -> SimResult<&mut PhysicsBody> {
        self.get_mut(id)?
            .body
            .as_mut()
            .ok_or(SimError::MissingComponent {
                entity: id,
                component: "physics body",
            })
    }

    pub fn collider(&self, id: EntityId) -> SimResult<&Collider> {
        self.get(id)?
            .collider
            .as_ref()
            .ok_or(SimError::MissingComponent {
                entity: id,
                component: "collider",
            })
    }

    pub fn transform(&self, id: EntityId) -> SimResult<&Transform> {
        Ok(&self.get(id)?.transform)
    }

    pub fn transform_mut(&mut self, id: EntityId) -> SimResult<&mut Transform> {
        Ok(&mut self.get_mut(id)?.transform)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_stamps_body_owner() {
        let mut world = World::new();
        let id = world.spawn(Entity::new("crate", Vec2::ZERO).with_body(PhysicsBody::default()));
        assert_eq!(world.body(id).unwrap().owner, Some(id));
    }

    #[test]
    fn test_despawned_handle_is_unknown() {
        let mut world = World::new();
        let id = world.spawn(Entity::new("crate", Vec2::ZERO));
        assert!(world.despawn(id).is_some());

        // Slot reuse must not resurrect the old handle
        let other = world.spawn(Entity::new("other", Vec2::ZERO));
        assert_ne!(id, other);
        assert!(matches!(world.get(id), Err(SimError::UnknownEntity(_))));
        assert!(world.despawn(id).is_none());
    }

    #[test]
    fn test_missing_component_errors() {
        let mut world = World::new();
        let id = world.spawn(Entity::new("bare", Vec2::ZERO));
        assert!(matches!(
            world.body(id),
            Err(SimError::MissingComponent { component: "physics body", .. })
        ));
        assert!(matches!(
            world.collider(id),
            Err(SimError::MissingComponent { component: "collider", .. })
        ));
    }

    #[test]
    fn test_transform_ops() {
        let mut transform = Transform::at(Vec2::new(10.0, 20.0));
        transform.translate(Vec2::new(5.0, -5.0));
        assert_eq!(transform.position(), Vec2::new(15.0, 15.0));
        transform.set_position(Vec2::ZERO);
        assert_eq!(transform.position(), Vec2::ZERO);
    }
}
