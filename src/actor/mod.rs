//! Actors: a state machine bound to an entity's physics body
//!
//! A frame for an actor is `handle_input` before the physics step and
//! `update` after it, so states see this frame's contacts when deciding
//! transitions.

pub mod ai;
pub mod health;
pub mod state;
pub mod states;

pub use ai::{Fly, HopAir, HopConfig, HopWait, Patrol};
pub use health::Health;
pub use state::{ActorState, StateKind, StateMachine, Transition};

use glam::Vec2;

use crate::error::{SimError, SimResult};
use crate::input::{InputState, NoInput};
use crate::settings::ActorTuning;
use crate::sim::{Collider, Entity, EntityId, PhysicsBody, World};

/// What the renderer should show for an actor
#[derive(Debug, Clone, PartialEq)]
pub struct Appearance {
    pub animation: &'static str,
    pub animation_playing: bool,
    /// Facing left
    pub flipped: bool,
    pub hidden: bool,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            animation: "idle",
            animation_playing: true,
            flipped: false,
            hidden: false,
        }
    }
}

/// Everything a state may read or change during one call
pub struct ActorContext<'a> {
    pub body: &'a mut PhysicsBody,
    pub collider: Option<&'a mut Collider>,
    /// Owner position at the time the context was built
    pub position: Vec2,
    pub appearance: &'a mut Appearance,
    pub sounds: &'a mut Vec<&'static str>,
    pub tuning: &'a ActorTuning,
    pub input: &'a dyn InputState,
    /// On the ground or within the coyote window
    pub grounded: bool,
    /// Seconds since the current state was entered
    pub state_time: f32,
}

impl ActorContext<'_> {
    pub fn play_animation(&mut self, name: &'static str) {
        self.appearance.animation = name;
        self.appearance.animation_playing = true;
    }

    pub fn play_sound(&mut self, name: &'static str) {
        self.sounds.push(name);
    }

    /// +1 facing right, -1 facing left
    pub fn facing(&self) -> f32 {
        if self.appearance.flipped { -1.0 } else { 1.0 }
    }

    pub fn is_down(&self, action: &str) -> bool {
        self.input.is_action_down(action)
    }

    pub fn is_pressed(&self, action: &str) -> bool {
        self.input.is_action_pressed(action)
    }
}

/// How damage that leaves the actor alive is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HurtReaction {
    /// Switch to the hurt state (knockback, stun)
    Stagger,
    /// Keep the current behavior
    Ignore,
}

#[derive(Debug)]
pub struct Actor {
    entity: EntityId,
    machine: StateMachine,
    health: Health,
    appearance: Appearance,
    sounds: Vec<&'static str>,
    tuning: ActorTuning,
    hurt_reaction: HurtReaction,
    /// Time since the body last touched the ground
    coyote_timer: f32,
    /// Position within the current flicker cycle
    flash_timer: f32,
}

impl Actor {
    /// Player-controlled actor starting in `Idle`
    pub fn player(world: &mut World, entity: EntityId, tuning: ActorTuning) -> SimResult<Self> {
        Self::new(
            world,
            entity,
            tuning,
            Box::new(states::Idle),
            HurtReaction::Stagger,
        )
    }

    /// Actor driven by an AI behavior state
    pub fn ai(
        world: &mut World,
        entity: EntityId,
        tuning: ActorTuning,
        behavior: Box<dyn ActorState>,
    ) -> SimResult<Self> {
        Self::new(world, entity, tuning, behavior, HurtReaction::Ignore)
    }

    pub fn new(
        world: &mut World,
        entity: EntityId,
        tuning: ActorTuning,
        initial: Box<dyn ActorState>,
        hurt_reaction: HurtReaction,
    ) -> SimResult<Self> {
        let mut actor = Self {
            entity,
            machine: StateMachine::new(initial),
            health: Health::new(tuning.max_health, tuning.invincibility_duration),
            appearance: Appearance::default(),
            sounds: Vec::new(),
            tuning,
            hurt_reaction,
            coyote_timer: 0.0,
            flash_timer: 0.0,
        };
        actor.with_context(world, &NoInput, |machine, ctx| machine.start(ctx))?;
        log::debug!("Actor created for entity {:?}", entity);
        Ok(actor)
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }

    pub fn state(&self) -> StateKind {
        self.machine.kind()
    }

    pub fn health(&self) -> &Health {
        &self.health
    }

    pub fn health_mut(&mut self) -> &mut Health {
        &mut self.health
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    pub fn tuning(&self) -> &ActorTuning {
        &self.tuning
    }

    pub fn is_dead(&self) -> bool {
        self.machine.kind().is_terminal()
    }

    /// Drain queued sound cues
    pub fn take_sounds(&mut self) -> Vec<&'static str> {
        std::mem::take(&mut self.sounds)
    }

    /// Grounded for jump purposes: touching the ground or inside the
    /// coyote window
    fn grounded(&self, body: &PhysicsBody) -> bool {
        body.has_collided_below() || self.coyote_timer <= self.tuning.coyote_time
    }

    /// Build a context over the entity's components and run `f` with it
    fn with_context<R>(
        &mut self,
        world: &mut World,
        input: &dyn InputState,
        f: impl FnOnce(&mut StateMachine, &mut ActorContext<'_>) -> R,
    ) -> SimResult<R> {
        let entity = self.entity;
        let Entity {
            transform,
            body,
            collider,
            ..
        } = world.get_mut(entity)?;
        let body = body.as_mut().ok_or(SimError::MissingComponent {
            entity,
            component: "physics body",
        })?;
        let grounded = self.grounded(body);
        let mut ctx = ActorContext {
            body,
            collider: collider.as_mut(),
            position: transform.position,
            appearance: &mut self.appearance,
            sounds: &mut self.sounds,
            tuning: &self.tuning,
            input,
            grounded,
            state_time: self.machine.state_time(),
        };
        Ok(f(&mut self.machine, &mut ctx))
    }

    /// Let the current state react to input. Runs before the physics step.
    pub fn handle_input(&mut self, world: &mut World, input: &dyn InputState) {
        let result = self.with_context(world, input, |machine, ctx| machine.handle_input(ctx));
        if let Err(err) = result {
            log::warn!("Actor input skipped: {}", err);
        }
    }

    /// Advance timers and the current state. Runs after the physics step.
    pub fn update(&mut self, world: &mut World, dt: f32, input: &dyn InputState) {
        self.health.tick(dt);

        let collided_below = match world.body(self.entity) {
            Ok(body) => body.has_collided_below(),
            Err(err) => {
                log::warn!("Actor update skipped: {}", err);
                return;
            }
        };
        if collided_below {
            self.coyote_timer = 0.0;
        } else {
            self.coyote_timer += dt;
        }

        self.update_flicker(dt);

        let result = self.with_context(world, input, |machine, ctx| machine.update(dt, ctx));
        if let Err(err) = result {
            log::warn!("Actor update skipped: {}", err);
        }
    }

    /// Hidden for the first half of each flicker cycle while invincible,
    /// visible again as soon as invincibility ends
    fn update_flicker(&mut self, dt: f32) {
        if self.health.is_invincible() {
            let period = 2.0 * self.tuning.flash_interval;
            self.flash_timer += dt;
            if self.flash_timer >= period {
                self.flash_timer -= period;
            }
            self.appearance.hidden = self.flash_timer < self.tuning.flash_interval;
        } else {
            self.flash_timer = 0.0;
            self.appearance.hidden = false;
        }
    }

    /// Apply damage and switch to `Hurt` or `Dead`. Returns whether damage
    /// was applied.
    pub fn take_damage(&mut self, world: &mut World, amount: i32) -> bool {
        if self.is_dead() {
            log::warn!("Ignoring damage to dead actor {:?}", self.entity);
            return false;
        }
        if !world.contains(self.entity) {
            log::warn!("Ignoring damage: {}", SimError::UnknownEntity(self.entity));
            return false;
        }
        if !self.health.take_damage(amount) {
            return false;
        }

        let next: Option<Box<dyn ActorState>> = if !self.health.is_alive() {
            log::debug!("Actor {:?} died", self.entity);
            Some(Box::new(states::Dead))
        } else {
            log::debug!(
                "Actor {:?} took {} damage ({}/{})",
                self.entity,
                amount,
                self.health.current(),
                self.health.max()
            );
            match self.hurt_reaction {
                HurtReaction::Stagger => Some(Box::new(states::Hurt)),
                HurtReaction::Ignore => None,
            }
        };

        if let Some(next) = next {
            let result = self.with_context(world, &NoInput, |machine, ctx| machine.transition(next, ctx));
            match result {
                Ok(Ok(())) => {}
                Ok(Err(err)) | Err(err) => log::warn!("Damage transition failed: {}", err),
            }
        }
        true
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::input::ActionInput;

    /// Owns everything an `ActorContext` borrows
    pub struct Fixture {
        pub body: PhysicsBody,
        pub collider: Option<Collider>,
        pub appearance: Appearance,
        pub sounds: Vec<&'static str>,
        pub tuning: ActorTuning,
        pub input: ActionInput,
        pub position: Vec2,
        pub grounded: bool,
        pub state_time: f32,
    }

    impl Fixture {
        pub fn new() -> Self {
            Self {
                body: PhysicsBody::default(),
                collider: Some(Collider::aabb(Vec2::splat(16.0))),
                appearance: Appearance::default(),
                sounds: Vec::new(),
                tuning: ActorTuning::default(),
                input: ActionInput::new(),
                position: Vec2::ZERO,
                grounded: true,
                state_time: 0.0,
            }
        }

        pub fn with_ctx<R>(&mut self, f: impl FnOnce(&mut ActorContext<'_>) -> R) -> R {
            let mut ctx = ActorContext {
                body: &mut self.body,
                collider: self.collider.as_mut(),
                position: self.position,
                appearance: &mut self.appearance,
                sounds: &mut self.sounds,
                tuning: &self.tuning,
                input: &self.input,
                grounded: self.grounded,
                state_time: self.state_time,
            };
            f(&mut ctx)
        }
    }
}
