//! Behavior states for non-player actors
//!
//! AI actors run through the same `StateMachine` as the player, fed with
//! `NoInput`. Each behavior keeps its own patrol bounds.

use glam::Vec2;

use super::{ActorContext, ActorState, StateKind, Transition};

/// Reverse `dir` (+1/-1) when past a bound or blocked on that side
fn bounce(dir: f32, pos: f32, low: f32, high: f32, blocked_low: bool, blocked_high: bool) -> f32 {
    if dir < 0.0 && (pos <= low || blocked_low) {
        1.0
    } else if dir > 0.0 && (pos >= high || blocked_high) {
        -1.0
    } else {
        dir
    }
}

/// Walk back and forth between two x coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Patrol {
    pub left: f32,
    pub right: f32,
    pub speed: f32,
    dir: f32,
}

impl Patrol {
    pub fn new(left: f32, right: f32, speed: f32) -> Self {
        Self {
            left: left.min(right),
            right: left.max(right),
            speed: speed.abs(),
            dir: 1.0,
        }
    }
}

impl ActorState for Patrol {
    fn kind(&self) -> StateKind {
        StateKind::Patrol
    }

    fn enter(&mut self, ctx: &mut ActorContext<'_>) {
        ctx.play_animation("walk");
        self.dir = ctx.facing();
    }

    fn update(&mut self, _dt: f32, ctx: &mut ActorContext<'_>) -> Transition {
        let flags = ctx.body.collided;
        self.dir = bounce(
            self.dir,
            ctx.position.x,
            self.left,
            self.right,
            flags.left,
            flags.right,
        );
        ctx.body.velocity.x = self.speed * self.dir;
        ctx.appearance.flipped = self.dir < 0.0;
        None
    }
}

/// Fly up and down between two y coordinates with gravity off
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fly {
    pub top: f32,
    pub bottom: f32,
    pub speed: f32,
    dir: f32,
}

impl Fly {
    pub fn new(top: f32, bottom: f32, speed: f32) -> Self {
        Self {
            top: top.min(bottom),
            bottom: top.max(bottom),
            speed: speed.abs(),
            dir: 1.0,
        }
    }
}

impl ActorState for Fly {
    fn kind(&self) -> StateKind {
        StateKind::Fly
    }

    fn enter(&mut self, ctx: &mut ActorContext<'_>) {
        ctx.play_animation("fly");
        ctx.body.use_gravity = false;
        ctx.body.velocity = Vec2::ZERO;
    }

    fn exit(&mut self, ctx: &mut ActorContext<'_>) {
        ctx.body.use_gravity = true;
    }

    fn update(&mut self, _dt: f32, ctx: &mut ActorContext<'_>) -> Transition {
        let flags = ctx.body.collided;
        self.dir = bounce(
            self.dir,
            ctx.position.y,
            self.top,
            self.bottom,
            flags.above,
            flags.below,
        );
        ctx.body.velocity = Vec2::new(0.0, self.speed * self.dir);
        None
    }
}

/// Shared parameters of the hop cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HopConfig {
    pub left: f32,
    pub right: f32,
    pub jump_velocity: f32,
    pub move_speed: f32,
    /// Seconds spent on the ground between hops
    pub interval: f32,
}

/// Grounded pause before the next hop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HopWait {
    pub config: HopConfig,
    dir: f32,
}

impl HopWait {
    pub fn new(config: HopConfig) -> Self {
        Self { config, dir: 1.0 }
    }
}

impl ActorState for HopWait {
    fn kind(&self) -> StateKind {
        StateKind::HopWait
    }

    fn enter(&mut self, ctx: &mut ActorContext<'_>) {
        ctx.play_animation("idle");
        ctx.body.velocity.x = 0.0;
    }

    fn update(&mut self, _dt: f32, ctx: &mut ActorContext<'_>) -> Transition {
        ctx.body.velocity.x = 0.0;
        if !ctx.body.has_collided_below() || ctx.state_time < self.config.interval {
            return None;
        }
        let flags = ctx.body.collided;
        let dir = bounce(
            self.dir,
            ctx.position.x,
            self.config.left,
            self.config.right,
            flags.left,
            flags.right,
        );
        Some(Box::new(HopAir {
            config: self.config,
            dir,
        }))
    }
}

/// Airborne part of the hop cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HopAir {
    pub config: HopConfig,
    dir: f32,
}

impl ActorState for HopAir {
    fn kind(&self) -> StateKind {
        StateKind::HopAir
    }

    fn enter(&mut self, ctx: &mut ActorContext<'_>) {
        ctx.play_animation("jump");
        ctx.body.velocity = Vec2::new(
            self.config.move_speed * self.dir,
            -self.config.jump_velocity,
        );
        ctx.appearance.flipped = self.dir < 0.0;
    }

    fn update(&mut self, _dt: f32, ctx: &mut ActorContext<'_>) -> Transition {
        // Keep drifting even after brushing a wall
        ctx.body.velocity.x = self.config.move_speed * self.dir;
        if ctx.body.has_collided_below() && ctx.body.velocity.y >= 0.0 {
            return Some(Box::new(HopWait {
                config: self.config,
                dir: self.dir,
            }));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::StateMachine;
    use crate::actor::test_support::Fixture;

    #[test]
    fn test_bounce() {
        assert_eq!(bounce(1.0, 50.0, 0.0, 100.0, false, false), 1.0);
        assert_eq!(bounce(1.0, 100.0, 0.0, 100.0, false, false), -1.0);
        assert_eq!(bounce(-1.0, 0.0, 0.0, 100.0, false, false), 1.0);
        assert_eq!(bounce(1.0, 50.0, 0.0, 100.0, false, true), -1.0);
        // Blocked on the side it is moving away from
        assert_eq!(bounce(1.0, 50.0, 0.0, 100.0, true, false), 1.0);
    }

    #[test]
    fn test_patrol_turns_at_bounds() {
        let mut fixture = Fixture::new();
        let mut machine = StateMachine::new(Box::new(Patrol::new(0.0, 100.0, 40.0)));
        fixture.with_ctx(|ctx| machine.start(ctx));

        fixture.position.x = 50.0;
        fixture.with_ctx(|ctx| machine.update(0.016, ctx));
        assert_eq!(fixture.body.velocity.x, 40.0);

        fixture.position.x = 101.0;
        fixture.with_ctx(|ctx| machine.update(0.016, ctx));
        assert_eq!(fixture.body.velocity.x, -40.0);
        assert!(fixture.appearance.flipped);

        fixture.position.x = 60.0;
        fixture.body.collided.left = true;
        fixture.with_ctx(|ctx| machine.update(0.016, ctx));
        assert_eq!(fixture.body.velocity.x, 40.0);
        assert_eq!(machine.kind(), StateKind::Patrol);
    }

    #[test]
    fn test_fly_toggles_gravity() {
        let mut fixture = Fixture::new();
        let mut machine = StateMachine::new(Box::new(Fly::new(0.0, 64.0, 30.0)));
        fixture.with_ctx(|ctx| machine.start(ctx));
        assert!(!fixture.body.use_gravity);

        fixture.position.y = 70.0;
        fixture.with_ctx(|ctx| machine.update(0.016, ctx));
        assert_eq!(fixture.body.velocity, Vec2::new(0.0, -30.0));

        fixture.with_ctx(|ctx| machine.transition(Box::new(Patrol::new(0.0, 1.0, 1.0)), ctx).unwrap());
        assert!(fixture.body.use_gravity);
    }

    #[test]
    fn test_hop_cycle() {
        let config = HopConfig {
            left: 0.0,
            right: 200.0,
            jump_velocity: 250.0,
            move_speed: 60.0,
            interval: 0.5,
        };
        let mut fixture = Fixture::new();
        fixture.position.x = 100.0;
        fixture.body.collided.below = true;
        let mut machine = StateMachine::new(Box::new(HopWait::new(config)));
        fixture.with_ctx(|ctx| machine.start(ctx));

        fixture.with_ctx(|ctx| machine.update(0.25, ctx));
        assert_eq!(machine.kind(), StateKind::HopWait);

        fixture.with_ctx(|ctx| machine.update(0.25, ctx));
        assert_eq!(machine.kind(), StateKind::HopAir);
        assert_eq!(fixture.body.velocity, Vec2::new(60.0, -250.0));

        // Still rising with the ground flag from the take-off frame
        fixture.with_ctx(|ctx| machine.update(0.016, ctx));
        assert_eq!(machine.kind(), StateKind::HopAir);

        fixture.body.velocity.y = 0.0;
        fixture.with_ctx(|ctx| machine.update(0.016, ctx));
        assert_eq!(machine.kind(), StateKind::HopWait);
        assert_eq!(fixture.body.velocity.x, 0.0);
    }
}
