use glam::Vec2;

use super::{Fall, Idle, Jump};
use crate::actor::{ActorContext, ActorState, StateKind, Transition};
use crate::input::actions;

/// On a ladder: gravity off, moves at a fixed speed while a direction is held
#[derive(Debug, Clone, Copy, Default)]
pub struct Climb;

impl ActorState for Climb {
    fn kind(&self) -> StateKind {
        StateKind::Climb
    }

    fn enter(&mut self, ctx: &mut ActorContext<'_>) {
        ctx.play_animation("climb");
        ctx.body.use_gravity = false;
        ctx.body.velocity = Vec2::ZERO;
    }

    fn exit(&mut self, ctx: &mut ActorContext<'_>) {
        ctx.body.use_gravity = true;
    }

    fn handle_input(&mut self, ctx: &mut ActorContext<'_>) -> Transition {
        let up = ctx.is_down(actions::MOVE_UP);
        let down = ctx.is_down(actions::MOVE_DOWN);
        let left = ctx.is_down(actions::MOVE_LEFT);
        let right = ctx.is_down(actions::MOVE_RIGHT);
        let speed = ctx.tuning.climb_speed;

        let axis = |neg: bool, pos: bool| {
            if neg {
                -speed
            } else if pos {
                speed
            } else {
                0.0
            }
        };
        ctx.body.velocity = Vec2::new(axis(left, right), axis(up, down));
        ctx.appearance.animation_playing = up || down || left || right;

        if ctx.is_pressed(actions::JUMP) {
            return Some(Box::new(Jump));
        }
        None
    }

    fn update(&mut self, _dt: f32, ctx: &mut ActorContext<'_>) -> Transition {
        if ctx.body.has_collided_below() {
            return Some(Box::new(Idle));
        }
        if !ctx.body.has_collided_ladder() {
            return Some(Box::new(Fall));
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
    fn test_gravity_toggled_by_enter_and_exit() {
        let mut fixture = Fixture::new();
        fixture.body.velocity = Vec2::new(40.0, 200.0);
        fixture.body.collided.ladder = true;
        let mut machine = StateMachine::new(Box::new(Climb));
        fixture.with_ctx(|ctx| machine.start(ctx));
        assert!(!fixture.body.use_gravity);
        assert_eq!(fixture.body.velocity, Vec2::ZERO);

        // Leaving the ladder while airborne
        fixture.body.collided.ladder = false;
        fixture.with_ctx(|ctx| machine.update(0.016, ctx));
        assert_eq!(machine.kind(), StateKind::Fall);
        assert!(fixture.body.use_gravity);
    }

    #[test]
    fn test_climb_movement_and_animation_pause() {
        let mut fixture = Fixture::new();
        fixture.input.press(actions::MOVE_UP);
        fixture.with_ctx(|ctx| Climb.handle_input(ctx));
        assert_eq!(fixture.body.velocity, Vec2::new(0.0, -fixture.tuning.climb_speed));
        assert!(fixture.appearance.animation_playing);

        fixture.input.release_all();
        fixture.with_ctx(|ctx| Climb.handle_input(ctx));
        assert_eq!(fixture.body.velocity, Vec2::ZERO);
        assert!(!fixture.appearance.animation_playing);
    }

    #[test]
    fn test_jump_off_ladder_restores_gravity() {
        let mut fixture = Fixture::new();
        fixture.body.collided.ladder = true;
        let mut machine = StateMachine::new(Box::new(Climb));
        fixture.with_ctx(|ctx| machine.start(ctx));

        fixture.input.press(actions::JUMP);
        fixture.with_ctx(|ctx| machine.handle_input(ctx));
        assert_eq!(machine.kind(), StateKind::Jump);
        assert!(fixture.body.use_gravity);
        assert_eq!(fixture.body.velocity.y, -fixture.tuning.jump_velocity);
    }
}
