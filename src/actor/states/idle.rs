use super::{Climb, Fall, Jump, Walk, holding_direction, wants_climb_up, wants_jump};
use crate::actor::{ActorContext, ActorState, StateKind, Transition};

/// Standing still, bleeding off horizontal speed
#[derive(Debug, Clone, Copy, Default)]
pub struct Idle;

impl ActorState for Idle {
    fn kind(&self) -> StateKind {
        StateKind::Idle
    }

    fn enter(&mut self, ctx: &mut ActorContext<'_>) {
        ctx.play_animation("idle");
    }

    fn handle_input(&mut self, ctx: &mut ActorContext<'_>) -> Transition {
        if wants_climb_up(ctx) {
            return Some(Box::new(Climb));
        }
        if wants_jump(ctx) {
            return Some(Box::new(Jump));
        }
        if holding_direction(ctx) {
            return Some(Box::new(Walk));
        }
        None
    }

    fn update(&mut self, _dt: f32, ctx: &mut ActorContext<'_>) -> Transition {
        ctx.body.velocity.x *= ctx.tuning.friction_factor;
        if !ctx.grounded {
            return Some(Box::new(Fall));
        }
        None
    }
}
