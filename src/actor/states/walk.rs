use super::{Climb, Fall, Idle, Jump, clamp_horizontal, steer, wants_climb_up, wants_jump};
use crate::actor::{ActorContext, ActorState, StateKind, Transition};

#[derive(Debug, Clone, Copy, Default)]
pub struct Walk;

impl ActorState for Walk {
    fn kind(&self) -> StateKind {
        StateKind::Walk
    }

    fn enter(&mut self, ctx: &mut ActorContext<'_>) {
        ctx.play_animation("walk");
    }

    fn handle_input(&mut self, ctx: &mut ActorContext<'_>) -> Transition {
        if wants_climb_up(ctx) {
            return Some(Box::new(Climb));
        }
        if wants_jump(ctx) {
            return Some(Box::new(Jump));
        }
        if !steer(ctx) {
            return Some(Box::new(Idle));
        }
        None
    }

    fn update(&mut self, _dt: f32, ctx: &mut ActorContext<'_>) -> Transition {
        clamp_horizontal(ctx);
        if !ctx.grounded {
            return Some(Box::new(Fall));
        }
        None
    }
}
