use super::{Climb, Fall, clamp_horizontal, steer, wants_climb};
use crate::actor::{ActorContext, ActorState, StateKind, Transition};

/// Rising after a jump impulse
#[derive(Debug, Clone, Copy, Default)]
pub struct Jump;

impl ActorState for Jump {
    fn kind(&self) -> StateKind {
        StateKind::Jump
    }

    fn enter(&mut self, ctx: &mut ActorContext<'_>) {
        ctx.play_animation("jump");
        ctx.body.velocity.y = -ctx.tuning.jump_velocity;
        ctx.play_sound("jump");
        log::trace!("Jump impulse vy={}", ctx.body.velocity.y);
    }

    fn handle_input(&mut self, ctx: &mut ActorContext<'_>) -> Transition {
        if wants_climb(ctx) {
            return Some(Box::new(Climb));
        }
        steer(ctx);
        None
    }

    fn update(&mut self, _dt: f32, ctx: &mut ActorContext<'_>) -> Transition {
        clamp_horizontal(ctx);
        if ctx.body.velocity.y >= 0.0 {
            return Some(Box::new(Fall));
        }
        None
    }
}
