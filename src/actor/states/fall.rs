use super::{Climb, Jump, clamp_horizontal, landing_state, steer, wants_climb, wants_jump};
use crate::actor::{ActorContext, ActorState, StateKind, Transition};

#[derive(Debug, Clone, Copy, Default)]
pub struct Fall;

impl ActorState for Fall {
    fn kind(&self) -> StateKind {
        StateKind::Fall
    }

    fn enter(&mut self, ctx: &mut ActorContext<'_>) {
        ctx.play_animation("fall");
    }

    fn handle_input(&mut self, ctx: &mut ActorContext<'_>) -> Transition {
        if wants_climb(ctx) {
            return Some(Box::new(Climb));
        }
        // Coyote window
        if wants_jump(ctx) {
            return Some(Box::new(Jump));
        }
        steer(ctx);
        None
    }

    fn update(&mut self, _dt: f32, ctx: &mut ActorContext<'_>) -> Transition {
        clamp_horizontal(ctx);
        if ctx.body.has_collided_below() {
            return Some(landing_state(ctx));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::test_support::Fixture;
    use crate::input::actions;

    #[test]
    fn test_landing() {
        let mut fixture = Fixture::new();
        let next = fixture.with_ctx(|ctx| Fall.update(0.016, ctx));
        assert!(next.is_none());

        fixture.body.collided.below = true;
        let next = fixture.with_ctx(|ctx| Fall.update(0.016, ctx));
        assert_eq!(next.map(|s| s.kind()), Some(StateKind::Idle));

        fixture.body.velocity.x = 60.0;
        let next = fixture.with_ctx(|ctx| Fall.update(0.016, ctx));
        assert_eq!(next.map(|s| s.kind()), Some(StateKind::Walk));
    }

    #[test]
    fn test_ladder_grab_from_air() {
        let mut fixture = Fixture::new();
        fixture.grounded = false;
        fixture.body.collided.ladder = true;
        fixture.input.press(actions::MOVE_DOWN);
        let next = fixture.with_ctx(|ctx| Fall.handle_input(ctx));
        assert_eq!(next.map(|s| s.kind()), Some(StateKind::Climb));
    }

    #[test]
    fn test_no_jump_outside_coyote_window() {
        let mut fixture = Fixture::new();
        fixture.grounded = false;
        fixture.input.press(actions::JUMP);
        let next = fixture.with_ctx(|ctx| Fall.handle_input(ctx));
        assert!(next.is_none());
    }
}
