use glam::Vec2;

use super::{Fall, landing_state};
use crate::actor::{ActorContext, ActorState, StateKind, Transition};

/// Knocked back and unresponsive to input for a short stun
#[derive(Debug, Clone, Copy, Default)]
pub struct Hurt;

impl ActorState for Hurt {
    fn kind(&self) -> StateKind {
        StateKind::Hurt
    }

    fn enter(&mut self, ctx: &mut ActorContext<'_>) {
        ctx.play_animation("hurt");
        // Knockback pushes against the facing direction
        let knockback = ctx.tuning.knockback;
        ctx.body.velocity = Vec2::new(knockback.x * ctx.facing(), knockback.y);
        ctx.play_sound("hurt");
    }

    fn update(&mut self, _dt: f32, ctx: &mut ActorContext<'_>) -> Transition {
        if ctx.body.has_collided_below() {
            return Some(landing_state(ctx));
        }
        if ctx.state_time > ctx.tuning.stunned_duration {
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
    fn test_knockback_mirrors_facing() {
        let mut fixture = Fixture::new();
        fixture.appearance.flipped = true;
        fixture.with_ctx(|ctx| Hurt.enter(ctx));
        let knockback = fixture.tuning.knockback;
        assert_eq!(fixture.body.velocity, Vec2::new(-knockback.x, knockback.y));
        assert_eq!(fixture.sounds, vec!["hurt"]);
        assert_eq!(fixture.appearance.animation, "hurt");
    }

    #[test]
    fn test_stun_expires_into_fall() {
        let mut fixture = Fixture::new();
        fixture.grounded = false;
        let mut machine = StateMachine::new(Box::new(Hurt));
        fixture.with_ctx(|ctx| machine.start(ctx));

        fixture.with_ctx(|ctx| machine.update(0.1, ctx));
        assert_eq!(machine.kind(), StateKind::Hurt);

        let stun = fixture.tuning.stunned_duration;
        fixture.with_ctx(|ctx| machine.update(stun, ctx));
        assert_eq!(machine.kind(), StateKind::Fall);
        assert_eq!(machine.state_time(), 0.0);
    }
}
