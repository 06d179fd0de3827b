use crate::actor::{ActorContext, ActorState, StateKind};

/// Terminal: a final bounce, then no more collisions or transitions
#[derive(Debug, Clone, Copy, Default)]
pub struct Dead;

impl ActorState for Dead {
    fn kind(&self) -> StateKind {
        StateKind::Dead
    }

    fn enter(&mut self, ctx: &mut ActorContext<'_>) {
        ctx.play_animation("dead");
        ctx.body.velocity.x = 0.0;
        ctx.body.velocity.y = -ctx.tuning.dead_bounce;
        if let Some(collider) = ctx.collider.as_deref_mut() {
            collider.active = false;
        }
        ctx.play_sound("dead");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::test_support::Fixture;

    #[test]
    fn test_enter_deactivates_collider() {
        let mut fixture = Fixture::new();
        fixture.body.velocity.x = 80.0;
        fixture.with_ctx(|ctx| Dead.enter(ctx));
        assert_eq!(fixture.body.velocity.x, 0.0);
        assert_eq!(fixture.body.velocity.y, -fixture.tuning.dead_bounce);
        assert!(!fixture.collider.as_ref().is_some_and(|c| c.active));
        assert_eq!(fixture.sounds, vec!["dead"]);
    }
}
