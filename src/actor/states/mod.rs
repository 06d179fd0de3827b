//! Player states
//!
//! - Ground: `Idle`, `Walk`
//! - Air: `Jump`, `Fall`
//! - `Climb` while overlapping a ladder
//! - `Hurt` after surviving damage, `Dead` is terminal
//!
//! States are unit structs; anything time-based reads `ctx.state_time`.

mod climb;
mod dead;
mod fall;
mod hurt;
mod idle;
mod jump;
mod walk;

pub use climb::Climb;
pub use dead::Dead;
pub use fall::Fall;
pub use hurt::Hurt;
pub use idle::Idle;
pub use jump::Jump;
pub use walk::Walk;

use glam::Vec2;

use super::ActorContext;
use crate::input::actions;

/// Push toward the held direction, cancelling velocity the other way first.
/// Returns false when neither direction is held.
fn steer(ctx: &mut ActorContext<'_>) -> bool {
    let force = ctx.tuning.move_force;
    if ctx.is_down(actions::MOVE_LEFT) {
        if ctx.body.velocity.x > 0.0 {
            ctx.body.velocity.x = 0.0;
        }
        ctx.body.add_force(Vec2::new(-force, 0.0));
        ctx.appearance.flipped = true;
        true
    } else if ctx.is_down(actions::MOVE_RIGHT) {
        if ctx.body.velocity.x < 0.0 {
            ctx.body.velocity.x = 0.0;
        }
        ctx.body.add_force(Vec2::new(force, 0.0));
        ctx.appearance.flipped = false;
        true
    } else {
        false
    }
}

fn clamp_horizontal(ctx: &mut ActorContext<'_>) {
    let max = ctx.tuning.max_speed.abs();
    ctx.body.velocity.x = ctx.body.velocity.x.clamp(-max, max);
}

fn holding_direction(ctx: &ActorContext<'_>) -> bool {
    ctx.is_down(actions::MOVE_LEFT) || ctx.is_down(actions::MOVE_RIGHT)
}

/// On a ladder with up held (from the ground)
fn wants_climb_up(ctx: &ActorContext<'_>) -> bool {
    ctx.body.has_collided_ladder() && ctx.is_down(actions::MOVE_UP)
}

/// On a ladder with up or down held (from the air)
fn wants_climb(ctx: &ActorContext<'_>) -> bool {
    ctx.body.has_collided_ladder()
        && (ctx.is_down(actions::MOVE_UP) || ctx.is_down(actions::MOVE_DOWN))
}

fn wants_jump(ctx: &ActorContext<'_>) -> bool {
    ctx.is_pressed(actions::JUMP) && ctx.grounded
}

/// Ground state to land in, by horizontal speed
fn landing_state(ctx: &ActorContext<'_>) -> Box<dyn super::ActorState> {
    if ctx.body.velocity.x.abs() < 1.0 {
        Box::new(Idle)
    } else {
        Box::new(Walk)
    }
}
