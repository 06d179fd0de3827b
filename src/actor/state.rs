//! The replaceable-state slot shared by every actor
//!
//! Exactly one state is active. A handler asks for a change by returning a
//! new state value; the machine then runs `exit` on the old state, swaps the
//! new one in and runs its `enter`, all within the same call.

use std::fmt;

use super::ActorContext;
use crate::error::{SimError, SimResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKind {
    Idle,
    Walk,
    Jump,
    Fall,
    Climb,
    Hurt,
    Dead,
    Patrol,
    Fly,
    HopWait,
    HopAir,
}

impl StateKind {
    /// Terminal states accept no further transitions
    pub fn is_terminal(self) -> bool {
        self == StateKind::Dead
    }
}

/// Result of a handler: `None` keeps the current state
pub type Transition = Option<Box<dyn ActorState>>;

/// One behavior of an actor. Side effects of entering or leaving a state
/// (animation, impulses, gravity toggles, sounds) belong in `enter`/`exit`.
pub trait ActorState: fmt::Debug {
    fn kind(&self) -> StateKind;

    fn enter(&mut self, _ctx: &mut ActorContext<'_>) {}

    fn exit(&mut self, _ctx: &mut ActorContext<'_>) {}

    fn handle_input(&mut self, _ctx: &mut ActorContext<'_>) -> Transition {
        None
    }

    fn update(&mut self, _dt: f32, _ctx: &mut ActorContext<'_>) -> Transition {
        None
    }
}

#[derive(Debug)]
pub struct StateMachine {
    current: Box<dyn ActorState>,
    /// Seconds since `current` was entered
    state_time: f32,
    started: bool,
}

impl StateMachine {
    /// Hold `initial` without entering it; call `start` once a context exists
    pub fn new(initial: Box<dyn ActorState>) -> Self {
        Self {
            current: initial,
            state_time: 0.0,
            started: false,
        }
    }

    /// Enter the initial state. Later calls do nothing.
    pub fn start(&mut self, ctx: &mut ActorContext<'_>) {
        if self.started {
            return;
        }
        self.started = true;
        ctx.state_time = 0.0;
        log::debug!("Starting in state {:?}", self.current.kind());
        self.current.enter(ctx);
    }

    pub fn kind(&self) -> StateKind {
        self.current.kind()
    }

    pub fn state_time(&self) -> f32 {
        self.state_time
    }

    /// Replace the current state: exit old, install new, enter new.
    /// Fails only when the current state is terminal.
    pub fn transition(
        &mut self,
        next: Box<dyn ActorState>,
        ctx: &mut ActorContext<'_>,
    ) -> SimResult<()> {
        let from = self.current.kind();
        if from.is_terminal() {
            return Err(SimError::TerminalState);
        }
        self.current.exit(ctx);
        self.current = next;
        self.state_time = 0.0;
        ctx.state_time = 0.0;
        log::debug!("State {:?} -> {:?}", from, self.current.kind());
        self.current.enter(ctx);
        Ok(())
    }

    pub fn handle_input(&mut self, ctx: &mut ActorContext<'_>) {
        if let Some(next) = self.current.handle_input(ctx) {
            self.apply(next, ctx);
        }
    }

    pub fn update(&mut self, dt: f32, ctx: &mut ActorContext<'_>) {
        self.state_time += dt;
        ctx.state_time = self.state_time;
        if let Some(next) = self.current.update(dt, ctx) {
            self.apply(next, ctx);
        }
    }

    /// Apply a handler's result, rejecting a request to re-enter the same state
    fn apply(&mut self, next: Box<dyn ActorState>, ctx: &mut ActorContext<'_>) {
        let result = if next.kind() == self.current.kind() {
            Err(SimError::SelfTransition(next.kind()))
        } else {
            self.transition(next, ctx)
        };
        if let Err(err) = result {
            log::warn!("Rejected transition: {}", err);
        }
    }
}
