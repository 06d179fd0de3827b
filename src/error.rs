//! Error types for the simulation core
//!
//! Nothing here is fatal to a frame. The frame step catches these, logs
//! them, and skips the affected entity until the next frame.

use thiserror::Error;

use crate::actor::StateKind;
use crate::sim::EntityId;

/// Recoverable failures raised inside the simulation core
#[derive(Debug, Error)]
pub enum SimError {
    /// Handle is dangling (entity removed) or was never issued
    #[error("entity {0:?} does not exist")]
    UnknownEntity(EntityId),

    /// A sibling component the operation needs is absent
    #[error("entity {entity:?} has no {component} component")]
    MissingComponent {
        entity: EntityId,
        component: &'static str,
    },

    /// Collider bounds have zero or negative area
    #[error("entity {0:?} has degenerate collider bounds")]
    DegenerateCollider(EntityId),

    /// A state handler returned a new instance of its own state
    #[error("state {0:?} tried to transition into itself")]
    SelfTransition(StateKind),

    /// Transition requested while the actor is in its terminal state
    #[error("actor is in a terminal state")]
    TerminalState,

    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SimResult<T> = Result<T, SimError>;
