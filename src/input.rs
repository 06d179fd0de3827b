//! Named-action input queries
//!
//! Device polling happens outside the core; actors only ask whether an
//! action is held or was pressed this frame.

use std::collections::HashSet;

/// Action names the player states react to
pub mod actions {
    pub const MOVE_LEFT: &str = "move_left";
    pub const MOVE_RIGHT: &str = "move_right";
    pub const MOVE_UP: &str = "move_up";
    pub const MOVE_DOWN: &str = "move_down";
    pub const JUMP: &str = "jump";
}

pub trait InputState {
    /// Action is currently held
    fn is_action_down(&self, action: &str) -> bool;
    /// Action went down this frame
    fn is_action_pressed(&self, action: &str) -> bool;
}

/// Frame-based action tracker fed by the platform layer or a script
#[derive(Debug, Clone, Default)]
pub struct ActionInput {
    down: HashSet<String>,
    pressed: HashSet<String>,
}

impl ActionInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an action held. Reports a press only on the first frame.
    pub fn press(&mut self, action: &str) {
        if self.down.insert(action.to_owned()) {
            self.pressed.insert(action.to_owned());
        }
    }

    pub fn release(&mut self, action: &str) {
        self.down.remove(action);
        self.pressed.remove(action);
    }

    pub fn release_all(&mut self) {
        self.down.clear();
        self.pressed.clear();
    }

    /// Call once per frame after the actors have read input
    pub fn end_frame(&mut self) {
        self.pressed.clear();
    }
}

impl InputState for ActionInput {
    fn is_action_down(&self, action: &str) -> bool {
        self.down.contains(action)
    }

    fn is_action_pressed(&self, action: &str) -> bool {
        self.pressed.contains(action)
    }
}

/// Input source that never reports an action, used for AI actors
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl InputState for NoInput {
    fn is_action_down(&self, _action: &str) -> bool {
        false
    }

    fn is_action_pressed(&self, _action: &str) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_input_reports_nothing() {
        assert!(!NoInput.is_action_down(actions::JUMP));
        assert!(!NoInput.is_action_pressed(actions::MOVE_LEFT));
    }

    #[test]
    fn test_press_is_reported_once() {
        let mut input = ActionInput::new();
        input.press(actions::JUMP);
        assert!(input.is_action_pressed(actions::JUMP));
        assert!(input.is_action_down(actions::JUMP));

        input.end_frame();
        input.press(actions::JUMP);
        assert!(!input.is_action_pressed(actions::JUMP));
        assert!(input.is_action_down(actions::JUMP));

        input.release(actions::JUMP);
        assert!(!input.is_action_down(actions::JUMP));
        input.press(actions::JUMP);
        assert!(input.is_action_pressed(actions::JUMP));
    }
}
