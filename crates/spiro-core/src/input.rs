//! Per-frame input state with edge detection.
//!
//! The host samples the pointer, both buttons and every bound [`Action`] once per
//! frame into an [`InputSnapshot`] and pushes it with [`InputState::advance`]. The
//! previous snapshot is kept so press and release edges can be queried without
//! hidden state in the systems that read them.

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

/// Keyboard-driven editor actions. Key bindings live in the host layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Modifier that enters arm placement while held.
    NewArm,
    ToggleTrail,
    DeleteArm,
    /// Clears every arm in edit mode, returns to edit mode while animating.
    Reset,
    /// Drags the selected arm's head while held.
    HoldHead,
    /// Drags the selected arm's base while held.
    HoldBase,
    PlayPause,
    Quit,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::NewArm,
        Action::ToggleTrail,
        Action::DeleteArm,
        Action::Reset,
        Action::HoldHead,
        Action::HoldBase,
        Action::PlayPause,
        Action::Quit,
    ];

    const fn index(self) -> usize {
        self as usize
    }
}

/// Raw input sampled for one frame. Pointer is in canvas space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    pub pointer: Vec2,
    pub primary: bool,
    pub secondary: bool,
    actions: [bool; Action::ALL.len()],
}

impl InputSnapshot {
    pub fn at(pointer: Vec2) -> Self {
        Self {
            pointer,
            ..Self::default()
        }
    }

    pub fn with_primary(mut self, held: bool) -> Self {
        self.primary = held;
        self
    }

    pub fn with_secondary(mut self, held: bool) -> Self {
        self.secondary = held;
        self
    }

    pub fn with_action(mut self, action: Action, held: bool) -> Self {
        self.set_action(action, held);
        self
    }

    pub fn set_action(&mut self, action: Action, held: bool) {
        self.actions[action.index()] = held;
    }

    pub fn action(&self, action: Action) -> bool {
        self.actions[action.index()]
    }
}

/// Current and previous snapshots.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    current: InputSnapshot,
    previous: InputSnapshot,
}

impl InputState {
    /// Shifts the current snapshot into `previous` and stores `next`.
    pub fn advance(&mut self, next: InputSnapshot) {
        self.previous = self.current;
        self.current = next;
    }

    pub fn current(&self) -> &InputSnapshot {
        &self.current
    }

    pub fn pointer(&self) -> Vec2 {
        self.current.pointer
    }

    pub fn primary_held(&self) -> bool {
        self.current.primary
    }

    pub fn primary_pressed(&self) -> bool {
        self.current.primary && !self.previous.primary
    }

    pub fn primary_released(&self) -> bool {
        !self.current.primary && self.previous.primary
    }

    pub fn secondary_pressed(&self) -> bool {
        self.current.secondary && !self.previous.secondary
    }

    pub fn held(&self, action: Action) -> bool {
        self.current.action(action)
    }

    pub fn pressed(&self, action: Action) -> bool {
        self.current.action(action) && !self.previous.action(action)
    }

    pub fn released(&self, action: Action) -> bool {
        !self.current.action(action) && self.previous.action(action)
    }
}
