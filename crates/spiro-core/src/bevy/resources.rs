//! ECS resources wrapping the spirograph session.

use bevy::prelude::*;

use crate::canvas::{Display, DrawList};
use crate::config::SpiroConfig;
use crate::input::{Action, InputState};
use crate::session::Spirograph;

/// The running session: arm tree, editor and animation driver.
#[derive(Resource, Debug)]
pub struct SpirographRes {
    pub session: Spirograph,
}

impl SpirographRes {
    pub fn new(config: SpiroConfig, display: Display) -> Self {
        Self {
            session: Spirograph::new(config, display),
        }
    }
}

/// Input sampled for the current and previous frame.
#[derive(Resource, Debug, Default)]
pub struct InputRes {
    pub state: InputState,
}

/// Pointer position in canvas space (top-left origin, y down).
///
/// `None` while the pointer is outside the window; the last known position is
/// kept for the session in that case.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct CursorPosition {
    pub position: Option<Vec2>,
}

/// Current drawable size.
#[derive(Resource, Debug, Clone, Copy)]
pub struct DisplayRes {
    pub display: Display,
}

/// Draw calls recorded by the session, replayed by the renderer.
#[derive(Resource, Debug)]
pub struct DrawListRes {
    pub list: DrawList,
}

impl DrawListRes {
    pub fn new(trail_capacity: usize) -> Self {
        Self {
            list: DrawList::new(trail_capacity),
        }
    }
}

/// Keyboard bindings for editor actions.
#[derive(Resource, Debug, Clone)]
pub struct KeyBindings {
    pub bindings: Vec<(KeyCode, Action)>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            bindings: vec![
                (KeyCode::ControlLeft, Action::NewArm),
                (KeyCode::KeyQ, Action::ToggleTrail),
                (KeyCode::Backspace, Action::DeleteArm),
                (KeyCode::KeyR, Action::Reset),
                (KeyCode::KeyE, Action::HoldHead),
                (KeyCode::KeyW, Action::HoldBase),
                (KeyCode::Space, Action::PlayPause),
                (KeyCode::Escape, Action::Quit),
            ],
        }
    }
}

impl KeyBindings {
    /// Whether any key bound to `action` is held.
    pub fn held(&self, keyboard: &ButtonInput<KeyCode>, action: Action) -> bool {
        self.bindings
            .iter()
            .any(|&(key, bound)| bound == action && keyboard.pressed(key))
    }

    /// Rebinds `action` to `key`, replacing its previous keys.
    pub fn rebind(&mut self, action: Action, key: KeyCode) {
        self.bindings.retain(|&(_, bound)| bound != action);
        self.bindings.push((key, action));
    }
}
