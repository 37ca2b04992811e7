//! Input sampling systems.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::bevy::resources::{CursorPosition, DisplayRes, InputRes, KeyBindings};
use crate::canvas::Display;
use crate::input::{Action, InputSnapshot};

/// System to track the pointer and drawable size of the primary window.
///
/// Window cursor coordinates already use the canvas convention (top-left
/// origin, y down), so no camera conversion is needed.
pub fn track_cursor_position(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut cursor: ResMut<CursorPosition>,
    mut display: ResMut<DisplayRes>,
) {
    let Ok(window) = windows.single() else {
        return;
    };

    cursor.position = window.cursor_position();

    let size = Display::new(window.width(), window.height());
    if display.display != size {
        tracing::debug!("[input] display resized to {}x{}", size.width, size.height);
        display.display = size;
    }
}

/// System to sample buttons and bound keys into this frame's input snapshot.
pub fn capture_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    bindings: Res<KeyBindings>,
    cursor: Res<CursorPosition>,
    mut input: ResMut<InputRes>,
) {
    let pointer = cursor.position.unwrap_or_else(|| input.state.pointer());
    let mut snapshot = InputSnapshot::at(pointer)
        .with_primary(mouse_button.pressed(MouseButton::Left))
        .with_secondary(mouse_button.pressed(MouseButton::Right));
    for action in Action::ALL {
        snapshot.set_action(action, bindings.held(&keyboard, action));
    }
    input.state.advance(snapshot);
}
