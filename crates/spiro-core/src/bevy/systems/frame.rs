//! Per-frame session update and its bookkeeping systems.

use std::time::Duration;

use bevy::prelude::*;

use crate::bevy::events::EditorMessage;
use crate::bevy::plugin::ViewMode;
use crate::bevy::resources::{DisplayRes, DrawListRes, InputRes, SpirographRes};
use crate::editor::EditorEvent;

/// System to remove the cap on virtual time steps, so a stalled frame rotates
/// the arms by the whole elapsed time.
pub fn unclamp_frame_time(mut time: ResMut<Time<Virtual>>) {
    time.set_max_delta(Duration::MAX);
}

/// System to run one session frame with the elapsed virtual time.
///
/// Every event the session reports is re-emitted as an [`EditorMessage`].
pub fn step_frame(
    time: Res<Time>,
    input: Res<InputRes>,
    display: Res<DisplayRes>,
    mut spirograph: ResMut<SpirographRes>,
    mut draw_list: ResMut<DrawListRes>,
    mut messages: MessageWriter<EditorMessage>,
) {
    let session = &mut spirograph.session;
    session.resize(display.display);

    draw_list.list.begin_frame();
    match session.frame(&input.state, time.delta_secs_f64(), &mut draw_list.list) {
        Ok(events) => {
            for event in events {
                messages.write(EditorMessage(event));
            }
        }
        Err(err) => tracing::error!("[frame] edit rejected by the arm tree: {err}"),
    }
}

/// System to mirror the session's animate/edit mode into [`ViewMode`].
pub fn sync_view_mode(
    spirograph: Res<SpirographRes>,
    state: Res<State<ViewMode>>,
    mut next_state: ResMut<NextState<ViewMode>>,
) {
    let mode = if spirograph.session.shows_trails() {
        ViewMode::Animate
    } else {
        ViewMode::Edit
    };
    if *state.get() != mode {
        next_state.set(mode);
    }
}

/// System to log editor activity.
pub fn log_editor_messages(mut messages: MessageReader<EditorMessage>) {
    for EditorMessage(event) in messages.read() {
        match event {
            EditorEvent::ModeChanged { .. }
            | EditorEvent::SelectionChanged { .. }
            | EditorEvent::SpeedChanged { .. } => {
                tracing::debug!("[editor] {event:?}");
            }
            _ => tracing::info!("[editor] {event:?}"),
        }
    }
}

/// System to end the app when the session asks to quit.
pub fn handle_exit(mut messages: MessageReader<EditorMessage>, mut exit: MessageWriter<AppExit>) {
    let mut quit = false;
    for EditorMessage(event) in messages.read() {
        quit |= matches!(event, EditorEvent::QuitRequested);
    }
    if quit {
        tracing::info!("[app] quit requested");
        exit.write(AppExit::Success);
    }
}
