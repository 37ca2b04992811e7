//! Rendering systems.
//!
//! Replays the session's recorded draw calls through Bevy's Gizmos API. Gizmos
//! only stroke shapes, so filled circles are drawn as concentric rings.

use bevy::prelude::*;

use crate::bevy::resources::{DisplayRes, DrawListRes, SpirographRes};
use crate::canvas::{Display, DrawCommand};
use crate::color::Color as SpiroColor;

/// Ring spacing used to fill circles, in logical pixels.
const FILL_STEP: f32 = 1.0;

/// System to spawn the 2D camera and clear to the configured background.
pub fn setup_camera(mut commands: Commands, spirograph: Res<SpirographRes>) {
    let background = spirograph.session.config().background;
    commands.insert_resource(ClearColor(to_bevy_color(background)));
    commands.spawn(Camera2d);
    tracing::info!("[rendering] camera ready");
}

/// System to draw the persistent trail surface.
pub fn render_trails(mut gizmos: Gizmos, draw_list: Res<DrawListRes>, display: Res<DisplayRes>) {
    for command in draw_list.list.trail_commands() {
        draw_command(&mut gizmos, command, display.display);
    }
}

/// System to draw this frame's arms and widgets.
pub fn render_frame(mut gizmos: Gizmos, draw_list: Res<DrawListRes>, display: Res<DisplayRes>) {
    for command in draw_list.list.frame_commands() {
        draw_command(&mut gizmos, command, display.display);
    }
}

fn draw_command(gizmos: &mut Gizmos, command: &DrawCommand, display: Display) {
    match *command {
        DrawCommand::Line { color, from, to } => {
            gizmos.line_2d(
                canvas_to_world(from, display),
                canvas_to_world(to, display),
                to_bevy_color(color),
            );
        }
        DrawCommand::StrokeCircle {
            color,
            center,
            radius,
        } => {
            gizmos.circle_2d(
                Isometry2d::from_translation(canvas_to_world(center, display)),
                radius,
                to_bevy_color(color),
            );
        }
        DrawCommand::FillCircle {
            color,
            center,
            radius,
        } => {
            let isometry = Isometry2d::from_translation(canvas_to_world(center, display));
            let color = to_bevy_color(color);
            let mut r = radius;
            while r > 0.0 {
                gizmos.circle_2d(isometry, r, color);
                r -= FILL_STEP;
            }
        }
    }
}

/// Maps canvas space (top-left origin, y down) to world space of a 2D camera
/// centered on the window (y up).
pub fn canvas_to_world(point: Vec2, display: Display) -> Vec2 {
    Vec2::new(point.x - display.width / 2.0, display.height / 2.0 - point.y)
}

pub fn to_bevy_color(color: SpiroColor) -> Color {
    Color::Srgba(color.into())
}
