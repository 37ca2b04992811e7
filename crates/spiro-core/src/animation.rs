//! Playback of the arm tree.

use crate::arm::{ArmTree, Highlight};
use crate::canvas::Canvas;
use crate::color::Color;
use crate::editor::EditorEvent;
use crate::input::{Action, InputState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    #[default]
    Edit,
    Animate,
}

/// Switches between editing and animating and advances the tree while playing.
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    mode: AppMode,
    playing: bool,
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self {
            mode: AppMode::Edit,
            playing: true,
        }
    }
}

impl AnimationDriver {
    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn is_animating(&self) -> bool {
        self.mode == AppMode::Animate
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Enters animate mode from the rest pose with freshly seeded trails.
    pub fn start(
        &mut self,
        tree: &mut ArmTree,
        canvas: &mut impl Canvas,
        background: Color,
        events: &mut Vec<EditorEvent>,
    ) {
        tree.reset(canvas, background);
        tree.seed_trails();
        self.mode = AppMode::Animate;
        tracing::info!("[animation] started ({} arms)", tree.len() - 1);
        events.push(EditorEvent::AnimationStarted);
    }

    /// Returns to edit mode with the tree at rest.
    pub fn stop(
        &mut self,
        tree: &mut ArmTree,
        canvas: &mut impl Canvas,
        background: Color,
        events: &mut Vec<EditorEvent>,
    ) {
        self.mode = AppMode::Edit;
        self.playing = true;
        tree.reset(canvas, background);
        tracing::info!("[animation] stopped");
        events.push(EditorEvent::AnimationStopped);
    }

    /// Runs one animate-mode frame: trail segments first, then rotation and the
    /// highlighted tree while playing, then the play/pause and stop keys.
    pub fn frame(
        &mut self,
        tree: &mut ArmTree,
        input: &InputState,
        dt: f64,
        canvas: &mut impl Canvas,
        background: Color,
        events: &mut Vec<EditorEvent>,
    ) {
        tree.draw_trails(canvas);
        if self.playing {
            tree.rotate(dt, true);
            tree.draw(canvas, Highlight::Highlight, background);
        }

        if input.pressed(Action::PlayPause) {
            self.playing = !self.playing;
            tracing::debug!("[animation] playing = {}", self.playing);
            events.push(EditorEvent::PlayToggled {
                playing: self.playing,
            });
        } else if input.pressed(Action::Reset) {
            self.stop(tree, canvas, background, events);
        }
    }
}
