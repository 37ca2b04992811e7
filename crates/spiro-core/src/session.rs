//! A complete spirograph session: tree, editor and animation driven per frame.

use crate::animation::AnimationDriver;
use crate::arm::ArmTree;
use crate::canvas::{Canvas, Display};
use crate::config::SpiroConfig;
use crate::editor::{EditMode, Editor, EditorEvent};
use crate::error::ArmError;
use crate::input::{Action, InputState};

/// Owns everything that persists between frames.
#[derive(Debug, Clone)]
pub struct Spirograph {
    config: SpiroConfig,
    display: Display,
    tree: ArmTree,
    editor: Editor,
    animation: AnimationDriver,
}

impl Spirograph {
    /// Creates an empty session with the root anchored at the display center.
    pub fn new(config: SpiroConfig, display: Display) -> Self {
        let tree = ArmTree::new(display.center(), config.root_direction());
        let editor = Editor::new(&config, display, tree.root());
        Self {
            config,
            display,
            tree,
            editor,
            animation: AnimationDriver::default(),
        }
    }

    pub fn config(&self) -> &SpiroConfig {
        &self.config
    }

    pub fn display(&self) -> Display {
        self.display
    }

    pub fn tree(&self) -> &ArmTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut ArmTree {
        &mut self.tree
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn animation(&self) -> &AnimationDriver {
        &self.animation
    }

    /// Whether the trail surface should be shown.
    pub fn shows_trails(&self) -> bool {
        self.animation.is_animating()
    }

    /// Relayouts widgets for a new display size. The root keeps its anchor.
    pub fn resize(&mut self, display: Display) {
        if display != self.display {
            self.display = display;
            self.editor.resize(display);
        }
    }

    /// Runs one frame and returns what happened during it.
    ///
    /// Structural edits happen in the editor pass, before any rotation in the
    /// same frame.
    pub fn frame(
        &mut self,
        input: &InputState,
        dt: f64,
        canvas: &mut impl Canvas,
    ) -> Result<Vec<EditorEvent>, ArmError> {
        let mut events = Vec::new();
        let background = self.config.background;

        if self.animation.is_animating() {
            self.editor.enter(EditMode::EditMenu, &mut events);
            self.animation.frame(
                &mut self.tree,
                input,
                dt,
                canvas,
                background,
                &mut events,
            );
        } else {
            self.editor
                .frame(&mut self.tree, input, dt, canvas, &mut events)?;
            if input.pressed(Action::PlayPause) && self.editor.mode() == EditMode::EditMenu {
                self.animation
                    .start(&mut self.tree, canvas, background, &mut events);
            }
        }

        if input.pressed(Action::Quit) {
            events.push(EditorEvent::QuitRequested);
        }
        Ok(events)
    }
}
