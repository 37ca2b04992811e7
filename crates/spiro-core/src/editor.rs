//! Interactive editor state machine.
//!
//! The editor runs once per frame in edit mode. It reads the frame's
//! [`InputState`], mutates the [`ArmTree`] and draws its overlays.
//!
//! Modes:
//! - `SetChildPosition`: pick an anchor on the nearest arm, press to create an arm
//! - `SetChildDirection`: drag the new arm's head, release to commit
//! - `EditMenu`: palette, speed slider, head/base dragging, selection and
//!   structural keys, in that priority order
//! - `Preview`: reserved, does nothing but draw the tree

use bevy::math::Vec2;

use crate::arm::{ArmId, ArmNode, ArmTree, Highlight};
use crate::canvas::{Canvas, Display};
use crate::color::Color;
use crate::config::SpiroConfig;
use crate::error::ArmError;
use crate::geometry::within_radius;
use crate::input::{Action, InputState};
use crate::widgets::{ColorPalette, SpeedSlider};

/// Radius of the anchor marker shown while placing an arm.
const ANCHOR_MARKER_RADIUS: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    SetChildPosition,
    SetChildDirection,
    EditMenu,
    Preview,
}

/// Something observable that happened during a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorEvent {
    ModeChanged { from: EditMode, to: EditMode },
    ArmCreated { id: ArmId, parent: ArmId },
    ArmDeleted { id: ArmId, removed: usize },
    ArmsCleared { removed: usize },
    SelectionChanged { id: ArmId },
    TrailToggled { id: ArmId, on: bool },
    ColorChanged { id: ArmId, color: Color },
    SpeedChanged { id: ArmId, revolutions_per_second: f32 },
    AnimationStarted,
    AnimationStopped,
    PlayToggled { playing: bool },
    QuitRequested,
}

/// Editor state carried across frames.
#[derive(Debug, Clone)]
pub struct Editor {
    mode: EditMode,
    /// No arm exists yet: the next placement targets the root.
    creating_first: bool,
    selected: ArmId,
    /// Arm being aimed in `SetChildDirection`.
    new_child: Option<ArmId>,
    holding_head: bool,
    holding_base: bool,
    palette: ColorPalette,
    slider: SpeedSlider,
    background: Color,
    default_radius: f32,
    hover_radius: f32,
    default_revolutions_per_second: f32,
}

impl Editor {
    pub fn new(config: &SpiroConfig, display: Display, root: ArmId) -> Self {
        Self {
            mode: EditMode::SetChildPosition,
            creating_first: true,
            selected: root,
            new_child: None,
            holding_head: false,
            holding_base: false,
            palette: ColorPalette::new(&config.palette, display),
            slider: SpeedSlider::new(config.speed_slider, display),
            background: config.background,
            default_radius: config.default_radius,
            hover_radius: config.hover_radius,
            default_revolutions_per_second: config.default_revolutions_per_second,
        }
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn creating_first(&self) -> bool {
        self.creating_first
    }

    pub fn selected(&self) -> ArmId {
        self.selected
    }

    pub fn is_holding_head(&self) -> bool {
        self.holding_head
    }

    pub fn is_holding_base(&self) -> bool {
        self.holding_base
    }

    pub fn palette(&self) -> &ColorPalette {
        &self.palette
    }

    pub fn slider(&self) -> &SpeedSlider {
        &self.slider
    }

    pub fn resize(&mut self, display: Display) {
        self.palette.resize(display);
        self.slider.resize(display);
    }

    /// Switches mode, reporting the change.
    pub fn enter(&mut self, mode: EditMode, events: &mut Vec<EditorEvent>) {
        if self.mode == mode {
            return;
        }
        tracing::debug!("[editor] {:?} -> {:?}", self.mode, mode);
        events.push(EditorEvent::ModeChanged {
            from: self.mode,
            to: mode,
        });
        self.mode = mode;
    }

    fn select(&mut self, id: ArmId, events: &mut Vec<EditorEvent>) {
        if self.selected != id {
            self.selected = id;
            events.push(EditorEvent::SelectionChanged { id });
        }
    }

    /// Runs one edit-mode frame.
    pub fn frame(
        &mut self,
        tree: &mut ArmTree,
        input: &InputState,
        dt: f64,
        canvas: &mut impl Canvas,
        events: &mut Vec<EditorEvent>,
    ) -> Result<(), ArmError> {
        if !tree.contains(self.selected) {
            self.selected = tree.root();
        }
        tree.draw(canvas, Highlight::Unhighlight, self.background);

        match self.mode {
            EditMode::EditMenu => self.edit_menu(tree, input, dt, canvas, events),
            EditMode::SetChildPosition => self.set_child_position(tree, input, canvas, events),
            EditMode::SetChildDirection => self.set_child_direction(tree, input, canvas, events),
            EditMode::Preview => Ok(()),
        }
    }

    // ========================================================================
    // Edit menu
    // ========================================================================

    fn edit_menu(
        &mut self,
        tree: &mut ArmTree,
        input: &InputState,
        dt: f64,
        canvas: &mut impl Canvas,
        events: &mut Vec<EditorEvent>,
    ) -> Result<(), ArmError> {
        let selected = self.selected;
        let root_selected = selected == tree.root();

        let node = tree.node(selected)?;
        let palette = self.palette.frame(input, node.trail.color, canvas);
        let slider = self.slider.frame(input, node.revolutions_per_second, canvas);

        if !root_selected {
            if let Some(color) = palette.picked {
                let node = tree.node_mut(selected)?;
                if node.trail.color != color {
                    node.trail.color = color;
                    events.push(EditorEvent::ColorChanged { id: selected, color });
                }
            }
            if let (false, Some(value)) = (palette.claimed, slider.value) {
                tree.rotate_subtree(selected, dt, false);
                let node = tree.node_mut(selected)?;
                if (node.revolutions_per_second - value).abs() > f32::EPSILON {
                    node.revolutions_per_second = value;
                    events.push(EditorEvent::SpeedChanged {
                        id: selected,
                        revolutions_per_second: value,
                    });
                }
            }
            if slider.released {
                tree.reset_subtree(selected, canvas, self.background);
            }
        }

        if !palette.claimed && !slider.claimed {
            let editing = self.edit_dirpos(tree, input, canvas)?;
            self.reselect(tree, input, canvas, editing, events)?;
        }

        self.edit_keys(tree, input, events)
    }

    fn edit_keys(
        &mut self,
        tree: &mut ArmTree,
        input: &InputState,
        events: &mut Vec<EditorEvent>,
    ) -> Result<(), ArmError> {
        let root = tree.root();

        if input.pressed(Action::ToggleTrail) && self.selected != root {
            let node = tree.node_mut(self.selected)?;
            node.trail_on = !node.trail_on;
            events.push(EditorEvent::TrailToggled {
                id: self.selected,
                on: node.trail_on,
            });
        }

        if input.pressed(Action::DeleteArm) && self.selected != root {
            let deleted = self.selected;
            let parent = tree.node(deleted)?.parent().unwrap_or(root);
            let removal = tree.remove_child(parent, deleted)?;
            tracing::info!("[editor] deleted {deleted:?} ({} arms)", removal.removed);
            events.push(EditorEvent::ArmDeleted {
                id: deleted,
                removed: removal.removed,
            });
            self.select(parent, events);

            if removal.root_emptied {
                self.creating_first = true;
                self.enter(EditMode::SetChildPosition, events);
            }
        }

        if input.pressed(Action::Reset) && !self.creating_first && !tree.is_empty() {
            let removed = tree.clear_children(root)?;
            tracing::info!("[editor] cleared {removed} arms");
            events.push(EditorEvent::ArmsCleared { removed });
            self.select(root, events);
            self.creating_first = true;
            self.enter(EditMode::SetChildPosition, events);
        }

        if input.held(Action::NewArm) {
            self.enter(EditMode::SetChildPosition, events);
        }
        Ok(())
    }

    /// Head and base dragging of the selected arm. Returns whether either handle
    /// is hovered or held.
    ///
    /// The root's head can be dragged; its base stays fixed as the tree anchor.
    fn edit_dirpos(
        &mut self,
        tree: &mut ArmTree,
        input: &InputState,
        canvas: &mut impl Canvas,
    ) -> Result<bool, ArmError> {
        let selected = self.selected;
        let node = tree.node(selected)?;
        let can_slide = !node.is_root;

        let pointer = input.pointer();
        let base = node.position_initial;
        let hovering_head = within_radius(pointer, node.rest_tip(), self.hover_radius);
        let hovering_base = can_slide && within_radius(pointer, base, self.hover_radius);

        if input.held(Action::HoldHead) || (hovering_head && input.primary_held()) {
            self.holding_head = true;
        } else if !input.primary_held() {
            self.holding_head = false;
        }
        if can_slide && (input.held(Action::HoldBase) || (hovering_base && input.primary_held())) {
            self.holding_base = true;
        } else if !can_slide || !input.primary_held() {
            self.holding_base = false;
        }

        if self.holding_head {
            tree.set_direction(selected, pointer - base)?;
        }
        if self.holding_base {
            tree.slide_on_parent(selected, pointer)?;
        }

        let node = tree.node_mut(selected)?;
        node.head_radius = if hovering_head || self.holding_head {
            self.hover_radius
        } else {
            self.default_radius
        };
        node.base_radius = if hovering_base || self.holding_base {
            self.hover_radius
        } else {
            self.default_radius
        };

        let node = tree.node(selected)?;
        if hovering_head && !self.holding_head {
            node.draw_head(canvas, Highlight::Highlight, self.background);
        }
        if hovering_base && !self.holding_base {
            node.draw_base(canvas, Highlight::Highlight, self.background);
        }

        Ok(hovering_head || hovering_base || self.holding_head || self.holding_base)
    }

    fn reselect(
        &mut self,
        tree: &ArmTree,
        input: &InputState,
        canvas: &mut impl Canvas,
        editing: bool,
        events: &mut Vec<EditorEvent>,
    ) -> Result<(), ArmError> {
        let Some(closest) = tree.nearest_selectable(input.pointer()) else {
            self.enter(EditMode::SetChildPosition, events);
            return Ok(());
        };

        if !editing {
            let node = tree.node(closest.id)?;
            node.draw_direction(canvas, Highlight::LightHighlight);
            node.draw_head(canvas, Highlight::Unhighlight, self.background);
        }
        let selected = tree.node(self.selected)?;
        selected.draw_direction(canvas, Highlight::Highlight);
        selected.draw_head(canvas, Highlight::Highlight, self.background);
        selected.draw_base(canvas, Highlight::Highlight, self.background);

        if input.primary_pressed() && !editing {
            self.select(closest.id, events);
        }
        Ok(())
    }

    // ========================================================================
    // Arm placement
    // ========================================================================

    fn set_child_position(
        &mut self,
        tree: &mut ArmTree,
        input: &InputState,
        canvas: &mut impl Canvas,
        events: &mut Vec<EditorEvent>,
    ) -> Result<(), ArmError> {
        let pointer = input.pointer();
        let target = match tree.nearest_selectable(pointer) {
            Some(hit) => hit,
            None => tree.hit_test(tree.root(), pointer)?,
        };

        let node = tree.node(target.id)?;
        let anchor = node.position_initial + target.offset;
        node.draw_direction(canvas, Highlight::Highlight);
        node.draw_head(canvas, Highlight::Highlight, self.background);
        canvas.fill_circle(Color::YELLOW, anchor, ANCHOR_MARKER_RADIUS);
        canvas.draw_line(Color::ORANGE, pointer, anchor);

        if input.primary_pressed() {
            let child = ArmNode::new(anchor, pointer - anchor)
                .with_revolutions_per_second(self.default_revolutions_per_second)
                .with_radius(self.default_radius);
            let id = tree.add_child(target.id, child)?;
            tracing::info!("[editor] created {id:?} on {:?}", target.id);
            events.push(EditorEvent::ArmCreated {
                id,
                parent: target.id,
            });

            if target.id == tree.root() {
                self.creating_first = false;
            }
            self.new_child = Some(id);
            self.enter(EditMode::SetChildDirection, events);
        } else if input.released(Action::NewArm) && !tree.is_empty() {
            self.enter(EditMode::EditMenu, events);
        }
        Ok(())
    }

    fn set_child_direction(
        &mut self,
        tree: &mut ArmTree,
        input: &InputState,
        canvas: &mut impl Canvas,
        events: &mut Vec<EditorEvent>,
    ) -> Result<(), ArmError> {
        let Some(child) = self.new_child.filter(|id| tree.contains(*id)) else {
            self.new_child = None;
            self.enter(EditMode::SetChildPosition, events);
            return Ok(());
        };

        let node = tree.node(child)?;
        let anchor = node.position_initial;
        let parent = node.parent().unwrap_or_else(|| tree.root());
        tree.set_direction(child, input.pointer() - anchor)?;

        let parent = tree.node(parent)?;
        parent.draw_direction(canvas, Highlight::Highlight);
        parent.draw_head(canvas, Highlight::Highlight, self.background);

        if input.primary_released() {
            self.new_child = None;
            self.select(child, events);
            tree.node_mut(child)?.trail_on = true;

            if input.held(Action::NewArm) {
                self.enter(EditMode::SetChildPosition, events);
            } else {
                self.enter(EditMode::EditMenu, events);
            }
        } else if input.secondary_pressed() {
            self.new_child = None;
            self.enter(EditMode::SetChildPosition, events);
        }
        Ok(())
    }
}
