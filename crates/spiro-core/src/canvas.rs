//! Drawing surface abstraction.
//!
//! The engine never rasterizes anything itself. It issues lines and circles to a
//! [`Canvas`], which either targets the visible frame (redrawn every frame) or the
//! persistent trail surface (accumulated until cleared).

use std::collections::VecDeque;

use bevy::math::Vec2;

use crate::color::Color;

/// Size of the visible drawing area in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Display {
    pub width: f32,
    pub height: f32,
}

impl Display {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// Surface that subsequent draw calls go to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderTarget {
    /// The visible frame, cleared at the start of every frame.
    #[default]
    Frame,
    /// The off-screen trail surface, kept across frames.
    Trails,
}

/// Drawing services consumed by the engine.
pub trait Canvas {
    /// Redirects subsequent draws.
    fn set_render_target(&mut self, target: RenderTarget);
    /// Clears the current target to `color`.
    fn clear(&mut self, color: Color);
    fn draw_line(&mut self, color: Color, from: Vec2, to: Vec2);
    fn fill_circle(&mut self, color: Color, center: Vec2, radius: f32);
    fn stroke_circle(&mut self, color: Color, center: Vec2, radius: f32);
}

/// A single recorded draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Line { color: Color, from: Vec2, to: Vec2 },
    FillCircle { color: Color, center: Vec2, radius: f32 },
    StrokeCircle { color: Color, center: Vec2, radius: f32 },
}

/// Canvas that records draw calls for a host renderer to replay.
///
/// Frame commands are dropped by [`DrawList::begin_frame`]. Trail commands persist
/// until the trail surface is cleared, bounded by `trail_capacity` (oldest first).
#[derive(Debug, Clone)]
pub struct DrawList {
    target: RenderTarget,
    frame: Vec<DrawCommand>,
    trails: VecDeque<DrawCommand>,
    trail_background: Color,
    trail_capacity: usize,
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new(200_000)
    }
}

impl DrawList {
    pub fn new(trail_capacity: usize) -> Self {
        Self {
            target: RenderTarget::Frame,
            frame: Vec::new(),
            trails: VecDeque::new(),
            trail_background: Color::BLACK,
            trail_capacity,
        }
    }

    /// Starts a new frame: drops last frame's commands and targets the frame.
    pub fn begin_frame(&mut self) {
        self.frame.clear();
        self.target = RenderTarget::Frame;
    }

    pub fn target(&self) -> RenderTarget {
        self.target
    }

    pub fn frame_commands(&self) -> &[DrawCommand] {
        &self.frame
    }

    pub fn trail_commands(&self) -> impl Iterator<Item = &DrawCommand> {
        self.trails.iter()
    }

    pub fn trail_len(&self) -> usize {
        self.trails.len()
    }

    /// Colour the trail surface was last cleared to.
    pub fn trail_background(&self) -> Color {
        self.trail_background
    }

    fn push(&mut self, command: DrawCommand) {
        match self.target {
            RenderTarget::Frame => self.frame.push(command),
            RenderTarget::Trails => {
                if self.trail_capacity == 0 {
                    return;
                }
                while self.trails.len() >= self.trail_capacity {
                    self.trails.pop_front();
                }
                self.trails.push_back(command);
            }
        }
    }
}

impl Canvas for DrawList {
    fn set_render_target(&mut self, target: RenderTarget) {
        self.target = target;
    }

    fn clear(&mut self, color: Color) {
        match self.target {
            RenderTarget::Frame => self.frame.clear(),
            RenderTarget::Trails => {
                self.trails.clear();
                self.trail_background = color;
            }
        }
    }

    fn draw_line(&mut self, color: Color, from: Vec2, to: Vec2) {
        self.push(DrawCommand::Line { color, from, to });
    }

    fn fill_circle(&mut self, color: Color, center: Vec2, radius: f32) {
        self.push(DrawCommand::FillCircle {
            color,
            center,
            radius,
        });
    }

    fn stroke_circle(&mut self, color: Color, center: Vec2, radius: f32) {
        self.push(DrawCommand::StrokeCircle {
            color,
            center,
            radius,
        });
    }
}
