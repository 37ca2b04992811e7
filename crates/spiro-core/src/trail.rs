//! Per-arm trail of the tip's path.
//!
//! A trail keeps only its last two samples. Each draw adds one segment to the
//! persistent trail surface, so the full path lives on the surface rather than
//! in memory.

use bevy::math::Vec2;

use crate::canvas::{Canvas, RenderTarget};
use crate::color::Color;

#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    pub color: Color,
    /// Rest-pose tip position the path starts from.
    pub first_point: Vec2,
    pub current_point: Vec2,
    pub previous_point: Vec2,
    /// Samples recorded since the last reset.
    pub length: usize,
}

impl Trail {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            first_point: Vec2::ZERO,
            current_point: Vec2::ZERO,
            previous_point: Vec2::ZERO,
            length: 0,
        }
    }

    /// Seeds the path with the rest-pose tip position.
    pub fn seed(&mut self, point: Vec2) {
        self.first_point = point;
        self.current_point = point;
        self.previous_point = point;
    }

    pub fn new_point(&mut self, point: Vec2) {
        self.length += 1;
        self.previous_point = self.current_point;
        self.current_point = point;
    }

    /// Draws the latest segment onto the trail surface.
    ///
    /// Returns whether a segment was drawn (at least two samples recorded).
    pub fn draw(&self, canvas: &mut impl Canvas) -> bool {
        if self.length < 2 {
            return false;
        }
        canvas.set_render_target(RenderTarget::Trails);
        canvas.draw_line(self.color, self.previous_point, self.current_point);
        canvas.set_render_target(RenderTarget::Frame);
        true
    }

    /// Forgets recorded samples and clears the trail surface to `background`.
    pub fn reset(&mut self, canvas: &mut impl Canvas, background: Color) {
        self.length = 0;
        canvas.set_render_target(RenderTarget::Trails);
        canvas.clear(background);
        canvas.set_render_target(RenderTarget::Frame);
    }
}

impl Default for Trail {
    fn default() -> Self {
        Self::new(Color::WHITE)
    }
}
