//! Edit-menu widgets: the colour palette and the rotation-speed slider.
//!
//! Both widgets draw themselves every edit-menu frame and report whether they
//! claim the frame's pointer interaction, so the editor can skip lower-priority
//! edits.

use bevy::color::Hsva;
use bevy::math::Vec2;

use crate::canvas::{Canvas, Display};
use crate::color::Color;
use crate::config::{PaletteConfig, SliderConfig};
use crate::geometry::within_radius;
use crate::input::InputState;

/// One palette button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swatch {
    pub color: Color,
    pub center: Vec2,
}

/// Result of one palette frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PaletteFrame {
    /// Pointer is inside the palette column band.
    pub claimed: bool,
    /// Colour picked this frame, if any.
    pub picked: Option<Color>,
}

/// Grid of `partitions³` colour swatches along the left edge.
///
/// Swatches are laid out in `partitions` columns by red level; each column lists
/// every green/blue combination top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorPalette {
    partitions: u32,
    margin: f32,
    spacing: f32,
    button_radius: f32,
}

impl ColorPalette {
    pub fn new(config: &PaletteConfig, display: Display) -> Self {
        let mut palette = Self {
            partitions: config.partitions.max(2),
            margin: config.margin,
            spacing: (config.margin * 0.25).floor(),
            button_radius: 0.0,
        };
        palette.resize(display);
        palette
    }

    /// Recomputes the swatch size so a full column fits the display height.
    pub fn resize(&mut self, display: Display) {
        #[allow(clippy::cast_precision_loss)]
        let rows = (self.partitions * self.partitions) as f32;
        let radius = ((display.height - 2.0 * self.margin) / rows
            - self.spacing * ((rows - 1.0) / rows))
            / 2.0;
        self.button_radius = radius.floor().max(1.0);
    }

    pub fn button_radius(&self) -> f32 {
        self.button_radius
    }

    fn draw_distance(&self) -> f32 {
        2.0 * self.button_radius + self.spacing
    }

    /// Whether `pointer` lies in the palette's column band.
    pub fn hover_area(&self, pointer: Vec2) -> bool {
        #[allow(clippy::cast_precision_loss)]
        let partitions = self.partitions as f32;
        pointer.x
            <= 2.0 * self.margin
                + (partitions - 1.0) * self.spacing
                + partitions * 2.0 * self.button_radius
    }

    /// Every swatch, column by column.
    pub fn swatches(&self) -> impl Iterator<Item = Swatch> + '_ {
        let p = self.partitions;
        let origin = self.margin + self.button_radius;
        let step = self.draw_distance();
        (0..p).flat_map(move |ri| {
            (0..p * p).map(move |row| {
                let (gi, bi) = (row / p, row % p);
                #[allow(clippy::cast_precision_loss)]
                let center = Vec2::new(
                    origin + ri as f32 * step,
                    origin + row as f32 * step,
                );
                Swatch {
                    color: Color::rgb(self.level(ri), self.level(gi), self.level(bi)),
                    center,
                }
            })
        })
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn level(&self, index: u32) -> u8 {
        (index as f32 * (255.0 / (self.partitions - 1) as f32)) as u8
    }

    pub fn swatch_at(&self, pointer: Vec2) -> Option<Swatch> {
        self.swatches()
            .find(|swatch| within_radius(pointer, swatch.center, self.button_radius))
    }

    /// Draws the palette around `current` and picks a colour while the primary
    /// button is held over a swatch.
    pub fn frame(
        &self,
        input: &InputState,
        current: Color,
        canvas: &mut impl Canvas,
    ) -> PaletteFrame {
        let pointer = input.pointer();
        let mut picked = None;

        for swatch in self.swatches() {
            let hovered = within_radius(pointer, swatch.center, self.button_radius);
            if hovered && input.primary_held() {
                picked = Some(swatch.color);
            }

            let r = self.button_radius;
            if swatch.color == current {
                canvas.fill_circle(Color::WHITE, swatch.center, r + 0.45 * self.spacing);
                canvas.fill_circle(Color::BLACK, swatch.center, r + 0.15 * self.spacing);
            } else if hovered {
                let ring = hover_ring_color(swatch.color);
                canvas.fill_circle(ring, swatch.center, r + 0.25 * self.spacing);
                canvas.fill_circle(Color::BLACK, swatch.center, r + 0.15 * self.spacing);
            }
            canvas.fill_circle(swatch.color, swatch.center, r);
        }

        PaletteFrame {
            claimed: self.hover_area(pointer),
            picked,
        }
    }
}

/// Pale tint of `color` at full brightness; greys map to white.
pub fn hover_ring_color(color: Color) -> Color {
    let hsva = color.to_hsva();
    Color::from_hsva(Hsva {
        saturation: hsva.saturation * 0.5,
        value: 1.0,
        alpha: 1.0,
        ..hsva
    })
}

/// Result of one slider frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SliderFrame {
    /// Pointer is over the knob or the slider band, or a drag is in progress.
    pub claimed: bool,
    /// New value while dragging.
    pub value: Option<f32>,
    /// A drag ended this frame.
    pub released: bool,
}

/// Vertical slider on the right edge mapping `[min, max]` bottom to top.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedSlider {
    config: SliderConfig,
    x: f32,
    top: f32,
    bottom: f32,
    holding: bool,
}

impl SpeedSlider {
    pub fn new(config: SliderConfig, display: Display) -> Self {
        let mut slider = Self {
            config,
            x: 0.0,
            top: 0.0,
            bottom: 0.0,
            holding: false,
        };
        slider.resize(display);
        slider
    }

    pub fn resize(&mut self, display: Display) {
        self.x = display.width - self.config.margin;
        self.top = self.config.margin;
        self.bottom = display.height - self.config.margin;
    }

    pub fn is_holding(&self) -> bool {
        self.holding
    }

    /// Whether the display is tall enough to fit a track between the margins.
    pub fn has_track(&self) -> bool {
        self.bottom > self.top
    }

    /// Knob height for `value`.
    pub fn knob_y(&self, value: f32) -> f32 {
        if !self.has_track() {
            return self.top;
        }
        let range = self.config.max - self.config.min;
        ((self.top - self.bottom) / range) * (value - self.config.min) + self.bottom
    }

    /// Value at height `y`, clamped to the track and rounded up to 0.01.
    pub fn value_at(&self, y: f32) -> f32 {
        if !self.has_track() {
            return self.config.min;
        }
        let y = y.clamp(self.top, self.bottom);
        let range = self.config.max - self.config.min;
        let value = range * (y - self.bottom) / (self.top - self.bottom) + self.config.min;
        (value * 100.0).ceil() / 100.0
    }

    fn hover_area(&self, pointer: Vec2) -> bool {
        pointer.x > self.x - self.config.margin
    }

    /// Updates the drag state for this frame and draws the slider at `value`.
    ///
    /// Without room for a track the slider is neither drawn nor draggable.
    pub fn frame(&mut self, input: &InputState, value: f32, canvas: &mut impl Canvas) -> SliderFrame {
        if !self.has_track() {
            let released = self.holding;
            self.holding = false;
            return SliderFrame {
                released,
                ..SliderFrame::default()
            };
        }

        let pointer = input.pointer();
        let knob = Vec2::new(self.x, self.knob_y(value));
        let hovering_knob = within_radius(pointer, knob, self.config.hover_radius);
        let hovering_area = self.hover_area(pointer);

        let was_holding = self.holding;
        if input.primary_held() && hovering_area {
            self.holding = true;
        } else if !input.primary_held() {
            self.holding = false;
        }

        let radius = if hovering_knob {
            self.config.hover_radius
        } else {
            self.config.radius
        };
        canvas.fill_circle(Color::WHITE, knob, radius);
        canvas.draw_line(
            Color::WHITE,
            Vec2::new(self.x, self.top),
            Vec2::new(self.x, self.bottom),
        );

        SliderFrame {
            claimed: hovering_knob || self.holding || hovering_area,
            value: self.holding.then(|| self.value_at(pointer.y)),
            released: was_holding && !self.holding,
        }
    }
}
