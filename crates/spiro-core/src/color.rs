//! Colour types used by trails, widgets and highlight rendering.

use bevy::color::{ColorToPacked, Hsva, Srgba};
use serde::{Deserialize, Serialize};

/// RGBA color representation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const ORANGE: Color = Color::rgb(255, 100, 0);

    /// Same colour with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<Color> for Srgba {
    fn from(color: Color) -> Self {
        Srgba::rgba_u8(color.r, color.g, color.b, color.a)
    }
}

impl From<Srgba> for Color {
    fn from(srgba: Srgba) -> Self {
        let [r, g, b, a] = srgba.to_u8_array();
        Self::new(r, g, b, a)
    }
}

impl Color {
    /// HSV view of this colour. Hue is in degrees.
    pub fn to_hsva(self) -> Hsva {
        Hsva::from(Srgba::from(self))
    }

    pub fn from_hsva(hsva: Hsva) -> Self {
        Srgba::from(hsva).into()
    }
}
