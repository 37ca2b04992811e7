//! Tunable parameters, loadable from JSON.

use std::path::Path;

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

use crate::arm::{DEFAULT_RADIUS, DEFAULT_REVOLUTIONS_PER_SECOND};
use crate::color::Color;
use crate::error::ConfigError;

/// Editor and rendering configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpiroConfig {
    #[serde(default = "default_background")]
    pub background: Color,
    /// Rest direction of the root arm. Only its anchor role matters.
    #[serde(default = "default_root_direction")]
    pub root_direction: [f32; 2],
    #[serde(default = "default_revolutions_per_second")]
    pub default_revolutions_per_second: f32,
    #[serde(default = "default_radius")]
    pub default_radius: f32,
    /// Head/base radius while hovered.
    #[serde(default = "default_hover_radius")]
    pub hover_radius: f32,
    #[serde(default)]
    pub palette: PaletteConfig,
    #[serde(default)]
    pub speed_slider: SliderConfig,
    /// Maximum segments kept on the trail surface.
    #[serde(default = "default_trail_capacity")]
    pub trail_capacity: usize,
}

fn default_background() -> Color {
    Color::BLACK
}

fn default_root_direction() -> [f32; 2] {
    [0.0, 0.1]
}

fn default_revolutions_per_second() -> f32 {
    DEFAULT_REVOLUTIONS_PER_SECOND
}

fn default_radius() -> f32 {
    DEFAULT_RADIUS
}

fn default_hover_radius() -> f32 {
    7.0
}

fn default_trail_capacity() -> usize {
    200_000
}

impl Default for SpiroConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            root_direction: default_root_direction(),
            default_revolutions_per_second: default_revolutions_per_second(),
            default_radius: default_radius(),
            hover_radius: default_hover_radius(),
            palette: PaletteConfig::default(),
            speed_slider: SliderConfig::default(),
            trail_capacity: default_trail_capacity(),
        }
    }
}

/// Colour palette layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaletteConfig {
    /// Steps per colour channel; the palette shows `partitions³` swatches.
    #[serde(default = "default_partitions")]
    pub partitions: u32,
    #[serde(default = "default_palette_margin")]
    pub margin: f32,
}

fn default_partitions() -> u32 {
    3
}

fn default_palette_margin() -> f32 {
    20.0
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            partitions: default_partitions(),
            margin: default_palette_margin(),
        }
    }
}

/// Rotation-speed slider layout and range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderConfig {
    #[serde(default = "default_slider_margin")]
    pub margin: f32,
    #[serde(default = "default_radius")]
    pub radius: f32,
    #[serde(default = "default_hover_radius")]
    pub hover_radius: f32,
    #[serde(default)]
    pub min: f32,
    #[serde(default = "default_slider_max")]
    pub max: f32,
}

fn default_slider_margin() -> f32 {
    30.0
}

fn default_slider_max() -> f32 {
    2.0
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            margin: default_slider_margin(),
            radius: default_radius(),
            hover_radius: default_hover_radius(),
            min: 0.0,
            max: default_slider_max(),
        }
    }
}

impl SpiroConfig {
    /// Parses and validates a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reads a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        tracing::info!("[config] loaded {}", path.display());
        Ok(config)
    }

    pub fn root_direction(&self) -> Vec2 {
        Vec2::from_array(self.root_direction)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let radii = [
            ("default_radius", self.default_radius),
            ("hover_radius", self.hover_radius),
            ("speed_slider.radius", self.speed_slider.radius),
            ("speed_slider.hover_radius", self.speed_slider.hover_radius),
        ];
        for (name, radius) in radii {
            if radius.is_nan() || radius <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be positive, got {radius}"
                )));
            }
        }
        if self.palette.partitions < 2 {
            return Err(ConfigError::Invalid(format!(
                "palette.partitions must be at least 2, got {}",
                self.palette.partitions
            )));
        }
        if self.speed_slider.max <= self.speed_slider.min {
            return Err(ConfigError::Invalid(format!(
                "speed_slider range is empty: [{}, {}]",
                self.speed_slider.min, self.speed_slider.max
            )));
        }
        if self.root_direction() == Vec2::ZERO {
            return Err(ConfigError::Invalid(
                "root_direction must not be zero".to_string(),
            ));
        }
        Ok(())
    }
}
