//! Spiro-Live Core Library
//!
//! Interactive spirograph built from a tree of rotating arms. Each arm is a
//! vector anchored on its parent arm; animating the tree traces the tips' paths.
//!
//! The engine is host-agnostic: it reads an [`input::InputState`] and draws
//! through a [`canvas::Canvas`]. The [`bevy`](crate::bevy) module hosts it in a
//! Bevy app.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod animation;
pub mod arm;
pub mod canvas;
pub mod color;
pub mod config;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod input;
pub mod session;
pub mod trail;
pub mod widgets;

// Bevy integration
pub mod bevy;

pub use animation::{AnimationDriver, AppMode};
pub use arm::{ArmId, ArmNode, ArmTree, Highlight, NearestArm, Removal};
pub use canvas::{Canvas, Display, DrawCommand, DrawList, RenderTarget};
pub use color::Color;
pub use config::{PaletteConfig, SliderConfig, SpiroConfig};
pub use editor::{EditMode, Editor, EditorEvent};
pub use error::{ArmError, ConfigError};
pub use input::{Action, InputSnapshot, InputState};
pub use session::Spirograph;
pub use trail::Trail;
