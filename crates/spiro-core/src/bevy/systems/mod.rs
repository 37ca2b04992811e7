//! Systems for the spirograph.
//!
//! Organized by functionality:
//! - input: pointer tracking and per-frame input sampling
//! - frame: session update, mode mirroring, logging and exit
//! - rendering: camera setup and gizmo replay of recorded draw calls

pub mod frame;
pub mod input;
pub mod rendering;

pub use frame::*;
pub use input::*;
pub use rendering::*;
