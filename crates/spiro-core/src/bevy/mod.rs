//! Bevy integration for the spirograph.
//!
//! The session itself is plain Rust; this module feeds it window input once per
//! frame, re-emits its events as messages and replays its draw calls with gizmos.

pub mod events;
pub mod plugin;
pub mod resources;
pub mod systems;

#[cfg(test)]
pub(crate) mod test_utils;

pub use events::*;
pub use plugin::{SpiroHeadlessPlugin, SpiroSet, SpiroUnifiedPlugin, ViewMode};
pub use resources::*;
