//! ECS messages emitted by the spirograph systems.

use bevy::prelude::*;

use crate::editor::EditorEvent;

/// Re-emits one [`EditorEvent`] reported by the session during a frame.
#[derive(Message, Debug, Clone, Copy)]
pub struct EditorMessage(pub EditorEvent);
