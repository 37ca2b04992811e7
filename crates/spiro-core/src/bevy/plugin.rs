//! Bevy plugins for the spirograph.
//!
//! Provides:
//! - `SpiroHeadlessPlugin`: Logic-only plugin (no rendering/window dependencies) for headless testing
//! - `SpiroUnifiedPlugin`: Full plugin including `SpiroHeadlessPlugin` + window and rendering systems

use bevy::prelude::*;

use crate::bevy::events::EditorMessage;
use crate::bevy::resources::*;
use crate::bevy::systems;
use crate::canvas::Display;
use crate::config::SpiroConfig;

/// Whether the trail surface is on screen.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    #[default]
    Edit,
    Animate,
}

/// Ordering of the per-frame pipeline.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SpiroSet {
    /// Sample pointer, buttons and keys.
    Input,
    /// Run the session.
    Frame,
    /// Replay draw calls.
    Render,
}

// ============================================================================
// Headless Plugin (logic only, no rendering/window dependencies)
// ============================================================================

/// Headless plugin containing the whole session without rendering or window
/// dependencies.
///
/// Use this plugin in tests with `MinimalPlugins` and `InputPlugin`; the pointer
/// is then driven through the [`CursorPosition`] resource.
pub struct SpiroHeadlessPlugin {
    pub config: SpiroConfig,
    pub display: Display,
}

impl Default for SpiroHeadlessPlugin {
    fn default() -> Self {
        Self {
            config: SpiroConfig::default(),
            display: Display::default(),
        }
    }
}

impl Plugin for SpiroHeadlessPlugin {
    fn build(&self, app: &mut App) {
        // ====================================================================
        // States
        // ====================================================================
        app.init_state::<ViewMode>();

        // ====================================================================
        // Resources
        // ====================================================================
        app.insert_resource(SpirographRes::new(self.config.clone(), self.display))
            .insert_resource(DrawListRes::new(self.config.trail_capacity))
            .insert_resource(DisplayRes {
                display: self.display,
            })
            .init_resource::<InputRes>()
            .init_resource::<CursorPosition>()
            .init_resource::<KeyBindings>();

        // ====================================================================
        // Messages
        // ====================================================================
        app.add_message::<EditorMessage>();

        // ====================================================================
        // Frame pipeline
        // ====================================================================
        app.configure_sets(
            Update,
            (SpiroSet::Input, SpiroSet::Frame, SpiroSet::Render).chain(),
        );

        app.add_systems(Startup, systems::unclamp_frame_time);
        app.add_systems(Update, systems::capture_input.in_set(SpiroSet::Input));
        app.add_systems(
            Update,
            (systems::step_frame, systems::sync_view_mode)
                .chain()
                .in_set(SpiroSet::Frame),
        );
        app.add_systems(
            Update,
            (systems::log_editor_messages, systems::handle_exit).after(SpiroSet::Frame),
        );

        tracing::info!(
            "[plugin] spirograph ready ({}x{})",
            self.display.width,
            self.display.height
        );
    }
}

// ============================================================================
// Unified Plugin (headless + window + rendering)
// ============================================================================

/// Full plugin: `SpiroHeadlessPlugin` plus systems that need `Window`,
/// `Camera2d` and `Gizmos`.
pub struct SpiroUnifiedPlugin {
    pub config: SpiroConfig,
    pub display: Display,
}

impl Default for SpiroUnifiedPlugin {
    fn default() -> Self {
        Self {
            config: SpiroConfig::default(),
            display: Display::default(),
        }
    }
}

impl Plugin for SpiroUnifiedPlugin {
    fn build(&self, app: &mut App) {
        // ====================================================================
        // Headless logic
        // ====================================================================
        app.add_plugins(SpiroHeadlessPlugin {
            config: self.config.clone(),
            display: self.display,
        });

        // ====================================================================
        // Window input
        // ====================================================================
        app.add_systems(
            Update,
            systems::track_cursor_position.before(SpiroSet::Input),
        );

        // ====================================================================
        // Rendering
        // ====================================================================
        app.add_systems(Startup, systems::setup_camera);
        app.add_systems(
            Update,
            (
                systems::render_trails.run_if(in_state(ViewMode::Animate)),
                systems::render_frame,
            )
                .chain()
                .in_set(SpiroSet::Render),
        );
    }
}
