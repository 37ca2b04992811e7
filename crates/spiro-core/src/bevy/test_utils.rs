//! Test utilities for headless Bevy integration tests.
//!
//! Provides `TestApp`, a wrapper around `bevy::app::App` that uses
//! `MinimalPlugins` + `SpiroHeadlessPlugin` for driving the session with
//! synthetic pointer and keyboard input.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use crate::bevy::events::EditorMessage;
use crate::bevy::plugin::{SpiroHeadlessPlugin, ViewMode};
use crate::bevy::resources::{CursorPosition, DrawListRes, SpirographRes};
use crate::canvas::Display;
use crate::config::SpiroConfig;
use crate::editor::EditorEvent;
use crate::session::Spirograph;

/// Simulated frame duration.
pub const FRAME_DT: f64 = 1.0 / 60.0;

/// Every editor event seen so far, in order.
#[derive(Resource, Debug, Default)]
pub(crate) struct RecordedEvents(pub Vec<EditorEvent>);

fn record_events(mut messages: MessageReader<EditorMessage>, mut recorded: ResMut<RecordedEvents>) {
    recorded.0.extend(messages.read().map(|EditorMessage(event)| *event));
}

/// A headless Bevy app wrapper for testing.
pub(crate) struct TestApp {
    pub app: App,
}

impl TestApp {
    /// Create a new test app with the default configuration on a 1280x720 display.
    pub fn new() -> Self {
        Self::with_config(SpiroConfig::default())
    }

    pub fn with_config(config: SpiroConfig) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(bevy::state::app::StatesPlugin);
        app.add_plugins(bevy::input::InputPlugin);
        app.add_plugins(SpiroHeadlessPlugin {
            config,
            display: Display::new(1280.0, 720.0),
        });
        // Advance time by a fixed step per update so rotation is deterministic.
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            FRAME_DT,
        )));
        app.init_resource::<RecordedEvents>();
        app.add_systems(Last, record_events);
        // Run one update to initialize all resources and state
        app.update();
        Self { app }
    }

    /// Run a single frame update.
    pub fn update(&mut self) {
        self.app.update();
    }

    pub fn update_n(&mut self, n: usize) {
        for _ in 0..n {
            self.app.update();
        }
    }

    /// Duration each following update advances time by.
    pub fn set_frame_time(&mut self, dt: Duration) {
        self.app.insert_resource(TimeUpdateStrategy::ManualDuration(dt));
    }

    pub fn set_cursor(&mut self, position: Vec2) {
        self.app.world_mut().resource_mut::<CursorPosition>().position = Some(position);
    }

    pub fn clear_cursor(&mut self) {
        self.app.world_mut().resource_mut::<CursorPosition>().position = None;
    }

    pub fn press_mouse(&mut self, button: MouseButton) {
        self.app
            .world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(button);
    }

    pub fn release_mouse(&mut self, button: MouseButton) {
        self.app
            .world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .release(button);
    }

    pub fn press_key(&mut self, key: KeyCode) {
        self.app
            .world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(key);
    }

    pub fn release_key(&mut self, key: KeyCode) {
        self.app
            .world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .release(key);
    }

    /// Press `key` for one frame, then release it for one frame.
    pub fn tap_key(&mut self, key: KeyCode) {
        self.press_key(key);
        self.update();
        self.release_key(key);
        self.update();
    }

    /// Press at `from`, drag to `to` and release, one frame each.
    pub fn drag(&mut self, from: Vec2, to: Vec2) {
        self.set_cursor(from);
        self.press_mouse(MouseButton::Left);
        self.update();
        self.set_cursor(to);
        self.update();
        self.release_mouse(MouseButton::Left);
        self.update();
    }

    pub fn session(&self) -> &Spirograph {
        &self.app.world().resource::<SpirographRes>().session
    }

    pub fn draw_list(&self) -> &DrawListRes {
        self.app.world().resource::<DrawListRes>()
    }

    pub fn view_mode(&self) -> ViewMode {
        *self.app.world().resource::<State<ViewMode>>().get()
    }

    pub fn events(&self) -> &[EditorEvent] {
        &self.app.world().resource::<RecordedEvents>().0
    }

    /// Get a mutable reference to the World.
    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }
}
