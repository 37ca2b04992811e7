//! Desktop entry point.
//!
//! Usage: `spiro-live [config.json]`

use anyhow::Context;
use bevy::prelude::*;
use bevy::winit::{UpdateMode, WinitSettings};
use spiro_core::bevy::SpiroUnifiedPlugin;
use spiro_core::{Display, SpiroConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => SpiroConfig::load(&path)
            .with_context(|| format!("failed to load config from {path}"))?,
        None => SpiroConfig::default(),
    };

    tracing::info!("[spiro] creating app");

    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Spirograph".to_string(),
                    ..default()
                }),
                ..default()
            })
            .disable::<bevy::log::LogPlugin>(),
    );

    app.insert_resource(WinitSettings {
        focused_mode: UpdateMode::Continuous,
        unfocused_mode: UpdateMode::Continuous,
    });

    app.add_plugins(SpiroUnifiedPlugin {
        config,
        display: Display::default(),
    });

    tracing::info!("[spiro] calling app.run()");
    match app.run() {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => anyhow::bail!("app exited with code {code}"),
    }
}
