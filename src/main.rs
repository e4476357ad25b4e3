//! Buzz desktop binary: a transparent window full of bees.
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::window::WindowPlugin;
use buzz::{init_logging, BeeModelsPlugin, PresentationPlugin, SwarmPlugin, SwarmSettings};
use clap::Parser;

/// Bees in sunglasses buzzing across the desktop
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Seed the swarm for a reproducible flight
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> AppExit {
    let args = Args::parse();
    init_logging(args.verbose);

    // Bevy's default window size matches `DisplaySize::default()`.
    let window = Window {
        title: "Buzz".to_owned(),
        transparent: true,
        ..default()
    };

    App::new()
        .add_plugins(
            DefaultPlugins
                .build()
                .disable::<LogPlugin>()
                .set(WindowPlugin {
                    primary_window: Some(window),
                    ..default()
                }),
        )
        .insert_resource(SwarmSettings {
            seed: args.seed,
            ..SwarmSettings::default()
        })
        .add_plugins((SwarmPlugin, PresentationPlugin, BeeModelsPlugin))
        .run()
}
