use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_rapier2d::prelude::*;
use void_miner::config::GameConfig;
use void_miner::constants::{BACKGROUND_COLOR, GAME_HEIGHT, GAME_WIDTH};
use void_miner::material::hex_color;
use void_miner::simulation::WorldLoopPlugin;

/// Configure Rapier physics: disable gravity for open space.
fn setup_physics_config(mut config: Query<&mut RapierConfiguration>) {
    for mut cfg in config.iter_mut() {
        cfg.gravity = Vec2::ZERO;
    }
}

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Void Miner".into(),
                // Opening size only; fit_window_to_config applies [display]
                // from the config file at startup.
                resolution: WindowResolution::new(GAME_WIDTH as u32, GAME_HEIGHT as u32),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(hex_color(BACKGROUND_COLOR)))
        // Compiled defaults; load_game_config overwrites them from
        // assets/void_miner.toml (if present) in the Startup schedule.
        .insert_resource(GameConfig::default())
        // pixels_per_meter(1.0) keeps world units equal to pixels, so the
        // ship's unit mass turns ExternalForce straight into u/s².
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(1.0))
        .add_plugins(WorldLoopPlugin::default())
        .add_systems(Startup, setup_physics_config)
        .run();
}
