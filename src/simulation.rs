//! World loop plugin: startup ordering, the per-frame chain, and field
//! regeneration.
//!
//! ## Frame order
//!
//! | Step | System                    | Set        |
//! |------|---------------------------|------------|
//! | 1    | `keyboard_input_system`   | `Simulate` |
//! | 2    | `ship_control_system`     | `Simulate` |
//! | 3    | `ship_wrap_system`        | `Simulate` |
//! | 4    | `asteroid_drift_system`   | `Simulate` |
//! | 5    | `regenerate_field_system` | `Simulate` |
//! | 6    | `render_world_system`     | `Present`  |
//! | 7    | `debug_readout_system`    | `Present`  |
//!
//! Rapier integrates the ship between frames using the force, damping and
//! spin written in step 2; `ship_speed_limit_system` then re-clamps its speed
//! in `PostUpdate`.

use crate::asteroid::{populate_field, Asteroid};
use crate::config::{load_game_config, GameConfig};
use crate::graphics::{fit_window_to_config, setup_camera};
use crate::player::{
    keyboard_input_system, ship_control_system, ship_speed_limit_system, ship_wrap_system,
    spawn_ship, DirectionalInput, Ship,
};
use crate::rendering::{debug_readout_system, render_world_system, setup_hud};
use bevy::prelude::*;
use bevy_rapier2d::prelude::PhysicsSet;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// RNG used for every asteroid field.  Seeded once at startup.
#[derive(Resource)]
pub struct FieldRng(pub StdRng);

/// System sets for the per-frame chain.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum WorldLoopSet {
    /// Input, ship, asteroids, regeneration.
    Simulate,
    /// Gizmo drawing and HUD text; needs a renderer.
    Present,
}

/// Registers the whole game loop.
pub struct WorldLoopPlugin {
    /// Read `assets/void_miner.toml` at startup.
    pub load_config: bool,
    /// Camera, HUD, gizmo rendering and the debug readout.
    pub presentation: bool,
}

impl Default for WorldLoopPlugin {
    fn default() -> Self {
        Self {
            load_config: true,
            presentation: true,
        }
    }
}

impl WorldLoopPlugin {
    /// Simulation only, with the `GameConfig` already in the world left as-is.
    /// Runs under `MinimalPlugins`.
    pub fn headless() -> Self {
        Self {
            load_config: false,
            presentation: false,
        }
    }
}

impl Plugin for WorldLoopPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameConfig>()
            .init_resource::<DirectionalInput>()
            .init_resource::<ButtonInput<KeyCode>>();

        if self.load_config {
            app.add_systems(Startup, load_game_config.before(init_field_rng));
        }
        app.add_systems(
            Startup,
            (init_field_rng, spawn_ship, spawn_initial_field).chain(),
        );

        app.configure_sets(Update, (WorldLoopSet::Simulate, WorldLoopSet::Present).chain())
            .add_systems(
                Update,
                (
                    keyboard_input_system,
                    ship_control_system,
                    ship_wrap_system,
                    crate::asteroid::asteroid_drift_system,
                    regenerate_field_system,
                )
                    .chain()
                    .in_set(WorldLoopSet::Simulate),
            )
            .add_systems(
                PostUpdate,
                ship_speed_limit_system.after(PhysicsSet::Writeback),
            );

        if self.presentation {
            app.add_systems(
                Startup,
                (fit_window_to_config, setup_camera, setup_hud)
                    .chain()
                    .after(init_field_rng)
                    .before(spawn_ship),
            )
            .add_systems(
                Update,
                (render_world_system, debug_readout_system)
                    .chain()
                    .in_set(WorldLoopSet::Present),
            );
        }
    }
}

// ── Startup ───────────────────────────────────────────────────────────────────

/// Seed [`FieldRng`] from `world.seed`, or from OS entropy when unset.
pub fn init_field_rng(mut commands: Commands, config: Res<GameConfig>) {
    let rng = match config.world.seed {
        Some(seed) => {
            info!("Asteroid field seed: {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };
    commands.insert_resource(FieldRng(rng));
}

/// Current ship position, or the field centre if there is no ship.
fn reference_point(q_ship: &Query<&Transform, With<Ship>>, config: &GameConfig) -> Vec2 {
    q_ship
        .single()
        .map(|t| t.translation.truncate())
        .unwrap_or_else(|_| config.field_center())
}

/// Spawn the initial asteroid field away from the ship.
///
/// Skipped (with an error log) when [`FieldRng`] is missing or the factory
/// rejects the configuration.
pub fn spawn_initial_field(
    mut commands: Commands,
    config: Res<GameConfig>,
    rng: Option<ResMut<FieldRng>>,
    q_ship: Query<&Transform, With<Ship>>,
) {
    let Some(mut rng) = rng else {
        error!("No field RNG available; skipping asteroid generation");
        return;
    };
    let reference = reference_point(&q_ship, &config);
    match populate_field(&mut commands, &mut rng.0, reference, &config) {
        Ok(count) => info!("Spawned {count} asteroids"),
        Err(e) => error!("Asteroid generation skipped: {e}"),
    }
}

// ── Update ────────────────────────────────────────────────────────────────────

/// **R**: despawn every asteroid and generate a fresh field away from the ship.
pub fn regenerate_field_system(
    mut commands: Commands,
    keys: Res<ButtonInput<KeyCode>>,
    config: Res<GameConfig>,
    rng: Option<ResMut<FieldRng>>,
    q_asteroids: Query<Entity, With<Asteroid>>,
    q_ship: Query<&Transform, With<Ship>>,
) {
    if !keys.just_pressed(KeyCode::KeyR) {
        return;
    }
    let Some(mut rng) = rng else {
        error!("No field RNG available; cannot regenerate asteroids");
        return;
    };

    for entity in q_asteroids.iter() {
        commands.entity(entity).despawn();
    }

    let reference = reference_point(&q_ship, &config);
    match populate_field(&mut commands, &mut rng.0, reference, &config) {
        Ok(count) => info!("Regenerated field with {count} asteroids"),
        Err(e) => error!("Asteroid regeneration skipped: {e}"),
    }
}
