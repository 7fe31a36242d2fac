//! Player module: ship entity, input handling, stabilizer, and drawing.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`state`] | `Ship` marker, `DirectionalInput` resource, `ShipController` state machine |
//! | [`control`] | Input systems: arrows / WASD sampling, controller → Rapier, screen wrap |
//! | [`rendering`] | Ship hull, engine flames and stabilizer jets |
//!
//! All public items are re-exported at this level so that the rest of the crate
//! can use flat `crate::player::*` imports without knowing the sub-module
//! layout.

pub mod control;
pub mod rendering;
pub mod state;

// ── Flat re-exports ───────────────────────────────────────────────────────────

pub use control::{
    friction_to_damping, keyboard_input_system, linear_damping_for, ship_control_system,
    ship_speed_limit_system, ship_wrap_system,
};
pub use rendering::{draw_ship, ship_outline, ShipPose};
pub use state::{DirectionalInput, Ship, ShipCommand, ShipController, ThrustState};

// ── Ship spawn ────────────────────────────────────────────────────────────────

use crate::config::GameConfig;
use crate::constants::SHIP_MASS;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// Z layer for the ship (above asteroids).
pub const SHIP_Z: f32 = 0.1;

/// Spawn the player's ship at the centre of the field, facing +X, at rest.
///
/// Rapier integrates position, velocity and heading.  Mass is pinned to
/// [`SHIP_MASS`] so a force equals the controller's acceleration, and the
/// per-frame friction retention is converted to linear damping.
///
/// Collision groups:
/// - `GROUP_2`: ship belongs to this group
/// - collides with `GROUP_1` (asteroids) only
pub fn spawn_ship(mut commands: Commands, config: Res<GameConfig>) {
    let center = config.field_center();
    commands.spawn((
        Ship,
        ShipController::default(),
        // Physics
        RigidBody::Dynamic,
        Collider::ball(config.ship.size),
        ColliderMassProperties::Mass(SHIP_MASS),
        Velocity::zero(),
        ExternalForce::default(),
        Damping {
            linear_damping: friction_to_damping(config.ship.friction),
            angular_damping: 0.0,
        },
        Sleeping::disabled(),
        CollisionGroups::new(
            bevy_rapier2d::geometry::Group::GROUP_2,
            bevy_rapier2d::geometry::Group::GROUP_1,
        ),
        ActiveEvents::COLLISION_EVENTS,
        // Transform / visibility
        Transform::from_translation(center.extend(SHIP_Z)),
        Visibility::default(),
    ));

    info!("Ship spawned at {center}");
}
