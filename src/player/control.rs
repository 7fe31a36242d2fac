//! Ship input and movement systems.
//!
//! ## Pipeline (runs in order every `Update` frame)
//!
//! 1. [`keyboard_input_system`]: samples arrows / WASD into [`DirectionalInput`].
//! 2. [`ship_control_system`]: clamps speed, ticks the [`ShipController`], and
//!    writes the resulting acceleration and spin to Rapier.
//! 3. [`ship_wrap_system`]: applies the padded screen wrap.
//!
//! [`ship_speed_limit_system`] runs in `PostUpdate` after Rapier's writeback
//! and re-clamps the integrated velocity.
//!
//! The input snapshot makes the movement logic fully testable: tests populate
//! `DirectionalInput` directly and run only `ship_control_system`.

use super::state::{DirectionalInput, Ship, ShipController};
use crate::config::GameConfig;
use crate::constants::{REFERENCE_FRAME_RATE, SHIP_MASS};
use crate::wrap::WrapBounds;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// Convert a per-frame velocity retention factor (e.g. `0.98` at 60 Hz) into a
/// Rapier linear damping coefficient with the same decay per second.
///
/// A retention of `1.0` (or more) means no friction.
pub fn friction_to_damping(retention: f32) -> f32 {
    if retention >= 1.0 {
        return 0.0;
    }
    -retention.max(f32::EPSILON).ln() * REFERENCE_FRAME_RATE
}

/// Linear damping for a frame with the given commanded acceleration.
///
/// Friction only acts while coasting: under thrust or stabilizer braking the
/// damping is zero, so full thrust can reach `max_speed`.
pub fn linear_damping_for(acceleration: Vec2, friction: f32) -> f32 {
    if acceleration == Vec2::ZERO {
        friction_to_damping(friction)
    } else {
        0.0
    }
}

// ── Step 1: Keyboard → input snapshot ─────────────────────────────────────────

/// Sample the directional keys into [`DirectionalInput`].
///
/// - **↑ / W** → `up` (thrust)
/// - **↓ / S** → `down`
/// - **← / A** → `left` (rotate CCW)
/// - **→ / D** → `right` (rotate CW)
pub fn keyboard_input_system(keys: Res<ButtonInput<KeyCode>>, mut input: ResMut<DirectionalInput>) {
    *input = DirectionalInput {
        up: keys.any_pressed([KeyCode::ArrowUp, KeyCode::KeyW]),
        down: keys.any_pressed([KeyCode::ArrowDown, KeyCode::KeyS]),
        left: keys.any_pressed([KeyCode::ArrowLeft, KeyCode::KeyA]),
        right: keys.any_pressed([KeyCode::ArrowRight, KeyCode::KeyD]),
    };
}

// ── Step 2: Controller → physics ──────────────────────────────────────────────

/// Drive the ship from the current [`DirectionalInput`].
///
/// This is the **only** system that writes the ship's force, damping and
/// spin.  The speed cap is applied to the integrator's velocity before the
/// controller reads it, so braking decisions see the clamped speed;
/// [`ship_speed_limit_system`] re-applies it after Rapier's step.
///
/// | Controller output    | Physics effect                               |
/// |----------------------|----------------------------------------------|
/// | `acceleration`       | `force = acceleration × SHIP_MASS`            |
/// | `acceleration ≠ 0`   | `linear_damping = 0`, else friction damping   |
/// | `angular_velocity`   | `velocity.angvel = angular_velocity`          |
pub fn ship_control_system(
    mut q: Query<
        (
            &Transform,
            &mut ExternalForce,
            &mut Velocity,
            &mut Damping,
            &mut ShipController,
        ),
        With<Ship>,
    >,
    input: Res<DirectionalInput>,
    config: Res<GameConfig>,
    time: Res<Time>,
) {
    let Ok((transform, mut force, mut velocity, mut damping, mut controller)) = q.single_mut()
    else {
        return;
    };

    velocity.linvel = velocity.linvel.clamp_length_max(config.ship.max_speed);

    let heading = transform.rotation.to_euler(EulerRot::ZYX).0;
    let command = controller.step(
        time.delta_secs() * 1000.0,
        &input,
        heading,
        velocity.linvel,
        &config.ship,
    );

    force.force = command.acceleration * SHIP_MASS;
    force.torque = 0.0;
    damping.linear_damping = linear_damping_for(command.acceleration, config.ship.friction);
    velocity.angvel = command.angular_velocity;
}

/// Clamp the ship's speed to `max_speed` once Rapier has written the step's
/// velocity back, so nothing downstream sees more than the cap.
pub fn ship_speed_limit_system(mut q: Query<&mut Velocity, With<Ship>>, config: Res<GameConfig>) {
    let Ok(mut velocity) = q.single_mut() else {
        return;
    };
    velocity.linvel = velocity.linvel.clamp_length_max(config.ship.max_speed);
}

// ── Step 3: Wrap ──────────────────────────────────────────────────────────────

/// Teleport the ship to the opposite padded edge once it leaves the field.
pub fn ship_wrap_system(mut q: Query<&mut Transform, With<Ship>>, config: Res<GameConfig>) {
    let Ok(mut transform) = q.single_mut() else {
        return;
    };
    let bounds = WrapBounds::from_config(&config);
    let wrapped = bounds.wrap(transform.translation.truncate());
    transform.translation.x = wrapped.x;
    transform.translation.y = wrapped.y;
}

// ── Unit tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;

    // ── helpers ───────────────────────────────────────────────────────────────

    /// Minimal app with just the resources the control systems read; no
    /// window, renderer or physics.
    fn build_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(DirectionalInput::default());
        app.insert_resource(GameConfig::default());
        app
    }

    fn spawn_test_ship(app: &mut App, linvel: Vec2, controller: ShipController) -> Entity {
        app.world_mut()
            .spawn((
                Ship,
                controller,
                Transform::from_xyz(400.0, 300.0, 0.1), // heading 0 → +X
                ExternalForce::default(),
                Velocity::linear(linvel),
                Damping {
                    linear_damping: friction_to_damping(SHIP_FRICTION),
                    angular_damping: 0.0,
                },
            ))
            .id()
    }

    fn run_control(app: &mut App, input: DirectionalInput) {
        app.insert_resource(input);
        app.add_systems(Update, ship_control_system);
        app.update();
    }

    // ── friction_to_damping ───────────────────────────────────────────────────

    #[test]
    fn full_retention_means_no_damping() {
        assert_eq!(friction_to_damping(1.0), 0.0);
    }

    #[test]
    fn damping_reproduces_per_frame_retention_over_a_second() {
        let d = friction_to_damping(SHIP_FRICTION);
        let per_second = (-d).exp();
        let expected = SHIP_FRICTION.powf(REFERENCE_FRAME_RATE);
        assert!(
            (per_second - expected).abs() < 1e-4,
            "exp(-{d}) = {per_second}, expected {expected}"
        );
    }

    // ── keyboard_input_system ─────────────────────────────────────────────────

    #[test]
    fn arrows_and_wasd_both_map_to_directions() {
        let mut app = build_test_app();
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::ArrowUp);
        keys.press(KeyCode::KeyA);
        app.insert_resource(keys);
        app.add_systems(Update, keyboard_input_system);
        app.update();

        let input = *app.world().resource::<DirectionalInput>();
        assert_eq!(
            input,
            DirectionalInput {
                up: true,
                down: false,
                left: true,
                right: false,
            }
        );
    }

    // ── ship_control_system ───────────────────────────────────────────────────

    #[test]
    fn thrust_sets_force_along_heading() {
        let mut app = build_test_app();
        let ship = spawn_test_ship(&mut app, Vec2::ZERO, ShipController::default());
        run_control(
            &mut app,
            DirectionalInput {
                up: true,
                ..Default::default()
            },
        );

        let force = app.world().get::<ExternalForce>(ship).unwrap();
        assert!((force.force - Vec2::new(SHIP_ACCELERATION * SHIP_MASS, 0.0)).length() < 1e-3);
        assert_eq!(force.torque, 0.0);
    }

    #[test]
    fn rotation_key_sets_angular_velocity() {
        let mut app = build_test_app();
        let ship = spawn_test_ship(&mut app, Vec2::ZERO, ShipController::default());
        run_control(
            &mut app,
            DirectionalInput {
                right: true,
                ..Default::default()
            },
        );

        let velocity = app.world().get::<Velocity>(ship).unwrap();
        assert_eq!(velocity.angvel, -SHIP_ROTATION_SPEED);
    }

    #[test]
    fn speed_is_clamped_to_max() {
        let mut app = build_test_app();
        let ship = spawn_test_ship(&mut app, Vec2::new(500.0, 0.0), ShipController::default());
        run_control(&mut app, DirectionalInput::default());

        let velocity = app.world().get::<Velocity>(ship).unwrap();
        assert!((velocity.linvel.length() - SHIP_MAX_SPEED).abs() < 1e-3);
    }

    #[test]
    fn releasing_thrust_at_speed_brakes_against_motion() {
        let mut app = build_test_app();
        let ship = spawn_test_ship(
            &mut app,
            Vec2::new(0.0, 50.0),
            ShipController {
                state: crate::player::state::ThrustState::Thrusting,
                ..Default::default()
            },
        );
        run_control(&mut app, DirectionalInput::default());

        let controller = app.world().get::<ShipController>(ship).unwrap();
        assert!(controller.is_stabilizing());
        let force = app.world().get::<ExternalForce>(ship).unwrap();
        let expected = Vec2::new(0.0, -SHIP_ACCELERATION * STABILIZATION_POWER) * SHIP_MASS;
        assert!(
            (force.force - expected).length() < 1e-3,
            "expected {expected:?}, got {:?}",
            force.force
        );
    }

    #[test]
    fn friction_is_off_under_thrust_and_back_when_coasting() {
        let mut app = build_test_app();
        let ship = spawn_test_ship(&mut app, Vec2::ZERO, ShipController::default());
        run_control(
            &mut app,
            DirectionalInput {
                up: true,
                ..Default::default()
            },
        );
        assert_eq!(app.world().get::<Damping>(ship).unwrap().linear_damping, 0.0);

        // Slow ship, no input: idle, coasting friction restored.
        app.insert_resource(DirectionalInput::default());
        app.update();
        assert_eq!(
            app.world().get::<Damping>(ship).unwrap().linear_damping,
            friction_to_damping(SHIP_FRICTION)
        );
    }

    #[test]
    fn sustained_thrust_reaches_max_speed() {
        // Rapier's damping integrates as v *= 1 / (1 + dt·d) per step.
        let dt = 1.0 / REFERENCE_FRAME_RATE;
        let mut speed: f32 = 0.0;
        for _ in 0..(3.0 * REFERENCE_FRAME_RATE) as usize {
            let accel = Vec2::new(SHIP_ACCELERATION, 0.0);
            let d = linear_damping_for(accel, SHIP_FRICTION);
            speed = ((speed + SHIP_ACCELERATION * dt) / (1.0 + dt * d)).min(SHIP_MAX_SPEED);
        }
        assert_eq!(speed, SHIP_MAX_SPEED);
    }

    #[test]
    fn speed_limit_applies_after_the_physics_step() {
        let mut app = build_test_app();
        let ship = spawn_test_ship(&mut app, Vec2::new(0.0, -310.0), ShipController::default());
        app.add_systems(Update, ship_speed_limit_system);
        app.update();

        let velocity = app.world().get::<Velocity>(ship).unwrap();
        assert!((velocity.linvel - Vec2::new(0.0, -SHIP_MAX_SPEED)).length() < 1e-3);
    }

    #[test]
    fn no_ship_is_a_no_op() {
        let mut app = build_test_app();
        run_control(&mut app, DirectionalInput::default());
    }

    // ── ship_wrap_system ──────────────────────────────────────────────────────

    #[test]
    fn ship_wraps_past_the_padded_edge() {
        let mut app = build_test_app();
        let ship = app
            .world_mut()
            .spawn((Ship, Transform::from_xyz(300.0, -WRAP_PADDING - 1.0, 0.1)))
            .id();
        app.add_systems(Update, ship_wrap_system);
        app.update();

        let t = app.world().get::<Transform>(ship).unwrap();
        assert_eq!(t.translation.x, 300.0);
        assert_eq!(t.translation.y, GAME_HEIGHT + WRAP_PADDING);
        assert_eq!(t.translation.z, 0.1);
    }
}
