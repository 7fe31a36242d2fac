//! Ship components, the input snapshot, and the auto-stabilization state machine.
//!
//! The controller is plain data plus pure methods, so every transition can be
//! exercised without an ECS world.  [`super::control`] feeds it the frame's
//! input and the integrator's velocity, and writes the returned
//! [`ShipCommand`] back to Rapier.

use crate::config::ShipConfig;
use bevy::prelude::*;

// ── Input ─────────────────────────────────────────────────────────────────────

/// Directional input sampled once per frame.
///
/// Written by `keyboard_input_system`; read by every system that needs to know
/// what the player is pressing this frame, so rotation, thrust and the flame
/// drawing all agree.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionalInput {
    /// Thrust.
    pub up: bool,
    /// Unused by the movement model; sampled for completeness.
    pub down: bool,
    /// Rotate counter-clockwise.
    pub left: bool,
    /// Rotate clockwise.
    pub right: bool,
}

// ── Components ────────────────────────────────────────────────────────────────

/// Marker component for the player ship entity.
#[derive(Component, Debug, Clone, Copy)]
pub struct Ship;

impl Ship {
    /// Axis-aligned collision bounds of a ship of radius `size` at `center`.
    pub fn bounds(center: Vec2, size: f32) -> Rect {
        Rect::from_center_size(center, Vec2::splat(size * 2.0))
    }
}

/// Thrust / braking state.  Rotation is orthogonal and not tracked here.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum ThrustState {
    #[default]
    Idle,
    /// Thrust key held this frame.
    Thrusting,
    /// Auto-brake active.  `remaining_ms` counts down by frame time and may dip
    /// to or below zero for one frame before the state expires.
    Stabilizing { remaining_ms: f32 },
}

/// What the controller asks of the integrator this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShipCommand {
    /// Linear acceleration (u/s²).
    pub acceleration: Vec2,
    /// Angular velocity (rad/s); zero when no rotation key is held.
    pub angular_velocity: f32,
}

/// Ship controller: turns input into acceleration, and brakes the ship
/// automatically after thrust is released.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct ShipController {
    pub state: ThrustState,
    /// Acceleration commanded in the most recent frame.
    pub acceleration: Vec2,
    /// Angular velocity commanded in the most recent frame.
    pub angular_velocity: f32,
}

impl ShipController {
    pub fn is_stabilizing(&self) -> bool {
        matches!(self.state, ThrustState::Stabilizing { .. })
    }

    /// Remaining stabilization time (ms); 0 when not stabilizing.
    pub fn stabilization_timer_ms(&self) -> f32 {
        match self.state {
            ThrustState::Stabilizing { remaining_ms } => remaining_ms,
            _ => 0.0,
        }
    }

    /// Whether the stabilizer thrusters are firing (stabilizing with time left).
    pub fn stabilizer_firing(&self) -> bool {
        self.stabilization_timer_ms() > 0.0
    }

    /// Interpret the frame's input.
    ///
    /// - Left / right set a fixed angular velocity (left wins when both are
    ///   held); no rotation key zeroes it.
    /// - Thrust accelerates along `heading` and cancels any stabilization.
    /// - Releasing thrust zeroes acceleration and, if the ship is faster than
    ///   the engage speed, arms the stabilizer for its full duration.
    pub fn handle_input(
        &mut self,
        input: &DirectionalInput,
        heading: f32,
        velocity: Vec2,
        config: &ShipConfig,
    ) {
        self.angular_velocity = if input.left {
            config.rotation_speed
        } else if input.right {
            -config.rotation_speed
        } else {
            0.0
        };

        if input.up {
            self.acceleration = Vec2::from_angle(heading) * config.acceleration;
            self.state = ThrustState::Thrusting;
            return;
        }

        self.acceleration = Vec2::ZERO;
        if self.is_stabilizing() {
            return;
        }
        self.state = if velocity.length() > config.stabilization_engage_speed {
            ThrustState::Stabilizing {
                remaining_ms: config.stabilization_duration_ms,
            }
        } else {
            ThrustState::Idle
        };
    }

    /// Advance the stabilizer by `delta_ms`.
    ///
    /// While time remains, the countdown is decremented and either braking is
    /// declared complete (speed below the release speed) or a counter-thrust of
    /// `acceleration × power` is applied against the velocity.  Once the
    /// countdown has run out the state returns to idle with zero acceleration,
    /// leaving whatever velocity is left.
    pub fn stabilize(&mut self, delta_ms: f32, velocity: Vec2, config: &ShipConfig) {
        let ThrustState::Stabilizing { remaining_ms } = self.state else {
            return;
        };

        if remaining_ms <= 0.0 {
            self.state = ThrustState::Idle;
            self.acceleration = Vec2::ZERO;
            return;
        }

        self.state = ThrustState::Stabilizing {
            remaining_ms: remaining_ms - delta_ms,
        };

        let speed = velocity.length();
        if speed < config.stabilization_release_speed {
            self.state = ThrustState::Idle;
            return;
        }

        self.acceleration =
            -(velocity / speed) * config.acceleration * config.stabilization_power;
    }

    /// Run one full controller tick: input first, then the stabilizer.
    pub fn step(
        &mut self,
        delta_ms: f32,
        input: &DirectionalInput,
        heading: f32,
        velocity: Vec2,
        config: &ShipConfig,
    ) -> ShipCommand {
        self.handle_input(input, heading, velocity, config);
        self.stabilize(delta_ms, velocity, config);
        self.command()
    }

    pub fn command(&self) -> ShipCommand {
        ShipCommand {
            acceleration: self.acceleration,
            angular_velocity: self.angular_velocity,
        }
    }
}
