//! Ship drawing: triangle hull, main-engine flames, and stabilizer jets.
//!
//! ## Layers (drawn in this order)
//!
//! | Layer            | Condition                         | Colour      |
//! |------------------|-----------------------------------|-------------|
//! | Hull triangle    | always                            | green       |
//! | Main flames      | thrust key held                   | orange      |
//! | Stabilizer jets  | stabilizing with time remaining   | blue        |

use crate::material::hex_color;
use crate::rendering::Surface;
use bevy::prelude::*;
use std::f32::consts::TAU;

const HULL_COLOR: u32 = 0x00FF00;
const MAIN_FLAME_COLOR: u32 = 0xFF4400;
const SIDE_FLAME_COLOR: u32 = 0xFF6600;
const NOSE_JET_COLOR: u32 = 0x00AAFF;
const WING_JET_COLOR: u32 = 0x44AAFF;

/// Wings sit at 70% of the nose radius.
const WING_RADIUS_FACTOR: f32 = 0.7;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Everything the ship drawing needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipPose {
    pub position: Vec2,
    /// Heading (rad); 0 points along +X.
    pub heading: f32,
    pub velocity: Vec2,
    pub thrusting: bool,
    pub stabilizer_firing: bool,
}

/// World-space hull `[nose, left wing, right wing]`.
///
/// The nose sits `size` ahead along the heading; the wings sit at
/// `0.7 × size`, 120° either side of the nose.
pub fn ship_outline(position: Vec2, heading: f32, size: f32) -> [Vec2; 3] {
    let third = TAU / 3.0;
    [
        position + Vec2::from_angle(heading) * size,
        position + Vec2::from_angle(heading + third) * size * WING_RADIUS_FACTOR,
        position + Vec2::from_angle(heading - third) * size * WING_RADIUS_FACTOR,
    ]
}

// ── Drawing ───────────────────────────────────────────────────────────────────

/// Draw the ship hull plus whichever thrusters are firing.
pub fn draw_ship<S: Surface + ?Sized>(surface: &mut S, pose: &ShipPose, size: f32) {
    let [nose, left, right] = ship_outline(pose.position, pose.heading, size);
    surface.stroke_polygon(&[nose, left, right], hex_color(HULL_COLOR), 3.0);

    if pose.thrusting {
        let aft = -Vec2::from_angle(pose.heading);
        let rear = (left + right) / 2.0;
        surface.line(rear, rear + aft * size * 2.0, hex_color(MAIN_FLAME_COLOR), 4.0);
        for wing in [left, right] {
            surface.line(wing, wing + aft * size * 1.7, hex_color(SIDE_FLAME_COLOR), 2.0);
        }
    }

    // Jets fire along the velocity, pushing back against it.
    if pose.stabilizer_firing {
        if let Some(dir) = pose.velocity.try_normalize() {
            surface.line(nose, nose + dir * size * 1.2, hex_color(NOSE_JET_COLOR), 4.0);
            for wing in [left, right] {
                surface.line(wing, wing + dir * size * 0.8, hex_color(WING_JET_COLOR), 2.0);
            }
        }
    }
}
