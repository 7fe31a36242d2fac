//! Rendering: the draw-surface abstraction, asteroid drawing, the per-frame
//! world render, and the HUD.
//!
//! ## Layer Model
//!
//! | Layer              | Technology | Drawn by                 |
//! |--------------------|------------|--------------------------|
//! | Asteroid outlines  | Gizmos     | [`draw_asteroid`]        |
//! | Material decoration| Gizmos     | [`draw_asteroid`]        |
//! | Ship + thrusters   | Gizmos     | [`crate::player::draw_ship`] |
//! | Title / controls   | Bevy UI    | [`setup_hud`]            |
//! | Debug readout      | Bevy UI    | [`debug_readout_system`] |
//!
//! ## System Responsibilities
//!
//! | System                  | Schedule | Purpose                               |
//! |-------------------------|----------|---------------------------------------|
//! | `setup_hud`             | Startup  | Spawn title, controls hint and readout |
//! | `render_world_system`   | Update   | Asteroids first, ship on top          |
//! | `debug_readout_system`  | Update   | Refresh speed / stabilizer text       |
//!
//! Everything that draws goes through [`Surface`], so draw order and
//! decorations can be checked against a recording [`DrawList`] without a
//! renderer.

use crate::asteroid::{Asteroid, Vertices};
use crate::config::GameConfig;
use crate::material::{blend_hex, hex_color, Material};
use crate::player::{draw_ship, DirectionalInput, Ship, ShipController, ShipPose};
use bevy::prelude::*;
use bevy_rapier2d::prelude::Velocity;

// ── Surface ───────────────────────────────────────────────────────────────────

/// Immediate-mode drawing target.
///
/// `width` is a line width hint in pixels; backends that cannot vary line
/// width ignore it.
pub trait Surface {
    /// Closed outline through `points`.
    fn stroke_polygon(&mut self, points: &[Vec2], color: Color, width: f32);
    fn line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, width: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
}

impl Surface for Gizmos<'_, '_> {
    fn stroke_polygon(&mut self, points: &[Vec2], color: Color, _width: f32) {
        let closing = points.first().copied();
        self.linestrip_2d(points.iter().copied().chain(closing), color);
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Color, _width: f32) {
        self.line_2d(from, to, color);
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, _width: f32) {
        self.circle_2d(center, radius, color);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        // Gizmos only stroke; small discs are filled with concentric rings.
        let mut r = radius;
        while r > 0.0 {
            self.circle_2d(center, r, color);
            r -= 0.5;
        }
    }
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Polygon {
        points: Vec<Vec2>,
        color: Color,
        width: f32,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        width: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
        width: f32,
    },
    Disc {
        center: Vec2,
        radius: f32,
        color: Color,
    },
}

/// A [`Surface`] that records calls in order instead of drawing them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList(pub Vec<DrawCall>);

impl Surface for DrawList {
    fn stroke_polygon(&mut self, points: &[Vec2], color: Color, width: f32) {
        self.0.push(DrawCall::Polygon {
            points: points.to_vec(),
            color,
            width,
        });
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32) {
        self.0.push(DrawCall::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, width: f32) {
        self.0.push(DrawCall::Circle {
            center,
            radius,
            color,
            width,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.0.push(DrawCall::Disc {
            center,
            radius,
            color,
        });
    }
}

// ── Asteroids ─────────────────────────────────────────────────────────────────

/// Outline width for an asteroid of the given size: one pixel per 15 u of
/// radius, at least one.
pub fn asteroid_line_width(size: f32) -> f32 {
    (size / 15.0).floor().max(1.0)
}

/// Pulse phase in `[0, 1]` for energy asteroids at `time_ms`.
///
/// The phase is taken in f64 so it keeps advancing frame to frame in long
/// sessions.
pub fn energy_pulse(time_ms: f64) -> f32 {
    (((time_ms * 0.005).sin() + 1.0) * 0.5) as f32
}

/// Draw one asteroid: the rotated silhouette in its material colour, then the
/// material's decoration.
pub fn draw_asteroid<S: Surface + ?Sized>(
    surface: &mut S,
    center: Vec2,
    asteroid: &Asteroid,
    vertices: &Vertices,
    time_ms: f64,
) {
    let outline = vertices.world_outline(center, asteroid.rotation);
    let rgb = asteroid.properties.color;
    let color = hex_color(rgb);
    surface.stroke_polygon(&outline, color, asteroid_line_width(asteroid.size));

    match asteroid.material {
        Material::Iron => {}
        Material::Crystal => {
            let spoke = color.with_alpha(0.5);
            for vertex in outline.iter().step_by(2) {
                surface.line(center, *vertex, spoke, 1.0);
            }
        }
        Material::Gold => {
            let dot = color.with_alpha(0.8);
            for i in 0..3 {
                let offset =
                    Vec2::from_angle(asteroid.rotation + i as f32 * 2.0) * asteroid.size * 0.3;
                surface.fill_circle(center + offset, 2.0, dot);
            }
        }
        Material::Energy => {
            let p = energy_pulse(time_ms);
            surface.stroke_circle(
                center,
                asteroid.size * (0.8 + 0.3 * p),
                hex_color(blend_hex(0x000000, rgb, p)),
                2.0,
            );
        }
    }
}

/// Draw a whole frame: every asteroid, then the ship on top.
pub fn draw_frame<'a, S, I>(
    surface: &mut S,
    asteroids: I,
    ship: Option<&ShipPose>,
    ship_size: f32,
    time_ms: f64,
) where
    S: Surface + ?Sized,
    I: IntoIterator<Item = (Vec2, &'a Asteroid, &'a Vertices)>,
{
    for (center, asteroid, vertices) in asteroids {
        draw_asteroid(surface, center, asteroid, vertices, time_ms);
    }
    if let Some(pose) = ship {
        draw_ship(surface, pose, ship_size);
    }
}

/// Draw the world through Bevy gizmos.
pub fn render_world_system(
    mut gizmos: Gizmos,
    time: Res<Time>,
    config: Res<GameConfig>,
    input: Res<DirectionalInput>,
    q_asteroids: Query<(&Transform, &Asteroid, &Vertices)>,
    q_ship: Query<(&Transform, &Velocity, &ShipController), With<Ship>>,
) {
    let pose = q_ship
        .single()
        .ok()
        .map(|(transform, velocity, controller)| ShipPose {
            position: transform.translation.truncate(),
            heading: transform.rotation.to_euler(EulerRot::ZYX).0,
            velocity: velocity.linvel,
            thrusting: input.up,
            stabilizer_firing: controller.stabilizer_firing(),
        });

    draw_frame(
        &mut gizmos,
        q_asteroids
            .iter()
            .map(|(t, a, v)| (t.translation.truncate(), a, v)),
        pose.as_ref(),
        config.ship.size,
        time.elapsed_secs_f64() * 1000.0,
    );
}

// ── HUD ───────────────────────────────────────────────────────────────────────

/// Marker for the debug readout text.
#[derive(Component, Debug, Clone, Copy)]
pub struct DebugReadout;

/// Spawn the title, the controls hint and the (initially empty) debug readout.
pub fn setup_hud(mut commands: Commands, config: Res<GameConfig>) {
    let height = config.display.height;
    let text_color = hex_color(config.ui.text_color);

    commands.spawn((
        Text::new("Void Miner v0.2"),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(text_color),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(10.0),
            top: Val::Px(10.0),
            ..default()
        },
    ));

    commands.spawn((
        Text::new("Arrow Keys / WASD: Rotate + Thrust | R: New Field"),
        TextFont {
            font_size: 12.0,
            ..default()
        },
        TextColor(text_color),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(10.0),
            top: Val::Px(height - 50.0),
            ..default()
        },
    ));

    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 10.0,
            ..default()
        },
        TextColor(hex_color(config.ui.warning_color)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(10.0),
            top: Val::Px(height - 30.0),
            ..default()
        },
        DebugReadout,
    ));

    info!("HUD spawned");
}

/// Format the debug readout line.
pub fn debug_line(speed: f32, stabilizing: bool, timer_ms: f32, asteroids: usize) -> String {
    format!(
        "Speed: {speed:.1} | Stabilizing: {stabilizing} | Timer: {:.1}s | Asteroids: {asteroids}",
        timer_ms / 1000.0
    )
}

/// Refresh the debug readout from the ship's velocity and controller.
pub fn debug_readout_system(
    q_ship: Query<(&Velocity, &ShipController), With<Ship>>,
    q_asteroids: Query<(), With<Asteroid>>,
    mut q_text: Query<&mut Text, With<DebugReadout>>,
) {
    let Ok((velocity, controller)) = q_ship.single() else {
        return;
    };
    let Ok(mut text) = q_text.single_mut() else {
        return;
    };
    text.0 = debug_line(
        velocity.linvel.length(),
        controller.is_stabilizing(),
        controller.stabilization_timer_ms(),
        q_asteroids.iter().count(),
    );
}
