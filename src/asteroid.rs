//! Asteroid components, the procedural asteroid factory, and the drift system.
//!
//! Generation is split in two so the random parts stay testable without an
//! ECS world:
//!
//! 1. [`spawn_field`] draws a batch of [`AsteroidBlueprint`]s from any
//!    [`Rng`]: a placement away from the player, a size, a material, a spin, a
//!    jagged silhouette and a drift velocity.
//! 2. [`spawn_asteroid`] turns one blueprint into an entity.
//!
//! Asteroids move themselves: [`asteroid_drift_system`] advances rotation and
//! position every frame and applies the shared padded wrap.  Rapier only
//! follows the resulting `Transform` (kinematic body, sensor collider), so the
//! collision shape exists for queries but never pushes anything.

use crate::config::GameConfig;
use crate::constants::{
    ASTEROID_MAX_VERTICES, ASTEROID_MIN_VERTICES, ASTEROID_VERTEX_ANGLE_JITTER,
    ASTEROID_VERTEX_MIN_RADIUS_FACTOR, MAX_PLACEMENT_ATTEMPTS,
};
use crate::error::{validate_range, validate_world, GameResult};
use crate::material::{choose_material, Material, MaterialProperties};
use crate::wrap::WrapBounds;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

/// Z layer for asteroid transforms (ship sits above at 0.1).
const ASTEROID_Z: f32 = 0.05;

// ── Components ────────────────────────────────────────────────────────────────

/// Per-asteroid state.  Position lives in the entity's `Transform`.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Asteroid {
    /// Nominal radius (u); every silhouette vertex lies within `[0.7, 1.0]×size`.
    pub size: f32,
    pub material: Material,
    /// Colour / value / rarity copied from the table at spawn time.
    pub properties: MaterialProperties,
    /// Drift velocity (u/s).  Constant for the asteroid's whole life.
    pub velocity: Vec2,
    /// Spin in `[-1, 1]`; scaled by `asteroids.spin_rate` into rad/s.
    pub spin: f32,
    /// Current rotation angle (rad) applied to the silhouette.
    pub rotation: f32,
}

impl Asteroid {
    /// Advance one frame: rotate, drift, then wrap.  Returns the new centre.
    pub fn advance(
        &mut self,
        position: Vec2,
        dt_secs: f32,
        spin_rate: f32,
        bounds: &WrapBounds,
    ) -> Vec2 {
        self.rotation += self.spin * spin_rate * dt_secs;
        bounds.wrap(position + self.velocity * dt_secs)
    }

    /// Axis-aligned collision bounds around `center`.
    pub fn bounds(&self, center: Vec2) -> Rect {
        Rect::from_center_size(center, Vec2::splat(self.size * 2.0))
    }
}

/// Silhouette vertices in local space (relative to the asteroid centre,
/// unrotated).  Generated once at spawn and never regenerated.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Vertices(pub Vec<Vec2>);

impl Vertices {
    /// World-space outline for an asteroid centred at `center` and rotated by
    /// `rotation` radians.
    pub fn world_outline(&self, center: Vec2, rotation: f32) -> Vec<Vec2> {
        let rot = Vec2::from_angle(rotation);
        self.0.iter().map(|v| center + rot.rotate(*v)).collect()
    }
}

// ── Factory ───────────────────────────────────────────────────────────────────

/// Outcome of the spawn-position rejection sampler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Vec2,
    /// Number of positions drawn (1..=[`MAX_PLACEMENT_ATTEMPTS`]).
    pub attempts: u32,
    /// `false` when the attempt budget ran out and the last draw was accepted
    /// despite being within `min_distance` of the reference point.
    pub clear: bool,
}

/// Everything needed to spawn one asteroid.
#[derive(Debug, Clone, PartialEq)]
pub struct AsteroidBlueprint {
    pub placement: Placement,
    pub size: f32,
    pub material: Material,
    pub properties: MaterialProperties,
    pub velocity: Vec2,
    pub spin: f32,
    pub vertices: Vec<Vec2>,
}

/// Draw uniform positions in `[0, width] × [0, height]` until one is farther
/// than `min_distance` from `reference`.
///
/// Bounded: after [`MAX_PLACEMENT_ATTEMPTS`] draws the last position is
/// returned with `clear = false`.  Never loops forever.
pub fn sample_spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    reference: Vec2,
    min_distance: f32,
    width: f32,
    height: f32,
) -> Placement {
    let mut position = reference;
    for attempt in 1..=MAX_PLACEMENT_ATTEMPTS {
        position = Vec2::new(rng.gen_range(0.0..=width), rng.gen_range(0.0..=height));
        if position.distance(reference) > min_distance {
            return Placement {
                position,
                attempts: attempt,
                clear: true,
            };
        }
    }
    Placement {
        position,
        attempts: MAX_PLACEMENT_ATTEMPTS,
        clear: false,
    }
}

/// Generate a jagged polygon of 5–8 local-space vertices.
///
/// Vertex `i` of `n` sits at angle `i/n·2π` perturbed by up to ±0.3 rad, at a
/// radius of `size` scaled by a uniform factor in `[0.7, 1.0]`.
pub fn generate_silhouette<R: Rng + ?Sized>(rng: &mut R, size: f32) -> Vec<Vec2> {
    let count = rng.gen_range(ASTEROID_MIN_VERTICES..=ASTEROID_MAX_VERTICES);
    (0..count)
        .map(|i| {
            let angle = i as f32 / count as f32 * TAU;
            let radius = size * rng.gen_range(ASTEROID_VERTEX_MIN_RADIUS_FACTOR..=1.0);
            let jitter =
                rng.gen_range(-ASTEROID_VERTEX_ANGLE_JITTER..=ASTEROID_VERTEX_ANGLE_JITTER);
            Vec2::from_angle(angle + jitter) * radius
        })
        .collect()
}

/// Random drift velocity: uniform speed in `[min_speed, max_speed]`, uniform
/// heading in `[0, 2π)`.
pub fn random_drift<R: Rng + ?Sized>(rng: &mut R, min_speed: f32, max_speed: f32) -> Vec2 {
    let speed = rng.gen_range(min_speed..=max_speed);
    let heading = rng.gen_range(0.0..TAU);
    Vec2::from_angle(heading) * speed
}

/// Generate `count` asteroid blueprints for the configured field.
///
/// Each asteroid is placed away from `reference` (see
/// [`sample_spawn_position`]).  Returns an error instead of panicking when the
/// world or a configured range cannot be sampled.  Given the same RNG state the
/// output is identical.
pub fn spawn_field<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    reference: Vec2,
    min_distance: f32,
    config: &GameConfig,
) -> GameResult<Vec<AsteroidBlueprint>> {
    let width = config.display.width;
    let height = config.display.height;
    let rules = &config.asteroids;
    validate_world(width, height)?;
    validate_range("asteroids.size", rules.min_size, rules.max_size)?;
    validate_range("asteroids.speed", rules.min_speed, rules.max_speed)?;

    let mut field = Vec::with_capacity(count);
    for _ in 0..count {
        let placement = sample_spawn_position(rng, reference, min_distance, width, height);
        let size = rng.gen_range(rules.min_size..=rules.max_size);
        let material = choose_material(&config.materials, rng);
        let spin = rng.gen_range(-1.0..=1.0);
        let vertices = generate_silhouette(rng, size);
        let velocity = random_drift(rng, rules.min_speed, rules.max_speed);
        field.push(AsteroidBlueprint {
            placement,
            size,
            material,
            properties: config.materials.get(material),
            velocity,
            spin,
            vertices,
        });
    }
    Ok(field)
}

/// Spawn one asteroid entity from a blueprint.
///
/// Collision groups:
/// - `GROUP_1`: asteroids belong to this group
/// - intersects `GROUP_2` (the ship); sensors only, no contact response
pub fn spawn_asteroid(commands: &mut Commands, blueprint: AsteroidBlueprint) -> Entity {
    commands
        .spawn((
            Transform::from_translation(blueprint.placement.position.extend(ASTEROID_Z)),
            Visibility::default(),
            Asteroid {
                size: blueprint.size,
                material: blueprint.material,
                properties: blueprint.properties,
                velocity: blueprint.velocity,
                spin: blueprint.spin,
                rotation: 0.0,
            },
            Vertices(blueprint.vertices),
            RigidBody::KinematicPositionBased,
            Collider::ball(blueprint.size),
            Sensor,
            CollisionGroups::new(
                bevy_rapier2d::geometry::Group::GROUP_1,
                bevy_rapier2d::geometry::Group::GROUP_2,
            ),
            ActiveEvents::COLLISION_EVENTS,
        ))
        .id()
}

/// Generate and spawn a full field, logging (rather than failing on) any
/// placement that exhausted its attempt budget.  Returns the number spawned.
pub fn populate_field<R: Rng + ?Sized>(
    commands: &mut Commands,
    rng: &mut R,
    reference: Vec2,
    config: &GameConfig,
) -> GameResult<usize> {
    let field = spawn_field(
        rng,
        config.world.initial_asteroids,
        reference,
        config.world.asteroid_spawn_distance,
        config,
    )?;
    let spawned = field.len();
    for blueprint in field {
        if !blueprint.placement.clear {
            warn!(
                "Asteroid placed at {:?} within {} u of the player after {} attempts",
                blueprint.placement.position,
                config.world.asteroid_spawn_distance,
                blueprint.placement.attempts
            );
        }
        debug!(
            "{} asteroid of size {:.0} at {:?}",
            blueprint.material.label(),
            blueprint.size,
            blueprint.placement.position
        );
        spawn_asteroid(commands, blueprint);
    }
    Ok(spawned)
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Rotate, drift and wrap every asteroid.
///
/// Velocity is never modified: asteroids have no drag and no collision
/// response.
pub fn asteroid_drift_system(
    time: Res<Time>,
    config: Res<GameConfig>,
    mut query: Query<(&mut Transform, &mut Asteroid)>,
) {
    let dt = time.delta_secs();
    let bounds = WrapBounds::from_config(&config);
    for (mut transform, mut asteroid) in query.iter_mut() {
        let next = asteroid.advance(
            transform.translation.truncate(),
            dt,
            config.asteroids.spin_rate,
            &bounds,
        );
        transform.translation.x = next.x;
        transform.translation.y = next.y;
        transform.rotation = Quat::from_rotation_z(asteroid.rotation);
    }
}
