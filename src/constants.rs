//! Centralised gameplay constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place.  [`crate::config::GameConfig`] mirrors every value
//! and uses these as its compiled defaults; `assets/void_miner.toml` can
//! override any subset at startup.

// ── Display ───────────────────────────────────────────────────────────────────

/// Width of the playfield (world units).  The camera is centred on the field,
/// so one world unit maps to one window pixel at the default resolution.
pub const GAME_WIDTH: f32 = 800.0;

/// Height of the playfield (world units).
pub const GAME_HEIGHT: f32 = 600.0;

/// Clear colour behind the field.
pub const BACKGROUND_COLOR: u32 = 0x000000;

// ── Ship: Movement ────────────────────────────────────────────────────────────

/// Thrust acceleration (u/s²) while the thrust key is held.
pub const SHIP_ACCELERATION: f32 = 200.0;

/// Velocity magnitude (u/s) the ship is clamped to every frame.
pub const SHIP_MAX_SPEED: f32 = 300.0;

/// Fixed angular velocity (rad/s) applied while a rotation key is held.
pub const SHIP_ROTATION_SPEED: f32 = 3.0;

/// Ship collision radius and drawing scale (u).
pub const SHIP_SIZE: f32 = 15.0;

/// Fraction of velocity the ship keeps per 60 Hz frame when coasting.
///
/// Converted to a Rapier linear damping coefficient by
/// [`crate::player::friction_to_damping`].  1.0 disables friction entirely.
pub const SHIP_FRICTION: f32 = 0.98;

/// Rapier mass assigned to the ship collider.  Kept at 1.0 so that an
/// `ExternalForce` equals the commanded acceleration.
pub const SHIP_MASS: f32 = 1.0;

/// Frame rate that [`SHIP_FRICTION`] and [`ASTEROID_SPIN_RATE`] were tuned at.
pub const REFERENCE_FRAME_RATE: f32 = 60.0;

// ── Ship: Auto-stabilization ──────────────────────────────────────────────────

/// How long (ms) the stabilizer brakes after thrust is released.
pub const STABILIZATION_DURATION_MS: f32 = 1500.0;

/// Braking acceleration as a fraction of [`SHIP_ACCELERATION`].
pub const STABILIZATION_POWER: f32 = 0.3;

/// Speed (u/s) above which releasing thrust engages the stabilizer.
pub const STABILIZATION_ENGAGE_SPEED: f32 = 20.0;

/// Speed (u/s) below which the stabilizer considers braking complete.
pub const STABILIZATION_RELEASE_SPEED: f32 = 10.0;

// ── Asteroids ─────────────────────────────────────────────────────────────────

/// Smallest asteroid radius (u).
pub const ASTEROID_MIN_SIZE: f32 = 20.0;

/// Largest asteroid radius (u).
pub const ASTEROID_MAX_SIZE: f32 = 60.0;

/// Slowest asteroid drift speed (u/s).
pub const ASTEROID_MIN_SPEED: f32 = 20.0;

/// Fastest asteroid drift speed (u/s).
pub const ASTEROID_MAX_SPEED: f32 = 100.0;

/// Rotation (rad/s) contributed by one unit of asteroid spin.
///
/// Spin is drawn from [-1, 1]; at 0.6 a full-spin asteroid turns 0.01 rad per
/// 60 Hz frame.
pub const ASTEROID_SPIN_RATE: f32 = 0.6;

/// Impact speed at which an asteroid would break apart.  Reserved.
pub const ASTEROID_BREAK_SPEED: f32 = 50.0;

/// Fragment count range when an asteroid breaks.  Reserved.
pub const ASTEROID_MIN_FRAGMENTS: u32 = 2;
pub const ASTEROID_MAX_FRAGMENTS: u32 = 4;

/// Vertex count range for a generated asteroid silhouette (inclusive).
pub const ASTEROID_MIN_VERTICES: usize = 5;
pub const ASTEROID_MAX_VERTICES: usize = 8;

/// Maximum angular jitter (rad) applied to each silhouette vertex.
pub const ASTEROID_VERTEX_ANGLE_JITTER: f32 = 0.3;

/// Inner bound of the per-vertex radius factor; the outer bound is 1.0.
pub const ASTEROID_VERTEX_MIN_RADIUS_FACTOR: f32 = 0.7;

// ── Bullets (reserved) ────────────────────────────────────────────────────────

pub const BULLET_SPEED: f32 = 400.0;
pub const BULLET_LIFETIME_MS: f32 = 2000.0;
pub const BULLET_SIZE: f32 = 3.0;

// ── Materials ─────────────────────────────────────────────────────────────────

pub const IRON_COLOR: u32 = 0x808080;
pub const IRON_VALUE: u32 = 1;
/// 60 % of asteroids.
pub const IRON_RARITY: f64 = 0.6;

pub const CRYSTAL_COLOR: u32 = 0x00FFFF;
pub const CRYSTAL_VALUE: u32 = 3;
/// 30 % of asteroids.
pub const CRYSTAL_RARITY: f64 = 0.3;

pub const GOLD_COLOR: u32 = 0xFFD700;
pub const GOLD_VALUE: u32 = 10;
/// 9 % of asteroids.
pub const GOLD_RARITY: f64 = 0.09;

pub const ENERGY_COLOR: u32 = 0xFF00FF;
pub const ENERGY_VALUE: u32 = 50;
/// 1 % of asteroids; very rare.
pub const ENERGY_RARITY: f64 = 0.01;

/// Allowed deviation of the summed rarity weights from 1.0 before the config
/// validator reports it.
pub const RARITY_SUM_TOLERANCE: f64 = 1e-3;

// ── Touch controls (reserved) ─────────────────────────────────────────────────

pub const TOUCH_JOYSTICK_RADIUS: f32 = 60.0;
pub const TOUCH_THRUST_BUTTON_SIZE: f32 = 80.0;
pub const TOUCH_DEAD_ZONE: f32 = 10.0;

// ── World ─────────────────────────────────────────────────────────────────────

/// Off-screen buffer (u) an entity travels past an edge before it wraps.
pub const WRAP_PADDING: f32 = 50.0;

/// Number of asteroids generated per field.
pub const INITIAL_ASTEROIDS: usize = 8;

/// Minimum distance (u) between a freshly spawned asteroid and the player.
pub const ASTEROID_SPAWN_DISTANCE: f32 = 200.0;

/// Rejection-sampling budget for a single asteroid placement.
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 50;

// ── UI ────────────────────────────────────────────────────────────────────────

/// Green terminal text.
pub const UI_TEXT_COLOR: u32 = 0x00FF00;
/// Red for warnings and the debug readout.
pub const UI_WARNING_COLOR: u32 = 0xFF0000;
/// Yellow for success messages.
pub const UI_SUCCESS_COLOR: u32 = 0xFFFF00;
