//! Runtime game configuration loaded from `assets/void_miner.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_game_config`] reads
//! `assets/void_miner.toml` and overwrites the defaults with any values present
//! in the file.  Missing keys (and missing tables) fall back to the compile-time
//! defaults, so a minimal TOML can override just the values you care about:
//!
//! ```toml
//! [ship]
//! acceleration = 260.0
//!
//! [world]
//! initial_asteroids = 12
//! seed = 42
//! ```
//!
//! The configuration is read-only once the `Startup` schedule has finished; no
//! system mutates it afterwards.

use crate::constants::*;
use crate::error::{validate_range, validate_world, GameError, GameResult};
use crate::material::MaterialTable;
use bevy::prelude::*;
use serde::Deserialize;

/// Path of the optional override file, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/void_miner.toml";

/// Runtime-tunable gameplay configuration.
#[derive(Resource, Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub display: DisplayConfig,
    pub ship: ShipConfig,
    pub asteroids: AsteroidConfig,
    pub bullets: BulletConfig,
    pub materials: MaterialTable,
    pub touch: TouchConfig,
    pub world: WorldConfig,
    pub ui: UiConfig,
}

// ── Display ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub width: f32,
    pub height: f32,
    pub background_color: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: GAME_WIDTH,
            height: GAME_HEIGHT,
            background_color: BACKGROUND_COLOR,
        }
    }
}

// ── Ship ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    pub acceleration: f32,
    pub max_speed: f32,
    /// Radians per second.
    pub rotation_speed: f32,
    pub size: f32,
    /// Per-frame velocity retention at [`REFERENCE_FRAME_RATE`].
    pub friction: f32,
    pub stabilization_duration_ms: f32,
    pub stabilization_power: f32,
    pub stabilization_engage_speed: f32,
    pub stabilization_release_speed: f32,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            acceleration: SHIP_ACCELERATION,
            max_speed: SHIP_MAX_SPEED,
            rotation_speed: SHIP_ROTATION_SPEED,
            size: SHIP_SIZE,
            friction: SHIP_FRICTION,
            stabilization_duration_ms: STABILIZATION_DURATION_MS,
            stabilization_power: STABILIZATION_POWER,
            stabilization_engage_speed: STABILIZATION_ENGAGE_SPEED,
            stabilization_release_speed: STABILIZATION_RELEASE_SPEED,
        }
    }
}

// ── Asteroids ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AsteroidConfig {
    pub min_size: f32,
    pub max_size: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub spin_rate: f32,
    // Break-apart tuning; no gameplay system consumes these yet.
    pub break_speed: f32,
    pub min_fragments: u32,
    pub max_fragments: u32,
}

impl Default for AsteroidConfig {
    fn default() -> Self {
        Self {
            min_size: ASTEROID_MIN_SIZE,
            max_size: ASTEROID_MAX_SIZE,
            min_speed: ASTEROID_MIN_SPEED,
            max_speed: ASTEROID_MAX_SPEED,
            spin_rate: ASTEROID_SPIN_RATE,
            break_speed: ASTEROID_BREAK_SPEED,
            min_fragments: ASTEROID_MIN_FRAGMENTS,
            max_fragments: ASTEROID_MAX_FRAGMENTS,
        }
    }
}

// ── Bullets (reserved) ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    pub speed: f32,
    pub lifetime_ms: f32,
    pub size: f32,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            speed: BULLET_SPEED,
            lifetime_ms: BULLET_LIFETIME_MS,
            size: BULLET_SIZE,
        }
    }
}

// ── Touch controls (reserved) ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TouchConfig {
    pub joystick_radius: f32,
    pub thrust_button_size: f32,
    pub dead_zone: f32,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            joystick_radius: TOUCH_JOYSTICK_RADIUS,
            thrust_button_size: TOUCH_THRUST_BUTTON_SIZE,
            dead_zone: TOUCH_DEAD_ZONE,
        }
    }
}

// ── World ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub wrap_padding: f32,
    pub initial_asteroids: usize,
    pub asteroid_spawn_distance: f32,
    /// Fixed seed for the field RNG.  `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            wrap_padding: WRAP_PADDING,
            initial_asteroids: INITIAL_ASTEROIDS,
            asteroid_spawn_distance: ASTEROID_SPAWN_DISTANCE,
            seed: None,
        }
    }
}

// ── UI ────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub text_color: u32,
    pub warning_color: u32,
    pub success_color: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            text_color: UI_TEXT_COLOR,
            warning_color: UI_WARNING_COLOR,
            success_color: UI_SUCCESS_COLOR,
        }
    }
}

impl GameConfig {
    /// Parse a TOML document, filling every missing key from the defaults.
    pub fn from_toml_str(contents: &str) -> GameResult<Self> {
        toml::from_str::<GameConfig>(contents).map_err(|e| GameError::ConfigParse(e.to_string()))
    }

    /// Centre of the visible field; the ship spawns here.
    pub fn field_center(&self) -> Vec2 {
        Vec2::new(self.display.width / 2.0, self.display.height / 2.0)
    }

    /// Check the invariants the rest of the game relies on.
    ///
    /// Returns the first violation found.  Callers log it and carry on: an
    /// off-balance rarity table only skews the material distribution toward
    /// iron, and the asteroid factory re-checks its own ranges before drawing.
    pub fn validate(&self) -> GameResult<()> {
        validate_world(self.display.width, self.display.height)?;
        validate_range("asteroids.size", self.asteroids.min_size, self.asteroids.max_size)?;
        validate_range(
            "asteroids.speed",
            self.asteroids.min_speed,
            self.asteroids.max_speed,
        )?;
        validate_range(
            "ship.stabilization_speed",
            self.ship.stabilization_release_speed,
            self.ship.stabilization_engage_speed,
        )?;
        let sum = self.materials.rarity_sum();
        if (sum - 1.0).abs() > RARITY_SUM_TOLERANCE {
            return Err(GameError::RaritySum { sum });
        }
        Ok(())
    }
}

/// Startup system: attempt to load `assets/void_miner.toml` and overwrite the
/// `GameConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults.  TOML parse errors are logged
/// but do not abort the game.  A missing file is not an error.
pub fn load_game_config(mut config: ResMut<GameConfig>) {
    match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => match GameConfig::from_toml_str(&contents) {
            Ok(loaded) => {
                *config = loaded;
                info!("Loaded game config from {CONFIG_PATH}");
            }
            Err(e) => warn!("{e}; using defaults"),
        },
        Err(_) => info!("No {CONFIG_PATH} found; using compiled defaults"),
    }

    if let Err(e) = config.validate() {
        warn!("Game config problem: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = GameConfig::from_toml_str("").expect("empty TOML is valid");
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn partial_table_overrides_only_named_keys() {
        let config = GameConfig::from_toml_str(
            r#"
            [ship]
            acceleration = 260.0

            [world]
            initial_asteroids = 12
            seed = 42
            "#,
        )
        .unwrap();
        assert_eq!(config.ship.acceleration, 260.0);
        assert_eq!(config.ship.max_speed, SHIP_MAX_SPEED);
        assert_eq!(config.world.initial_asteroids, 12);
        assert_eq!(config.world.seed, Some(42));
        assert_eq!(config.world.wrap_padding, WRAP_PADDING);
    }

    #[test]
    fn hex_colors_parse_from_toml_integers() {
        let config = GameConfig::from_toml_str(
            r#"
            [materials.gold]
            color = 0xFFAA00
            value = 12
            rarity = 0.09
            "#,
        )
        .unwrap();
        assert_eq!(config.materials.gold.color, 0xFFAA00);
        assert_eq!(config.materials.gold.value, 12);
        assert_eq!(config.materials.iron.color, IRON_COLOR);
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let err = GameConfig::from_toml_str("[ship\nacceleration = ").unwrap_err();
        assert!(matches!(err, GameError::ConfigParse(_)));
    }

    #[test]
    fn defaults_validate() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn skewed_rarity_table_is_reported() {
        let mut config = GameConfig::default();
        config.materials.energy.rarity = 0.5;
        assert!(matches!(
            config.validate(),
            Err(GameError::RaritySum { .. })
        ));
    }

    #[test]
    fn inverted_size_range_is_reported() {
        let mut config = GameConfig::default();
        config.asteroids.min_size = 80.0;
        assert!(matches!(
            config.validate(),
            Err(GameError::InvalidRange {
                name: "asteroids.size",
                ..
            })
        ));
    }

    #[test]
    fn field_center_is_half_the_display() {
        assert_eq!(
            GameConfig::default().field_center(),
            Vec2::new(GAME_WIDTH / 2.0, GAME_HEIGHT / 2.0)
        );
    }
}
