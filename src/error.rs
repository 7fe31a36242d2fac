//! Game-specific error types.
//!
//! Nothing in the game is fatal: every producer of a [`GameError`] has a
//! caller that logs it and degrades gracefully (keeps defaults, skips field
//! generation) instead of panicking.

use thiserror::Error;

/// Top-level error enum for Void Miner.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GameError {
    /// The playfield has a non-positive or non-finite extent, so no spawn
    /// position can be drawn inside it.
    #[error("world dimensions {width}x{height} cannot hold a spawn position")]
    DegenerateWorld { width: f32, height: f32 },

    /// A configured `[min, max]` pair is inverted or not finite.
    #[error("range '{name}' is invalid: min {min} > max {max}")]
    InvalidRange {
        name: &'static str,
        min: f32,
        max: f32,
    },

    /// Material rarity weights do not add up to 1.0.  Rolls beyond the sum
    /// fall back to iron, so the distribution is skewed but still usable.
    #[error("material rarity weights sum to {sum}, expected 1.0")]
    RaritySum { sum: f64 },

    /// The config file exists but is not valid TOML for [`crate::config::GameConfig`].
    #[error("failed to parse game config: {0}")]
    ConfigParse(String),
}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `min <= max` and both bounds are finite.
pub fn validate_range(name: &'static str, min: f32, max: f32) -> GameResult<()> {
    if min.is_finite() && max.is_finite() && min <= max {
        Ok(())
    } else {
        Err(GameError::InvalidRange { name, min, max })
    }
}

/// Returns an error unless both world dimensions are strictly positive and finite.
pub fn validate_world(width: f32, height: f32) -> GameResult<()> {
    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(GameError::DegenerateWorld { width, height })
    }
}
