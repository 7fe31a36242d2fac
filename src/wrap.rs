//! Padded screen wrap shared by the ship and every asteroid.
//!
//! An entity that drifts past `extent + padding` on an axis reappears at
//! `-padding` (and vice versa), so it re-enters fully off-screen on the
//! opposite edge rather than popping in at the boundary.

use crate::config::GameConfig;
use bevy::prelude::*;

/// Wrap rectangle: the visible field `[0, width] × [0, height]` grown by
/// `padding` on every side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WrapBounds {
    pub width: f32,
    pub height: f32,
    pub padding: f32,
}

impl WrapBounds {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            width: config.display.width,
            height: config.display.height,
            padding: config.world.wrap_padding,
        }
    }

    /// Apply the wrap rule to both axes.  Positions already inside the padded
    /// rectangle (boundaries included) are returned unchanged.
    pub fn wrap(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            wrap_axis(position.x, self.width, self.padding),
            wrap_axis(position.y, self.height, self.padding),
        )
    }

    /// Whether `position` lies inside the padded rectangle.
    pub fn contains(&self, position: Vec2) -> bool {
        (-self.padding..=self.width + self.padding).contains(&position.x)
            && (-self.padding..=self.height + self.padding).contains(&position.y)
    }
}

/// Single-axis wrap: `value > extent + padding` → `-padding`;
/// `value < -padding` → `extent + padding`.
pub fn wrap_axis(value: f32, extent: f32, padding: f32) -> f32 {
    if value > extent + padding {
        -padding
    } else if value < -padding {
        extent + padding
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> WrapBounds {
        WrapBounds {
            width: 800.0,
            height: 600.0,
            padding: 50.0,
        }
    }

    #[test]
    fn inside_position_is_untouched() {
        let b = bounds();
        for p in [
            Vec2::new(400.0, 300.0),
            Vec2::new(-50.0, -50.0),
            Vec2::new(850.0, 650.0),
            Vec2::new(0.0, 600.0),
        ] {
            assert_eq!(b.wrap(p), p, "{p:?} should not wrap");
            assert!(b.contains(p));
        }
    }

    #[test]
    fn just_past_right_edge_maps_to_negative_padding() {
        let b = bounds();
        let p = b.wrap(Vec2::new(850.01, 300.0));
        assert_eq!(p, Vec2::new(-50.0, 300.0));
    }

    #[test]
    fn past_left_edge_maps_to_far_side() {
        let b = bounds();
        assert_eq!(b.wrap(Vec2::new(-50.5, 10.0)), Vec2::new(850.0, 10.0));
    }

    #[test]
    fn both_axes_wrap_independently() {
        let b = bounds();
        assert_eq!(b.wrap(Vec2::new(900.0, -70.0)), Vec2::new(-50.0, 650.0));
    }

    #[test]
    fn wrap_is_idempotent() {
        let b = bounds();
        let once = b.wrap(Vec2::new(1000.0, 700.0));
        assert_eq!(b.wrap(once), once);
    }

    #[test]
    fn from_config_uses_display_and_padding() {
        let config = GameConfig::default();
        let b = WrapBounds::from_config(&config);
        assert_eq!(b.width, config.display.width);
        assert_eq!(b.padding, config.world.wrap_padding);
    }
}
