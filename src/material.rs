//! Asteroid materials and the weighted rarity roll.
//!
//! Every asteroid is made of exactly one [`Material`].  The kind is drawn once
//! at spawn time from the rarity table in [`crate::config::GameConfig`] and
//! never changes; its [`MaterialProperties`] are copied out of the table at
//! the same moment.

use crate::constants::*;
use bevy::prelude::*;
use rand::Rng;
use serde::Deserialize;

/// Material kinds, in roll order.
///
/// The declaration order is part of the contract: [`material_for_roll`] walks
/// the kinds in [`Material::ALL`] order, which decides the winner when a roll
/// lands exactly on a cumulative boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Material {
    Iron,
    Crystal,
    Gold,
    Energy,
}

impl Material {
    /// All kinds in roll order.
    pub const ALL: [Material; 4] = [
        Material::Iron,
        Material::Crystal,
        Material::Gold,
        Material::Energy,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Material::Iron => "Iron",
            Material::Crystal => "Crystal",
            Material::Gold => "Gold",
            Material::Energy => "Energy",
        }
    }
}

/// Per-material colour, point value and rarity weight.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct MaterialProperties {
    /// `0xRRGGBB`.
    pub color: u32,
    pub value: u32,
    /// Share of rolls this material should win; the four weights are meant to
    /// sum to 1.0.
    pub rarity: f64,
}

/// The rarity table, one entry per [`Material`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MaterialTable {
    pub iron: MaterialProperties,
    pub crystal: MaterialProperties,
    pub gold: MaterialProperties,
    pub energy: MaterialProperties,
}

impl Default for MaterialTable {
    fn default() -> Self {
        Self {
            iron: MaterialProperties {
                color: IRON_COLOR,
                value: IRON_VALUE,
                rarity: IRON_RARITY,
            },
            crystal: MaterialProperties {
                color: CRYSTAL_COLOR,
                value: CRYSTAL_VALUE,
                rarity: CRYSTAL_RARITY,
            },
            gold: MaterialProperties {
                color: GOLD_COLOR,
                value: GOLD_VALUE,
                rarity: GOLD_RARITY,
            },
            energy: MaterialProperties {
                color: ENERGY_COLOR,
                value: ENERGY_VALUE,
                rarity: ENERGY_RARITY,
            },
        }
    }
}

impl MaterialTable {
    pub fn get(&self, material: Material) -> MaterialProperties {
        match material {
            Material::Iron => self.iron,
            Material::Crystal => self.crystal,
            Material::Gold => self.gold,
            Material::Energy => self.energy,
        }
    }

    /// Sum of all rarity weights.
    pub fn rarity_sum(&self) -> f64 {
        Material::ALL.iter().map(|m| self.get(*m).rarity).sum()
    }
}

/// Map a roll in `[0, 1)` to a material.
///
/// Walks [`Material::ALL`] accumulating rarity weights and returns the first
/// kind whose running total meets or exceeds `roll`.  If rounding (or a table
/// whose weights sum to less than 1.0) leaves the roll unmatched, iron wins.
///
/// Weights accumulate in `f64`; with the default table the crystal and gold
/// totals land just below 0.9 and 0.99, so those exact rolls open the next
/// band.
pub fn material_for_roll(table: &MaterialTable, roll: f64) -> Material {
    let mut cumulative = 0.0;
    for material in Material::ALL {
        cumulative += table.get(material).rarity;
        if roll <= cumulative {
            return material;
        }
    }
    Material::Iron
}

/// Draw a weighted-random material from `table`.
pub fn choose_material<R: Rng + ?Sized>(table: &MaterialTable, rng: &mut R) -> Material {
    material_for_roll(table, rng.gen::<f64>())
}

/// Convert a `0xRRGGBB` value into a Bevy colour.
pub fn hex_color(rgb: u32) -> Color {
    Color::srgb_u8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

/// Linearly blend two `0xRRGGBB` colours channel-by-channel; `t = 0` → `from`,
/// `t = 1` → `to`.
pub fn blend_hex(from: u32, to: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let channel = |shift: u32| {
        let a = ((from >> shift) & 0xFF) as f32;
        let b = ((to >> shift) & 0xFF) as f32;
        ((a + (b - a) * t).round() as u32) << shift
    };
    channel(16) | channel(8) | channel(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // ── material_for_roll ─────────────────────────────────────────────────────

    #[test]
    fn low_rolls_are_iron() {
        let table = MaterialTable::default();
        for roll in [0.0, 0.1, 0.35, 0.59] {
            assert_eq!(material_for_roll(&table, roll), Material::Iron, "roll {roll}");
        }
    }

    #[test]
    fn roll_on_iron_boundary_is_still_iron() {
        // Cumulative total after iron is exactly 0.6; "meets or exceeds" wins.
        let table = MaterialTable::default();
        assert_eq!(material_for_roll(&table, IRON_RARITY), Material::Iron);
    }

    #[test]
    fn roll_on_crystal_boundary_opens_gold_band() {
        let table = MaterialTable::default();
        assert_eq!(material_for_roll(&table, 0.9), Material::Gold);
    }

    #[test]
    fn roll_on_gold_boundary_opens_energy_band() {
        let table = MaterialTable::default();
        assert_eq!(material_for_roll(&table, 0.99), Material::Energy);
    }

    #[test]
    fn crystal_band() {
        let table = MaterialTable::default();
        for roll in [0.61, 0.75, 0.89] {
            assert_eq!(
                material_for_roll(&table, roll),
                Material::Crystal,
                "roll {roll}"
            );
        }
    }

    #[test]
    fn gold_band() {
        let table = MaterialTable::default();
        for roll in [0.91, 0.95, 0.985] {
            assert_eq!(material_for_roll(&table, roll), Material::Gold, "roll {roll}");
        }
    }

    #[test]
    fn energy_band() {
        let table = MaterialTable::default();
        for roll in [0.992, 0.995, 0.999] {
            assert_eq!(
                material_for_roll(&table, roll),
                Material::Energy,
                "roll {roll}"
            );
        }
    }

    #[test]
    fn unmatched_roll_falls_back_to_iron() {
        // Weights sum to 0.4; any roll above that matches nothing.
        let mut table = MaterialTable::default();
        table.iron.rarity = 0.1;
        table.crystal.rarity = 0.1;
        table.gold.rarity = 0.1;
        table.energy.rarity = 0.1;
        assert_eq!(material_for_roll(&table, 0.7), Material::Iron);
        assert_eq!(material_for_roll(&table, 0.15), Material::Crystal);
    }

    #[test]
    fn zero_weight_material_is_skipped() {
        let mut table = MaterialTable::default();
        table.crystal.rarity = 0.0;
        table.gold.rarity = 0.39;
        // 0.61 would have been crystal; with crystal disabled it lands in gold.
        assert_eq!(material_for_roll(&table, 0.61), Material::Gold);
    }

    // ── choose_material ───────────────────────────────────────────────────────

    #[test]
    fn choose_material_distribution_is_roughly_weighted() {
        let table = MaterialTable::default();
        let mut rng = StdRng::seed_from_u64(7);
        let mut iron = 0;
        let mut crystal = 0;
        let n = 20_000;
        for _ in 0..n {
            match choose_material(&table, &mut rng) {
                Material::Iron => iron += 1,
                Material::Crystal => crystal += 1,
                _ => {}
            }
        }
        let iron_share = iron as f32 / n as f32;
        let crystal_share = crystal as f32 / n as f32;
        assert!((iron_share - 0.6).abs() < 0.03, "iron share {iron_share}");
        assert!(
            (crystal_share - 0.3).abs() < 0.03,
            "crystal share {crystal_share}"
        );
    }

    #[test]
    fn default_table_sums_to_one() {
        assert!((MaterialTable::default().rarity_sum() - 1.0).abs() < RARITY_SUM_TOLERANCE);
    }

    // ── colour helpers ────────────────────────────────────────────────────────

    #[test]
    fn blend_endpoints_return_inputs() {
        assert_eq!(blend_hex(0x000000, ENERGY_COLOR, 0.0), 0x000000);
        assert_eq!(blend_hex(0x000000, ENERGY_COLOR, 1.0), ENERGY_COLOR);
    }

    #[test]
    fn blend_midpoint_halves_channels() {
        assert_eq!(blend_hex(0x000000, 0xFF00FF, 0.5), 0x800080);
    }

    #[test]
    fn hex_color_unpacks_channels() {
        let c = Srgba::from(hex_color(0xFF8000));
        assert!((c.red - 1.0).abs() < 1e-3);
        assert!((c.green - 128.0 / 255.0).abs() < 1e-3);
        assert!(c.blue.abs() < 1e-3);
    }
}
