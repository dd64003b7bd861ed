//! Ornament color palettes
//!
//! Colors are drawn once per ornament from a weighted discrete palette. The
//! draw is a pure function of a uniform sample `p` in [0, 1): tiers are
//! checked from the top threshold down, and the first one with
//! `p > threshold` wins.

use crate::math::Vec3;

pub const FOLIAGE_BASE_HEX: u32 = 0x004020; // Deep emerald
pub const FOLIAGE_TIP_HEX: u32 = 0xD4AF37; // Gold
pub const STAR_HEX: u32 = 0xFFD700;

/// Every color an ornament can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrnamentColor {
    /// Tiffany blue accent
    Teal,
    Silver,
    Red,
    Gold,
    White,
    DeepRed,
}

impl OrnamentColor {
    pub const fn hex(self) -> u32 {
        match self {
            OrnamentColor::Teal => 0x81D8D0,
            OrnamentColor::Silver => 0xC0C0C0,
            OrnamentColor::Red => 0xB22222,
            OrnamentColor::Gold => 0xD4AF37,
            OrnamentColor::White => 0xFFFFFF,
            OrnamentColor::DeepRed => 0x8B0000,
        }
    }

    pub fn rgb(self) -> Vec3 {
        hex_to_rgb(self.hex())
    }
}

/// Tiered categorical distribution over `OrnamentColor`
#[derive(Debug, Clone, Copy)]
pub struct WeightedPalette {
    /// (exclusive lower threshold, color), highest threshold first
    tiers: &'static [(f32, OrnamentColor)],
    fallback: OrnamentColor,
}

/// Teal 25%, silver 25%, red 15%, gold 35%
pub const BAUBLE_PALETTE: WeightedPalette = WeightedPalette {
    tiers: &[
        (0.75, OrnamentColor::Teal),
        (0.5, OrnamentColor::Silver),
        (0.35, OrnamentColor::Red),
    ],
    fallback: OrnamentColor::Gold,
};

/// Teal 30%, gold 30%, white 20%, deep red 20%
pub const GIFT_PALETTE: WeightedPalette = WeightedPalette {
    tiers: &[
        (0.7, OrnamentColor::Teal),
        (0.4, OrnamentColor::Gold),
        (0.2, OrnamentColor::White),
    ],
    fallback: OrnamentColor::DeepRed,
};

impl WeightedPalette {
    pub fn pick(&self, p: f32) -> OrnamentColor {
        self.tiers
            .iter()
            .find(|(threshold, _)| p > *threshold)
            .map(|(_, color)| *color)
            .unwrap_or(self.fallback)
    }
}

/// Convert a 0xRRGGBB value to RGB in [0, 1]
pub fn hex_to_rgb(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use std::collections::HashMap;

    #[test]
    fn test_bauble_top_tier() {
        assert_eq!(BAUBLE_PALETTE.pick(0.8), OrnamentColor::Teal);
    }

    #[test]
    fn test_bauble_tiers() {
        assert_eq!(BAUBLE_PALETTE.pick(0.6), OrnamentColor::Silver);
        assert_eq!(BAUBLE_PALETTE.pick(0.4), OrnamentColor::Red);
        assert_eq!(BAUBLE_PALETTE.pick(0.1), OrnamentColor::Gold);
        // Thresholds are exclusive
        assert_eq!(BAUBLE_PALETTE.pick(0.75), OrnamentColor::Silver);
        assert_eq!(BAUBLE_PALETTE.pick(0.35), OrnamentColor::Gold);
    }

    #[test]
    fn test_gift_tiers() {
        assert_eq!(GIFT_PALETTE.pick(0.95), OrnamentColor::Teal);
        assert_eq!(GIFT_PALETTE.pick(0.5), OrnamentColor::Gold);
        assert_eq!(GIFT_PALETTE.pick(0.3), OrnamentColor::White);
        assert_eq!(GIFT_PALETTE.pick(0.0), OrnamentColor::DeepRed);
    }

    #[test]
    fn test_sampled_frequencies() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut counts: HashMap<OrnamentColor, usize> = HashMap::new();
        let draws = 20_000;
        for _ in 0..draws {
            *counts.entry(GIFT_PALETTE.pick(rng.gen())).or_default() += 1;
        }
        let expected = [
            (OrnamentColor::Teal, 0.3),
            (OrnamentColor::Gold, 0.3),
            (OrnamentColor::White, 0.2),
            (OrnamentColor::DeepRed, 0.2),
        ];
        for (color, weight) in expected {
            let freq = counts.get(&color).copied().unwrap_or(0) as f32 / draws as f32;
            assert!((freq - weight).abs() < 0.02, "{:?}: {} vs {}", color, freq, weight);
        }
    }

    #[test]
    fn test_hex_to_rgb() {
        let teal = OrnamentColor::Teal.rgb();
        assert!((teal.x - 129.0 / 255.0).abs() < 1e-6);
        assert!((teal.y - 216.0 / 255.0).abs() < 1e-6);
        assert!((teal.z - 208.0 / 255.0).abs() < 1e-6);
        assert_eq!(OrnamentColor::White.rgb(), Vec3::ONE);
    }
}
