use std::f32::consts::PI;
use rand::Rng;
use crate::config::{ExtentRange, RadiusBand, SceneConfig};
use crate::math::Vec3;
use super::palette::{OrnamentColor, WeightedPalette, BAUBLE_PALETTE, GIFT_PALETTE};
use super::{random_angle, sample_shell, uniform, ConeShape};

/// Baubles sit at 90% of the cone radius...
const BAUBLE_SURFACE_FACTOR: f32 = 0.9;
/// ...pushed out by up to this much so they hang on the branches
const BAUBLE_HANG_JITTER: f32 = 0.5;
const BAUBLE_SCALE: (f32, f32) = (0.2, 0.5);

/// Height of the band above the cone base where gifts are placed
const GIFT_BAND_HEIGHT: f32 = 2.5;
/// Gifts drop this far below the band to rest on the floor
const GIFT_FLOOR_DROP: f32 = 0.8;
/// Gifts spread this far beyond the tree's base radius
const GIFT_SPREAD: f32 = 3.0;
const GIFT_SCALE: (f32, f32) = (0.5, 1.1);

/// The two ornament populations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrnamentKind {
    /// Small spheres hanging on the tree
    Bauble,
    /// Boxes piled around the base
    Gift,
}

impl OrnamentKind {
    pub fn palette(self) -> WeightedPalette {
        match self {
            OrnamentKind::Bauble => BAUBLE_PALETTE,
            OrnamentKind::Gift => GIFT_PALETTE,
        }
    }
}

/// Static data for one ornament instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ornament {
    pub tree: Vec3,
    pub scatter: Vec3,
    /// Euler angles (XYZ), fixed at generation
    pub rotation: Vec3,
    pub scale: f32,
    pub color: OrnamentColor,
}

/// Samples bauble and gift layouts
#[derive(Debug, Clone, Copy)]
pub struct OrnamentGenerator {
    pub shape: ConeShape,
    pub bauble_scatter: RadiusBand,
    pub gift_scatter: ExtentRange,
}

impl OrnamentGenerator {
    pub fn from_config(config: &SceneConfig) -> Self {
        Self {
            shape: ConeShape::from_config(config),
            bauble_scatter: config.bauble_scatter,
            gift_scatter: config.gift_scatter_extent,
        }
    }

    pub fn generate<R: Rng + ?Sized>(&self, kind: OrnamentKind, count: usize, rng: &mut R) -> Vec<Ornament> {
        match kind {
            OrnamentKind::Bauble => self.generate_baubles(count, rng),
            OrnamentKind::Gift => self.generate_gifts(count, rng),
        }
    }

    /// Spheres near the cone surface, scattered on a shell
    pub fn generate_baubles<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<Ornament> {
        (0..count)
            .map(|_| {
                let y = self.shape.sample_height(rng);
                let r = self.shape.radius_at(y) * BAUBLE_SURFACE_FACTOR
                    + rng.gen::<f32>() * BAUBLE_HANG_JITTER;
                let tree = Vec3::from_polar(r, random_angle(rng), y);

                let scatter = sample_shell(rng, self.bauble_scatter);

                let color = OrnamentKind::Bauble.palette().pick(rng.gen());
                let rotation = Vec3::new(rng.gen::<f32>() * PI, rng.gen::<f32>() * PI, 0.0);
                let scale = uniform(rng, BAUBLE_SCALE.0, BAUBLE_SCALE.1);

                Ornament { tree, scatter, rotation, scale, color }
            })
            .collect()
    }

    /// Boxes in a low ring around the base, scattered through a cube
    pub fn generate_gifts<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<Ornament> {
        (0..count)
            .map(|_| {
                let y = self.shape.base_y() + rng.gen::<f32>() * GIFT_BAND_HEIGHT;
                let r = rng.gen::<f32>() * (self.shape.radius + GIFT_SPREAD);
                let tree = Vec3::from_polar(r, random_angle(rng), y - GIFT_FLOOR_DROP);

                let extent = uniform(rng, self.gift_scatter.min, self.gift_scatter.max);
                let scatter = Vec3::new(
                    (rng.gen::<f32>() - 0.5) * extent,
                    (rng.gen::<f32>() - 0.5) * extent,
                    (rng.gen::<f32>() - 0.5) * extent,
                );

                let color = OrnamentKind::Gift.palette().pick(rng.gen());
                let rotation = Vec3::new(0.0, rng.gen::<f32>() * PI, 0.0);
                let scale = uniform(rng, GIFT_SCALE.0, GIFT_SCALE.1);

                Ornament { tree, scatter, rotation, scale, color }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn generator() -> OrnamentGenerator {
        OrnamentGenerator::from_config(&SceneConfig::default())
    }

    #[test]
    fn test_zero_count() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(generator().generate_baubles(0, &mut rng).is_empty());
        assert!(generator().generate_gifts(0, &mut rng).is_empty());
    }

    #[test]
    fn test_bauble_layout() {
        let gen = generator();
        let mut rng = StdRng::seed_from_u64(10);
        let baubles = gen.generate(OrnamentKind::Bauble, 400, &mut rng);
        assert_eq!(baubles.len(), 400);

        for b in &baubles {
            let surface = gen.shape.radius_at(b.tree.y) * BAUBLE_SURFACE_FACTOR;
            let r = b.tree.planar_length();
            assert!(r >= surface - 1e-4 && r <= surface + BAUBLE_HANG_JITTER + 1e-4);
            assert!(b.tree.y >= gen.shape.base_y() && b.tree.y <= gen.shape.apex_y());

            assert!(gen.bauble_scatter.contains(b.scatter.length(), 1e-3));

            assert!((0.0..PI).contains(&b.rotation.x));
            assert!((0.0..PI).contains(&b.rotation.y));
            assert_eq!(b.rotation.z, 0.0);

            assert!(b.scale >= 0.2 && b.scale <= 0.5);
            assert!(matches!(
                b.color,
                OrnamentColor::Teal | OrnamentColor::Silver | OrnamentColor::Red | OrnamentColor::Gold
            ));
        }
    }

    #[test]
    fn test_gift_layout() {
        let gen = generator();
        let mut rng = StdRng::seed_from_u64(11);
        let gifts = gen.generate(OrnamentKind::Gift, 50, &mut rng);
        assert_eq!(gifts.len(), 50);

        let floor = gen.shape.base_y() - GIFT_FLOOR_DROP;
        let half_extent = gen.gift_scatter.max_half_extent();
        for g in &gifts {
            assert!(g.tree.y >= floor && g.tree.y <= floor + GIFT_BAND_HEIGHT);
            assert!(g.tree.planar_length() <= gen.shape.radius + GIFT_SPREAD + 1e-4);

            for axis in g.scatter.to_array() {
                assert!(axis.abs() <= half_extent + 1e-4);
            }

            assert_eq!(g.rotation.x, 0.0);
            assert_eq!(g.rotation.z, 0.0);
            assert!((0.0..PI).contains(&g.rotation.y));
            assert!(g.scale >= 0.5 && g.scale <= 1.1);
            assert!(matches!(
                g.color,
                OrnamentColor::Teal | OrnamentColor::Gold | OrnamentColor::White | OrnamentColor::DeepRed
            ));
        }
    }

    #[test]
    fn test_gifts_spread_wider_than_tree() {
        let gen = generator();
        let mut rng = StdRng::seed_from_u64(12);
        let gifts = gen.generate_gifts(2_000, &mut rng);
        let outside = gifts
            .iter()
            .filter(|g| g.tree.planar_length() > gen.shape.radius)
            .count();
        assert!(outside > 0);
    }

    #[test]
    fn test_reproducible() {
        let gen = generator();
        let a = gen.generate_baubles(20, &mut StdRng::seed_from_u64(5));
        let b = gen.generate_baubles(20, &mut StdRng::seed_from_u64(5));
        assert_eq!(a, b);
    }

    #[test]
    fn test_kind_palettes() {
        assert_eq!(OrnamentKind::Bauble.palette().pick(0.8), OrnamentColor::Teal);
        assert_eq!(OrnamentKind::Gift.palette().pick(0.8), OrnamentColor::Teal);
        assert_eq!(OrnamentKind::Gift.palette().pick(0.6), OrnamentColor::Gold);
    }
}
