use rand::Rng;
use crate::config::{RadiusBand, SceneConfig};
use crate::math::Vec3;
use super::{random_angle, sample_shell, ConeShape};

/// Static per-point tables for the foliage cloud, indexed in parallel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoliageData {
    /// Points filling the cone volume
    pub tree_positions: Vec<Vec3>,
    /// Points on the scatter shell
    pub scatter_positions: Vec<Vec3>,
    /// Per-point scalar in [0, 1) driving size and color variation
    pub randoms: Vec<f32>,
}

impl FoliageData {
    pub fn len(&self) -> usize {
        self.tree_positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree_positions.is_empty()
    }
}

/// Samples foliage layouts
#[derive(Debug, Clone, Copy)]
pub struct FoliageGenerator {
    pub shape: ConeShape,
    pub scatter: RadiusBand,
}

impl FoliageGenerator {
    pub fn new(shape: ConeShape, scatter: RadiusBand) -> Self {
        Self { shape, scatter }
    }

    pub fn from_config(config: &SceneConfig) -> Self {
        Self::new(ConeShape::from_config(config), config.foliage_scatter)
    }

    /// Generate `count` points. Higher points cluster tighter because the
    /// radius is drawn uniformly inside a shrinking cross-section.
    pub fn generate<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> FoliageData {
        let mut data = FoliageData {
            tree_positions: Vec::with_capacity(count),
            scatter_positions: Vec::with_capacity(count),
            randoms: Vec::with_capacity(count),
        };

        for _ in 0..count {
            let y = self.shape.sample_height(rng);
            let radius_at_height = self.shape.radius_at(y);
            let angle = random_angle(rng);
            let r = rng.gen::<f32>() * radius_at_height;
            data.tree_positions.push(Vec3::from_polar(r, angle, y));

            data.scatter_positions.push(sample_shell(rng, self.scatter));

            data.randoms.push(rng.gen::<f32>());
        }

        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn generator() -> FoliageGenerator {
        FoliageGenerator::from_config(&SceneConfig::default())
    }

    #[test]
    fn test_zero_count() {
        let mut rng = StdRng::seed_from_u64(0);
        let data = generator().generate(0, &mut rng);
        assert!(data.is_empty());
        assert_eq!(data.tree_positions.len(), 0);
        assert_eq!(data.scatter_positions.len(), 0);
        assert_eq!(data.randoms.len(), 0);
    }

    #[test]
    fn test_parallel_tables() {
        let mut rng = StdRng::seed_from_u64(1);
        let data = generator().generate(500, &mut rng);
        assert_eq!(data.len(), 500);
        assert_eq!(data.scatter_positions.len(), 500);
        assert_eq!(data.randoms.len(), 500);
    }

    #[test]
    fn test_tree_positions_inside_cone() {
        let gen = generator();
        let mut rng = StdRng::seed_from_u64(2);
        let data = gen.generate(12_000, &mut rng);
        let half = gen.shape.height / 2.0;

        for p in &data.tree_positions {
            assert!(p.y >= -half && p.y <= half, "y out of range: {}", p.y);
            assert!(
                p.planar_length() <= gen.shape.radius_at(p.y) + 1e-4,
                "point {:?} outside cone",
                p
            );
        }
    }

    #[test]
    fn test_scatter_positions_in_shell() {
        let gen = generator();
        let mut rng = StdRng::seed_from_u64(3);
        let data = gen.generate(5_000, &mut rng);
        for p in &data.scatter_positions {
            assert!(gen.scatter.contains(p.length(), 1e-3), "norm {}", p.length());
        }
    }

    #[test]
    fn test_randoms_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(4);
        let data = generator().generate(2_000, &mut rng);
        assert!(data.randoms.iter().all(|r| (0.0..1.0).contains(r)));
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = generator().generate(100, &mut StdRng::seed_from_u64(42));
        let b = generator().generate(100, &mut StdRng::seed_from_u64(42));
        let c = generator().generate(100, &mut StdRng::seed_from_u64(43));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_volume_fill_tightens_toward_apex() {
        let gen = generator();
        let mut rng = StdRng::seed_from_u64(5);
        let data = gen.generate(12_000, &mut rng);

        let mean_radius = |lo: f32, hi: f32| {
            let radii: Vec<f32> = data
                .tree_positions
                .iter()
                .filter(|p| p.y >= lo && p.y < hi)
                .map(|p| p.planar_length())
                .collect();
            radii.iter().sum::<f32>() / radii.len() as f32
        };

        assert!(mean_radius(-7.0, -4.0) > mean_radius(3.0, 6.0));
    }
}
