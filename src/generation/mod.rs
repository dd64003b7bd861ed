//! Procedural layouts for every population.
//!
//! Each entity gets two fixed endpoints, one in the assembled tree and one in
//! the scattered cloud. Generation runs once, before the first frame, and
//! draws from an injected `rand::Rng` so layouts are reproducible from a seed.

pub mod foliage;
pub mod ornaments;
pub mod palette;

use std::f32::consts::TAU;
use rand::Rng;
use crate::config::{RadiusBand, SceneConfig};
use crate::math::Vec3;

pub use foliage::{FoliageData, FoliageGenerator};
pub use ornaments::{Ornament, OrnamentGenerator, OrnamentKind};
pub use palette::{OrnamentColor, WeightedPalette, BAUBLE_PALETTE, GIFT_PALETTE};

/// The tree's cone, centered on the origin with its base at `-height / 2`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConeShape {
    pub height: f32,
    pub radius: f32,
}

impl ConeShape {
    pub fn new(height: f32, radius: f32) -> Self {
        Self { height, radius }
    }

    pub fn from_config(config: &SceneConfig) -> Self {
        Self::new(config.tree_height, config.tree_radius)
    }

    pub fn base_y(&self) -> f32 {
        -self.height / 2.0
    }

    pub fn apex_y(&self) -> f32 {
        self.height / 2.0
    }

    /// Cross-section radius at height `y`, shrinking linearly to zero at the apex
    pub fn radius_at(&self, y: f32) -> f32 {
        let progress_up = (y - self.base_y()) / self.height;
        (self.radius * (1.0 - progress_up)).max(0.0)
    }

    /// Uniform height in [base, apex)
    pub fn sample_height<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        uniform(rng, self.base_y(), self.apex_y())
    }
}

/// Uniform sample in [lo, hi); returns `lo` for an empty range
pub(crate) fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    lo + rng.gen::<f32>() * (hi - lo)
}

pub(crate) fn random_angle<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    uniform(rng, 0.0, TAU)
}

/// Point on a spherical shell: uniform direction, radius uniform in the band.
///
/// The polar angle is `acos(2u - 1)`, which keeps directions uniform over the
/// sphere instead of bunching them at the poles.
pub fn sample_shell<R: Rng + ?Sized>(rng: &mut R, band: RadiusBand) -> Vec3 {
    let theta = random_angle(rng);
    let phi = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
    let radius = uniform(rng, band.min, band.max);
    Vec3::from_spherical(radius, theta, phi)
}
