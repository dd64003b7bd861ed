//! Foliage point cloud
//!
//! Twelve thousand glowing needles that fly between the scatter shell and
//! the cone. Positions are rebuilt from the static tables every frame; the
//! wind and jitter are layered on top and never written back.

use crate::animation::{MorphProgress, TreeMode};
use crate::generation::palette::{hex_to_rgb, FOLIAGE_BASE_HEX, FOLIAGE_TIP_HEX};
use crate::generation::FoliageData;
use crate::math::Vec3;

/// Floats per point in the GPU buffer:
/// position(3) + size(1) + alpha(1) + color(3)
pub const FOLIAGE_STRIDE: usize = 8;

const WIND_SPEED: f32 = 1.5;
const WIND_AMPLITUDE: f32 = 0.1;
const JITTER_SPEED: f32 = 2.0;
const JITTER_AMPLITUDE: f32 = 0.05;

/// Animated foliage population
pub struct FoliageSystem {
    data: FoliageData,
    progress: MorphProgress,
    base_color: Vec3,
    tip_color: Vec3,
}

impl FoliageSystem {
    pub fn new(data: FoliageData, transition_speed: f32) -> Self {
        Self {
            data,
            progress: MorphProgress::new(transition_speed),
            base_color: hex_to_rgb(FOLIAGE_BASE_HEX),
            tip_color: hex_to_rgb(FOLIAGE_TIP_HEX),
        }
    }

    pub fn update(&mut self, dt: f32, mode: TreeMode) {
        self.progress.advance(dt, mode);
    }

    pub fn progress(&self) -> &MorphProgress {
        &self.progress
    }

    pub fn data(&self) -> &FoliageData {
        &self.data
    }

    pub fn count(&self) -> usize {
        self.data.len()
    }

    /// Interpolated position before any cosmetic motion
    pub fn base_position(&self, index: usize, eased: f32) -> Vec3 {
        self.data.scatter_positions[index].lerp(&self.data.tree_positions[index], eased)
    }

    /// Base position plus wind sway and jitter at `time`
    pub fn displayed_position(&self, index: usize, time: f32) -> Vec3 {
        let eased = self.progress.eased();
        let base = self.base_position(index, eased);
        base + sway(base, self.data.randoms[index], time, eased)
    }

    /// Point size before perspective attenuation
    pub fn point_size(&self, index: usize) -> f32 {
        4.0 * self.data.randoms[index] + 2.0
    }

    /// Needle color, leaning toward gold for high random values
    pub fn point_color(&self, index: usize) -> Vec3 {
        self.base_color.lerp(&self.tip_color, self.data.randoms[index] * 0.3)
    }

    /// Get particle data for GPU upload
    pub fn get_particle_data(&self, time: f32) -> Vec<f32> {
        let mut data = Vec::with_capacity(self.count() * FOLIAGE_STRIDE);

        for i in 0..self.count() {
            let p = self.displayed_position(i, time);
            let color = self.point_color(i);

            data.push(p.x);
            data.push(p.y);
            data.push(p.z);
            data.push(self.point_size(i));
            data.push(1.0);
            data.push(color.x);
            data.push(color.y);
            data.push(color.z);
        }

        data
    }
}

/// Cosmetic offset for a point at `base`.
///
/// A horizontal wind keyed to position (halved once assembled) and a small
/// jitter on all axes keyed to the point's random scalar.
pub fn sway(base: Vec3, random: f32, time: f32, eased: f32) -> Vec3 {
    let wind = (time * WIND_SPEED + base.y * 0.5 + base.x).sin() * WIND_AMPLITUDE;
    let jitter = (time * JITTER_SPEED + random * 100.0).sin() * JITTER_AMPLITUDE;

    Vec3::new(wind * (1.0 - eased * 0.5), 0.0, 0.0) + Vec3::splat(jitter)
}
