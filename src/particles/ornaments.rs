//! Instanced ornaments: baubles hanging on the tree and gifts at its base.
//!
//! Both populations share one progress scalar. While scattered, baubles bob
//! and drift and gifts tumble; both motions fade out as the tree assembles.

use crate::animation::{MorphProgress, TreeMode};
use crate::generation::Ornament;
use crate::math::{Mat4, Vec3};

/// Floats per instance in the GPU buffer: model matrix(16) + color(3)
pub const INSTANCE_STRIDE: usize = 19;

const BAUBLE_BOB_AMPLITUDE: f32 = 0.5;
const BAUBLE_DRIFT_SPEED: f32 = 0.5;

/// Final per-frame transform for one instanced mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceTransform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
    pub color: Vec3,
}

impl InstanceTransform {
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::compose(self.position, self.rotation, self.scale)
    }

    /// Layout: model matrix (column-major, 16) + color (3)
    pub fn to_array(&self) -> [f32; INSTANCE_STRIDE] {
        let m = self.model_matrix().data;
        [
            m[0], m[1], m[2], m[3],
            m[4], m[5], m[6], m[7],
            m[8], m[9], m[10], m[11],
            m[12], m[13], m[14], m[15],
            self.color.x, self.color.y, self.color.z,
        ]
    }
}

/// Flatten instances into a GPU buffer
pub fn instance_data(instances: &[InstanceTransform]) -> Vec<f32> {
    instances.iter().flat_map(|i| i.to_array()).collect()
}

/// Animated bauble and gift populations
pub struct OrnamentSystem {
    baubles: Vec<Ornament>,
    gifts: Vec<Ornament>,
    progress: MorphProgress,
}

impl OrnamentSystem {
    pub fn new(baubles: Vec<Ornament>, gifts: Vec<Ornament>, transition_speed: f32) -> Self {
        Self {
            baubles,
            gifts,
            progress: MorphProgress::new(transition_speed),
        }
    }

    pub fn update(&mut self, dt: f32, mode: TreeMode) {
        self.progress.advance(dt, mode);
    }

    pub fn progress(&self) -> &MorphProgress {
        &self.progress
    }

    pub fn baubles(&self) -> &[Ornament] {
        &self.baubles
    }

    pub fn gifts(&self) -> &[Ornament] {
        &self.gifts
    }

    /// Bauble transforms at `time`
    pub fn bauble_instances(&self, time: f32) -> Vec<InstanceTransform> {
        let eased = self.progress.eased();
        let float_factor = 1.0 - eased;

        self.baubles
            .iter()
            .enumerate()
            .map(|(i, b)| {
                let mut position = b.scatter.lerp(&b.tree, eased);
                position.y += (time + i as f32).sin() * BAUBLE_BOB_AMPLITUDE * float_factor;

                let drift = time * BAUBLE_DRIFT_SPEED * float_factor;
                let rotation = b.rotation + Vec3::new(drift, drift, 0.0);

                InstanceTransform {
                    position,
                    rotation,
                    scale: b.scale,
                    color: b.color.rgb(),
                }
            })
            .collect()
    }

    /// Gift transforms at `time`
    pub fn gift_instances(&self, time: f32) -> Vec<InstanceTransform> {
        let eased = self.progress.eased();
        let tumble = (1.0 - eased) * time;

        self.gifts
            .iter()
            .map(|g| InstanceTransform {
                position: g.scatter.lerp(&g.tree, eased),
                rotation: g.rotation + Vec3::new(tumble, tumble, 0.0),
                scale: g.scale,
                color: g.color.rgb(),
            })
            .collect()
    }
}
