//! Orbit camera around the tree
//!
//! Spherical coordinates around a fixed target with clamped polar angle and
//! distance. Auto-rotates while the tree is assembled.

use std::f32::consts::{PI, TAU};
use crate::animation::TreeMode;
use crate::math::{Mat4, Vec3};

const MIN_POLAR: f32 = PI / 4.0;
const MAX_POLAR: f32 = PI / 1.8;
const MIN_DISTANCE: f32 = 10.0;
const MAX_DISTANCE: f32 = 40.0;
/// One full turn per minute at speed 1.0
const AUTO_ROTATE_SPEED: f32 = 0.5;
const DRAG_SENSITIVITY: f32 = 0.01;
const ZOOM_SENSITIVITY: f32 = 0.5;

#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    distance: f32,
    /// Angle from +Y
    polar: f32,
    /// Angle around Y, measured from +Z
    azimuth: f32,
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::looking_from(Vec3::new(0.0, 4.0, 25.0), Vec3::ZERO)
    }
}

impl OrbitCamera {
    /// Camera at `eye` looking at `target`, clamped into the allowed orbit
    pub fn looking_from(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset.length().max(f32::EPSILON);
        let polar = (offset.y / distance).clamp(-1.0, 1.0).acos();
        let azimuth = offset.x.atan2(offset.z);

        Self {
            target,
            distance: distance.clamp(MIN_DISTANCE, MAX_DISTANCE),
            polar: polar.clamp(MIN_POLAR, MAX_POLAR),
            azimuth,
            fov: 45.0f32.to_radians(),
            near: 0.1,
            far: 200.0,
        }
    }

    pub fn position(&self) -> Vec3 {
        let sin_polar = self.polar.sin();
        self.target
            + Vec3::new(
                self.distance * sin_polar * self.azimuth.sin(),
                self.distance * self.polar.cos(),
                self.distance * sin_polar * self.azimuth.cos(),
            )
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn polar(&self) -> f32 {
        self.polar
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    /// Auto-rotate while assembled
    pub fn update(&mut self, dt: f32, mode: TreeMode) {
        if mode == TreeMode::TreeShape && dt.is_finite() && dt > 0.0 {
            self.azimuth = (self.azimuth + TAU / 60.0 * AUTO_ROTATE_SPEED * dt) % TAU;
        }
    }

    /// Drag in screen pixels
    pub fn orbit(&mut self, delta_x: f32, delta_y: f32) {
        if !delta_x.is_finite() || !delta_y.is_finite() {
            return;
        }
        self.azimuth -= delta_x * DRAG_SENSITIVITY;
        self.polar = (self.polar - delta_y * DRAG_SENSITIVITY).clamp(MIN_POLAR, MAX_POLAR);
    }

    pub fn zoom(&mut self, delta: f32) {
        if !delta.is_finite() {
            return;
        }
        self.distance = (self.distance + delta * ZOOM_SENSITIVITY).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position(), self.target, Vec3::UP)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective(self.fov, aspect, self.near, self.far)
    }
}
