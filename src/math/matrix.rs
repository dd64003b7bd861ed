use super::Vec3;

/// 4x4 matrix for transformations (column-major for WebGL)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    pub data: [f32; 16],
}

impl Mat4 {
    pub fn identity() -> Self {
        Self {
            data: [
                1.0, 0.0, 0.0, 0.0,
                0.0, 1.0, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    pub fn translation(offset: Vec3) -> Self {
        let mut m = Self::identity();
        m.data[12] = offset.x;
        m.data[13] = offset.y;
        m.data[14] = offset.z;
        m
    }

    pub fn uniform_scale(s: f32) -> Self {
        let mut m = Self::identity();
        m.data[0] = s;
        m.data[5] = s;
        m.data[10] = s;
        m
    }

    pub fn rotation_x(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Self {
            data: [
                1.0, 0.0, 0.0, 0.0,
                0.0, c, s, 0.0,
                0.0, -s, c, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    pub fn rotation_y(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Self {
            data: [
                c, 0.0, -s, 0.0,
                0.0, 1.0, 0.0, 0.0,
                s, 0.0, c, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    pub fn rotation_z(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Self {
            data: [
                c, s, 0.0, 0.0,
                -s, c, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Rotation from Euler angles applied in XYZ order (Rx * Ry * Rz)
    pub fn from_euler_xyz(angles: Vec3) -> Self {
        Self::rotation_x(angles.x)
            .mul(&Self::rotation_y(angles.y))
            .mul(&Self::rotation_z(angles.z))
    }

    /// Translation * rotation * uniform scale, the usual instance transform
    pub fn compose(position: Vec3, rotation: Vec3, scale: f32) -> Self {
        Self::translation(position)
            .mul(&Self::from_euler_xyz(rotation))
            .mul(&Self::uniform_scale(scale))
    }

    /// Perspective projection matrix
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov_y / 2.0).tan();
        let nf = 1.0 / (near - far);

        Self {
            data: [
                f / aspect, 0.0, 0.0, 0.0,
                0.0, f, 0.0, 0.0,
                0.0, 0.0, (far + near) * nf, -1.0,
                0.0, 0.0, 2.0 * far * near * nf, 0.0,
            ],
        }
    }

    /// Look-at view matrix
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let f = (target - eye).normalize();
        let r = f.cross(&up).normalize();
        let u = r.cross(&f);

        Self {
            data: [
                r.x, u.x, -f.x, 0.0,
                r.y, u.y, -f.y, 0.0,
                r.z, u.z, -f.z, 0.0,
                -r.dot(&eye), -u.dot(&eye), f.dot(&eye), 1.0,
            ],
        }
    }

    /// Matrix multiplication
    pub fn mul(&self, other: &Mat4) -> Self {
        let mut result = [0.0f32; 16];

        for row in 0..4 {
            for col in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.data[row + k * 4] * other.data[k + col * 4];
                }
                result[row + col * 4] = sum;
            }
        }

        Self { data: result }
    }

    /// Transform a point (applies translation)
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            self.data[0] * p.x + self.data[4] * p.y + self.data[8] * p.z + self.data[12],
            self.data[1] * p.x + self.data[5] * p.y + self.data[9] * p.z + self.data[13],
            self.data[2] * p.x + self.data[6] * p.y + self.data[10] * p.z + self.data[14],
        )
    }

    pub fn as_slice(&self) -> &[f32; 16] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 0.0001, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_translation() {
        let m = Mat4::translation(Vec3::new(1.0, 2.0, 3.0));
        assert_close(m.transform_point(Vec3::ZERO), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_rotation_z() {
        let m = Mat4::rotation_z(FRAC_PI_2);
        assert_close(m.transform_point(Vec3::new(1.0, 0.0, 0.0)), Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_euler_zero_is_identity() {
        assert_eq!(Mat4::from_euler_xyz(Vec3::ZERO), Mat4::identity());
    }

    #[test]
    fn test_euler_order() {
        // Z applies first, then Y, then X
        let m = Mat4::from_euler_xyz(Vec3::new(FRAC_PI_2, 0.0, FRAC_PI_2));
        // x -> y (Rz) -> z (Rx)
        assert_close(m.transform_point(Vec3::new(1.0, 0.0, 0.0)), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_compose() {
        let m = Mat4::compose(Vec3::new(0.0, -2.0, 5.0), Vec3::new(0.0, FRAC_PI_2, 0.0), 2.0);
        // scale, then rotate x -> -z, then translate
        assert_close(m.transform_point(Vec3::new(1.0, 0.0, 0.0)), Vec3::new(0.0, -2.0, 3.0));
    }

    #[test]
    fn test_look_at_maps_eye_to_origin() {
        let eye = Vec3::new(0.0, 4.0, 25.0);
        let view = Mat4::look_at(eye, Vec3::ZERO, Vec3::UP);
        assert_close(view.transform_point(eye), Vec3::ZERO);
        // The target lies straight ahead on -Z
        let target = view.transform_point(Vec3::ZERO);
        assert!(target.z < 0.0);
        assert!(target.x.abs() < 0.0001 && target.y.abs() < 0.0001);
    }
}
