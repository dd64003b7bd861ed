pub mod vec3;
pub mod matrix;

pub use vec3::{Vec3, lerp};
pub use matrix::Mat4;
