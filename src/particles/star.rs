use crate::animation::TreeMode;
use crate::generation::palette::{hex_to_rgb, STAR_HEX};
use crate::math::Vec3;
use super::ornaments::InstanceTransform;

/// Collapsed scale of the star while the tree is scattered
const HIDDEN_SCALE: f32 = 0.01;

/// Spinning, pulsing star on the tree's tip
#[derive(Debug, Clone, Copy)]
pub struct TopStar {
    position: Vec3,
    color: Vec3,
}

impl TopStar {
    /// Place the star just above the apex of a tree of the given height
    pub fn new(tree_height: f32) -> Self {
        Self {
            position: Vec3::new(0.0, tree_height / 2.0 + 0.5, 0.0),
            color: hex_to_rgb(STAR_HEX),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn transform(&self, time: f32, mode: TreeMode) -> InstanceTransform {
        let pulse = 1.0 + (time * 3.0).sin() * 0.1;
        let visibility = match mode {
            TreeMode::TreeShape => 1.0,
            TreeMode::Scattered => HIDDEN_SCALE,
        };

        InstanceTransform {
            position: self.position,
            rotation: Vec3::new(0.0, time * 0.5, 0.0),
            scale: pulse * visibility,
            color: self.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_sits_above_apex() {
        let star = TopStar::new(14.0);
        assert_eq!(star.position(), Vec3::new(0.0, 7.5, 0.0));
    }

    #[test]
    fn test_star_spin_and_pulse() {
        let star = TopStar::new(14.0);
        let t = star.transform(2.0, TreeMode::TreeShape);
        assert!((t.rotation.y - 1.0).abs() < 1e-6);
        assert!((t.scale - (1.0 + (6.0f32).sin() * 0.1)).abs() < 1e-6);
        assert!(t.scale >= 0.9 && t.scale <= 1.1);
    }

    #[test]
    fn test_star_collapses_when_scattered() {
        let star = TopStar::new(14.0);
        let t = star.transform(0.0, TreeMode::Scattered);
        assert!((t.scale - 0.01).abs() < 1e-6);
    }
}
