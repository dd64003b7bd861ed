//! Scatter/tree morph progress
//!
//! Each population carries its own `MorphProgress`, a first-order low-pass
//! filter that chases the target dictated by the current `TreeMode`:
//! - 0.0 = fully scattered, 1.0 = fully assembled
//! - no fixed duration and no completion event; arrival is asymptotic
//! - the eased value is a display transform and never feeds back

use serde::{Deserialize, Serialize};
use super::easing::ease_in_out_cubic;

/// The two morph states, selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TreeMode {
    Scattered,
    #[default]
    TreeShape,
}

impl TreeMode {
    /// Progress value this mode pulls toward
    pub fn target(self) -> f32 {
        match self {
            TreeMode::Scattered => 0.0,
            TreeMode::TreeShape => 1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TreeMode::Scattered => "SCATTERED",
            TreeMode::TreeShape => "TREE_SHAPE",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "SCATTERED" | "SCATTER" => Some(TreeMode::Scattered),
            "TREE_SHAPE" | "TREE" | "ASSEMBLE" => Some(TreeMode::TreeShape),
            _ => None,
        }
    }
}

/// Progress of one population between its scatter and tree layouts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphProgress {
    value: f32,
    /// Approach rate per second
    rate: f32,
}

impl MorphProgress {
    /// Start fully scattered
    pub fn new(rate: f32) -> Self {
        Self {
            value: 0.0,
            rate: rate.max(0.0),
        }
    }

    /// Move toward the mode's target by `lerp(value, target, dt * rate)`.
    ///
    /// The blend factor saturates at 1, so a huge `dt` lands exactly on the
    /// target instead of overshooting. Negative or non-finite `dt` is a no-op.
    pub fn advance(&mut self, dt: f32, mode: TreeMode) -> f32 {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let alpha = (dt * self.rate).clamp(0.0, 1.0);
        let target = mode.target();

        self.value = (self.value + (target - self.value) * alpha).clamp(0.0, 1.0);
        self.value
    }

    /// Raw progress in [0, 1]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Eased progress used to interpolate positions
    pub fn eased(&self) -> f32 {
        ease_in_out_cubic(self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TRANSITION_SPEED;

    #[test]
    fn test_starts_scattered() {
        let progress = MorphProgress::new(TRANSITION_SPEED);
        assert_eq!(progress.value(), 0.0);
        assert_eq!(progress.eased(), 0.0);
    }

    #[test]
    fn test_large_step_converges_to_tree() {
        let mut progress = MorphProgress::new(TRANSITION_SPEED);
        progress.advance(1000.0, TreeMode::TreeShape);
        assert!((progress.value() - 1.0).abs() < 1e-6);
        assert_eq!(progress.eased(), 1.0);
    }

    #[test]
    fn test_large_step_converges_to_scatter() {
        let mut progress = MorphProgress::new(TRANSITION_SPEED);
        progress.advance(0.3, TreeMode::TreeShape);
        assert!(progress.value() > 0.0);

        progress.advance(1000.0, TreeMode::Scattered);
        assert!(progress.value().abs() < 1e-6);
    }

    #[test]
    fn test_single_step_matches_lerp() {
        let mut progress = MorphProgress::new(2.5);
        let v = progress.advance(0.1, TreeMode::TreeShape);
        assert!((v - 0.25).abs() < 1e-6);

        let v = progress.advance(0.1, TreeMode::TreeShape);
        assert!((v - 0.4375).abs() < 1e-6);
    }

    #[test]
    fn test_approach_is_asymptotic() {
        let mut progress = MorphProgress::new(TRANSITION_SPEED);
        let mut prev = progress.value();
        for _ in 0..60 {
            let v = progress.advance(1.0 / 60.0, TreeMode::TreeShape);
            assert!(v > prev);
            assert!(v < 1.0);
            prev = v;
        }
        // One second at rate 2.5 is still short of the target
        assert!(1.0 - progress.value() > 1e-3);
    }

    #[test]
    fn test_always_in_unit_range() {
        let mut progress = MorphProgress::new(TRANSITION_SPEED);
        let steps = [0.0, 0.016, 0.5, 3.0, 0.0001, 1000.0, 0.07, 0.4];
        for (i, dt) in steps.iter().cycle().take(400).enumerate() {
            let mode = if (i / 3) % 2 == 0 { TreeMode::TreeShape } else { TreeMode::Scattered };
            let v = progress.advance(*dt, mode);
            assert!((0.0..=1.0).contains(&v), "out of range: {}", v);
            assert!((0.0..=1.0).contains(&progress.eased()));
        }
    }

    #[test]
    fn test_negative_and_nan_dt_are_ignored() {
        let mut progress = MorphProgress::new(TRANSITION_SPEED);
        progress.advance(0.1, TreeMode::TreeShape);
        let before = progress.value();

        progress.advance(-5.0, TreeMode::TreeShape);
        assert_eq!(progress.value(), before);

        progress.advance(f32::NAN, TreeMode::Scattered);
        assert_eq!(progress.value(), before);

        progress.advance(f32::INFINITY, TreeMode::Scattered);
        assert_eq!(progress.value(), before);
    }

    #[test]
    fn test_toggle_without_convergence_never_snaps() {
        let mut progress = MorphProgress::new(TRANSITION_SPEED);
        let dt = 1.0 / 60.0;
        for _ in 0..20 {
            progress.advance(dt, TreeMode::TreeShape);
        }
        let before = progress.value();

        let mut prev = before;
        for mode in [TreeMode::Scattered, TreeMode::TreeShape] {
            for _ in 0..5 {
                let v = progress.advance(dt, mode);
                assert!(v > 0.0 && v < 1.0);
                assert!((v - prev).abs() <= dt * TRANSITION_SPEED + 1e-6);
                prev = v;
            }
        }
        assert_ne!(progress.value(), 0.0);
        assert_ne!(progress.value(), 1.0);
    }

    #[test]
    fn test_zero_rate_holds_value() {
        let mut progress = MorphProgress::new(0.0);
        progress.advance(1000.0, TreeMode::TreeShape);
        assert_eq!(progress.value(), 0.0);
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(TreeMode::parse("SCATTERED"), Some(TreeMode::Scattered));
        assert_eq!(TreeMode::parse("tree_shape"), Some(TreeMode::TreeShape));
        assert_eq!(TreeMode::parse("assemble"), Some(TreeMode::TreeShape));
        assert_eq!(TreeMode::parse("spiral"), None);
        assert_eq!(TreeMode::TreeShape.as_str(), "TREE_SHAPE");
        assert_eq!(TreeMode::default(), TreeMode::TreeShape);
    }

    #[test]
    fn test_mode_serde_names() {
        let yaml = serde_yaml::to_string(&TreeMode::Scattered).unwrap();
        assert_eq!(yaml.trim(), "SCATTERED");
        let mode: TreeMode = serde_yaml::from_str("TREE_SHAPE").unwrap();
        assert_eq!(mode, TreeMode::TreeShape);
    }
}
