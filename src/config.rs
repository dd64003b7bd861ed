//! Scene configuration
//!
//! Defaults are the fixed build-time constants of the scene. A YAML document
//! can override any subset of them; missing keys keep their defaults.

use serde::{Deserialize, Serialize};
use crate::error::SceneError;

pub const FOLIAGE_COUNT: usize = 12_000;
pub const BAUBLE_COUNT: usize = 400;
pub const GIFT_COUNT: usize = 50;
pub const TREE_HEIGHT: f32 = 14.0;
pub const TREE_RADIUS: f32 = 5.0;
/// Exponential approach rate of the progress scalars (per second)
pub const TRANSITION_SPEED: f32 = 2.5;
/// Upper bound on any single population
pub const MAX_POPULATION: usize = 1_000_000;

/// Closed range of distances used when scattering a population
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiusBand {
    pub min: f32,
    pub max: f32,
}

impl RadiusBand {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f32, epsilon: f32) -> bool {
        value >= self.min - epsilon && value <= self.max + epsilon
    }

    fn validate(&self, name: &str) -> Result<(), SceneError> {
        validate_range(name, self.min, self.max)
    }
}

/// Range of edge lengths for a scatter cube
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtentRange {
    pub min: f32,
    pub max: f32,
}

impl ExtentRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Largest distance from the centre along one axis
    pub fn max_half_extent(&self) -> f32 {
        self.max / 2.0
    }

    fn validate(&self, name: &str) -> Result<(), SceneError> {
        validate_range(name, self.min, self.max)
    }
}

fn validate_range(name: &str, min: f32, max: f32) -> Result<(), SceneError> {
    if !min.is_finite() || !max.is_finite() {
        return Err(SceneError::invalid(format!("{} must be finite", name)));
    }
    if min < 0.0 || min > max {
        return Err(SceneError::invalid(format!(
            "{} must satisfy 0 <= min <= max (got {} .. {})",
            name, min, max
        )));
    }
    Ok(())
}

/// All tunable scene parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub foliage_count: usize,
    pub bauble_count: usize,
    pub gift_count: usize,
    pub tree_height: f32,
    pub tree_radius: f32,
    pub transition_speed: f32,
    /// Shell radius of the scattered foliage cloud
    pub foliage_scatter: RadiusBand,
    /// Shell radius of the scattered baubles
    pub bauble_scatter: RadiusBand,
    /// Edge length of the cube the gifts scatter into
    pub gift_scatter_extent: ExtentRange,
    /// Fixed seed for reproducible layouts; `None` draws from entropy
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            foliage_count: FOLIAGE_COUNT,
            bauble_count: BAUBLE_COUNT,
            gift_count: GIFT_COUNT,
            tree_height: TREE_HEIGHT,
            tree_radius: TREE_RADIUS,
            transition_speed: TRANSITION_SPEED,
            foliage_scatter: RadiusBand::new(20.0, 35.0),
            bauble_scatter: RadiusBand::new(15.0, 35.0),
            gift_scatter_extent: ExtentRange::new(25.0, 35.0),
            seed: None,
        }
    }
}

impl SceneConfig {
    /// Parse overrides from YAML and validate the result
    pub fn from_yaml(yaml: &str) -> Result<Self, SceneError> {
        let config: SceneConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        for (name, count) in [
            ("foliage_count", self.foliage_count),
            ("bauble_count", self.bauble_count),
            ("gift_count", self.gift_count),
        ] {
            if count > MAX_POPULATION {
                return Err(SceneError::invalid(format!(
                    "{} must be at most {} (got {})",
                    name, MAX_POPULATION, count
                )));
            }
        }
        if !self.tree_height.is_finite() || self.tree_height <= 0.0 {
            return Err(SceneError::invalid(format!(
                "tree_height must be positive (got {})",
                self.tree_height
            )));
        }
        if !self.tree_radius.is_finite() || self.tree_radius < 0.0 {
            return Err(SceneError::invalid(format!(
                "tree_radius must be non-negative (got {})",
                self.tree_radius
            )));
        }
        if !self.transition_speed.is_finite() || self.transition_speed < 0.0 {
            return Err(SceneError::invalid(format!(
                "transition_speed must be non-negative (got {})",
                self.transition_speed
            )));
        }
        self.foliage_scatter.validate("foliage_scatter")?;
        self.bauble_scatter.validate("bauble_scatter")?;
        self.gift_scatter_extent.validate("gift_scatter_extent")?;
        Ok(())
    }

    pub fn total_entities(&self) -> usize {
        self.foliage_count + self.bauble_count + self.gift_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = SceneConfig::default();
        assert_eq!(config.foliage_count, 12_000);
        assert_eq!(config.bauble_count, 400);
        assert_eq!(config.gift_count, 50);
        assert_eq!(config.tree_height, 14.0);
        assert_eq!(config.tree_radius, 5.0);
        assert_eq!(config.transition_speed, 2.5);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
foliage_count: 500
seed: 7
"#;
        let config = SceneConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.foliage_count, 500);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.bauble_count, BAUBLE_COUNT);
        assert_eq!(config.foliage_scatter, RadiusBand::new(20.0, 35.0));
    }

    #[test]
    fn test_band_override() {
        let yaml = r#"
bauble_scatter:
  min: 10.0
  max: 12.0
"#;
        let config = SceneConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.bauble_scatter, RadiusBand::new(10.0, 12.0));
    }

    #[test]
    fn test_invalid_yaml() {
        let result = SceneConfig::from_yaml("foliage_count: [1, 2");
        assert!(matches!(result, Err(SceneError::ConfigParse(_))));
    }

    #[test]
    fn test_rejects_bad_values() {
        let result = SceneConfig::from_yaml("tree_height: -3.0");
        assert!(matches!(result, Err(SceneError::InvalidConfig(_))));

        let result = SceneConfig::from_yaml("transition_speed: -1.0");
        assert!(result.is_err());

        let yaml = r#"
gift_scatter_extent:
  min: 30.0
  max: 20.0
"#;
        assert!(SceneConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_rejects_oversized_counts() {
        // Rejected before generation can try to allocate for it
        let result = SceneConfig::from_yaml("foliage_count: 18446744073709551615\nseed: 1");
        assert!(result.is_err());

        let result = SceneConfig::from_yaml("gift_count: 1000001");
        assert!(matches!(result, Err(SceneError::InvalidConfig(_))));

        let config = SceneConfig::from_yaml("bauble_count: 1000000").unwrap();
        assert_eq!(config.bauble_count, MAX_POPULATION);
    }

    #[test]
    fn test_band_contains() {
        let band = RadiusBand::new(20.0, 35.0);
        assert!(band.contains(20.0, 0.0));
        assert!(band.contains(35.0005, 0.001));
        assert!(!band.contains(19.0, 0.001));
    }
}
