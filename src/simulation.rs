//! Frame-driven simulation of the whole scene
//!
//! Owns the generated entity tables, the two progress scalars (one for the
//! foliage, one for the ornaments) and the elapsed clock. The caller owns
//! the mode and hands it in on every `advance`.

use rand::{rngs::StdRng, Rng, SeedableRng};
use crate::animation::TreeMode;
use crate::config::SceneConfig;
use crate::generation::{FoliageGenerator, OrnamentGenerator, OrnamentKind};
use crate::particles::{FoliageSystem, InstanceTransform, OrnamentSystem, TopStar};

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub elapsed: f32,
    pub mode: TreeMode,
    pub foliage_progress: f32,
    pub foliage_eased: f32,
    pub ornament_progress: f32,
    pub ornament_eased: f32,
    /// Foliage point buffer, `FOLIAGE_STRIDE` floats per point
    pub foliage: Vec<f32>,
    pub baubles: Vec<InstanceTransform>,
    pub gifts: Vec<InstanceTransform>,
    pub star: InstanceTransform,
}

pub struct Simulation {
    foliage: FoliageSystem,
    ornaments: OrnamentSystem,
    star: TopStar,
    elapsed: f32,
    mode: TreeMode,
}

impl Simulation {
    /// Generate every population from `rng`, starting fully scattered
    pub fn new<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Self {
        let foliage_data = FoliageGenerator::from_config(config).generate(config.foliage_count, rng);

        let ornament_gen = OrnamentGenerator::from_config(config);
        let baubles = ornament_gen.generate(OrnamentKind::Bauble, config.bauble_count, rng);
        let gifts = ornament_gen.generate(OrnamentKind::Gift, config.gift_count, rng);

        log::info!(
            "generated {} foliage points, {} baubles, {} gifts",
            foliage_data.len(),
            baubles.len(),
            gifts.len()
        );

        Self {
            foliage: FoliageSystem::new(foliage_data, config.transition_speed),
            ornaments: OrnamentSystem::new(baubles, gifts, config.transition_speed),
            star: TopStar::new(config.tree_height),
            elapsed: 0.0,
            mode: TreeMode::Scattered,
        }
    }

    pub fn from_seed(config: &SceneConfig, seed: u64) -> Self {
        Self::new(config, &mut StdRng::seed_from_u64(seed))
    }

    /// Seeded from `config.seed`, or from entropy when it is unset
    pub fn from_config(config: &SceneConfig) -> Self {
        match config.seed {
            Some(seed) => Self::from_seed(config, seed),
            None => Self::new(config, &mut StdRng::from_entropy()),
        }
    }

    /// Report `mode` until the first `advance`
    pub fn starting_in(mut self, mode: TreeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Advance the clock and both progress scalars by `dt` seconds
    pub fn advance(&mut self, dt: f32, mode: TreeMode) {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        self.mode = mode;
        self.foliage.update(dt, mode);
        self.ornaments.update(dt, mode);
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        let time = self.elapsed;
        FrameSnapshot {
            elapsed: time,
            mode: self.mode,
            foliage_progress: self.foliage.progress().value(),
            foliage_eased: self.foliage.progress().eased(),
            ornament_progress: self.ornaments.progress().value(),
            ornament_eased: self.ornaments.progress().eased(),
            foliage: self.foliage.get_particle_data(time),
            baubles: self.ornaments.bauble_instances(time),
            gifts: self.ornaments.gift_instances(time),
            star: self.star.transform(time, self.mode),
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn foliage(&self) -> &FoliageSystem {
        &self.foliage
    }

    pub fn ornaments(&self) -> &OrnamentSystem {
        &self.ornaments
    }
}
