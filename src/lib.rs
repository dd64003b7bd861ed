use wasm_bindgen::prelude::*;
use web_sys::{WebGl2RenderingContext, HtmlCanvasElement};

pub mod animation;
pub mod camera;
pub mod config;
pub mod error;
pub mod generation;
pub mod math;
pub mod mesh;
pub mod particles;
pub mod render;
pub mod simulation;

use animation::{ModeSelector, TreeMode};
use camera::OrbitCamera;
use config::SceneConfig;
use error::SceneError;
use render::RenderPipeline;
use simulation::Simulation;

/// Initialize panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    console_log::init_with_level(log::Level::Info).ok();
}

/// Main engine state exposed to JavaScript
#[wasm_bindgen]
pub struct ArixTree {
    /// `None` when the graphics backend is unavailable; the scene still runs
    pipeline: Option<RenderPipeline>,
    simulation: Simulation,
    mode: ModeSelector,
    camera: OrbitCamera,
    width: i32,
    height: i32,
}

#[wasm_bindgen]
impl ArixTree {
    /// Create a new engine instance with the default scene
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> ArixTree {
        Self::attach(canvas, SceneConfig::default())
    }

    /// Create an engine with YAML overrides for the scene configuration
    #[wasm_bindgen]
    pub fn with_config(canvas: HtmlCanvasElement, yaml: &str) -> Result<ArixTree, JsValue> {
        let config = SceneConfig::from_yaml(yaml)?;
        Ok(Self::attach(canvas, config))
    }

    /// Update and render a frame
    #[wasm_bindgen]
    pub fn render(&mut self, dt: f32) {
        self.step(dt);

        if let Some(pipeline) = self.pipeline.as_mut() {
            let snapshot = self.simulation.snapshot();
            pipeline.update_foliage(&snapshot.foliage);
            pipeline.update_instances(&snapshot.baubles, &snapshot.gifts, &snapshot.star);
            pipeline.render(&self.camera);
        }
    }

    /// Resize the canvas
    #[wasm_bindgen]
    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), JsValue> {
        self.width = width;
        self.height = height;
        if let Some(pipeline) = self.pipeline.as_mut() {
            pipeline.resize(width, height)?;
        }
        Ok(())
    }

    /// Select "SCATTERED" or "TREE_SHAPE"
    #[wasm_bindgen]
    pub fn set_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        self.select_mode(mode)?;
        Ok(())
    }

    #[wasm_bindgen]
    pub fn scatter(&mut self) {
        self.mode.select(TreeMode::Scattered);
    }

    #[wasm_bindgen]
    pub fn assemble(&mut self) {
        self.mode.select(TreeMode::TreeShape);
    }

    #[wasm_bindgen]
    pub fn mode(&self) -> String {
        self.mode.current().as_str().to_string()
    }

    /// Raw foliage progress (0 = scattered, 1 = tree)
    #[wasm_bindgen]
    pub fn foliage_progress(&self) -> f32 {
        self.simulation.foliage().progress().value()
    }

    /// Raw ornament progress (0 = scattered, 1 = tree)
    #[wasm_bindgen]
    pub fn ornament_progress(&self) -> f32 {
        self.simulation.ornaments().progress().value()
    }

    /// Orbit camera
    #[wasm_bindgen]
    pub fn orbit(&mut self, delta_x: f32, delta_y: f32) {
        self.camera.orbit(delta_x, delta_y);
    }

    /// Zoom camera
    #[wasm_bindgen]
    pub fn zoom(&mut self, delta: f32) {
        self.camera.zoom(delta);
    }

    /// Whether frames are actually drawn
    #[wasm_bindgen]
    pub fn has_renderer(&self) -> bool {
        self.pipeline.is_some()
    }
}

impl ArixTree {
    fn attach(canvas: HtmlCanvasElement, config: SceneConfig) -> ArixTree {
        let width = canvas.width() as i32;
        let height = canvas.height() as i32;

        let pipeline = match create_pipeline(&canvas, width, height) {
            Ok(pipeline) => Some(pipeline),
            Err(err) => {
                log::error!("renderer unavailable, running headless: {}", err);
                None
            }
        };

        let mut tree = Self::headless(&config);
        tree.pipeline = pipeline;
        tree.width = width;
        tree.height = height;
        tree
    }

    /// Engine without a graphics backend
    pub fn headless(config: &SceneConfig) -> ArixTree {
        log::info!("starting scene with {} entities", config.total_entities());
        let mode = ModeSelector::new(TreeMode::TreeShape);
        Self {
            pipeline: None,
            simulation: Simulation::from_config(config).starting_in(mode.current()),
            mode,
            camera: OrbitCamera::default(),
            width: 0,
            height: 0,
        }
    }

    /// Parse and apply a mode name; returns whether the mode changed
    pub fn select_mode(&mut self, name: &str) -> Result<bool, SceneError> {
        let mode = TreeMode::parse(name)
            .ok_or_else(|| SceneError::invalid(format!("unknown tree mode: {:?}", name)))?;
        Ok(self.mode.select(mode))
    }

    /// Advance the scene and camera without drawing
    pub fn step(&mut self, dt: f32) {
        let mode = self.mode.current();
        self.simulation.advance(dt, mode);
        self.camera.update(dt, mode);
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }
}

fn create_pipeline(canvas: &HtmlCanvasElement, width: i32, height: i32) -> Result<RenderPipeline, SceneError> {
    let gl = canvas
        .get_context("webgl2")
        .map_err(|e| SceneError::graphics(format!("{:?}", e)))?
        .ok_or_else(|| SceneError::graphics("WebGL2 not supported"))?
        .dyn_into::<WebGl2RenderingContext>()
        .map_err(|_| SceneError::graphics("context is not WebGL2"))?;

    RenderPipeline::new(gl, width, height)
}
