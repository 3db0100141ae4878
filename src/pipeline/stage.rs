//! Generation stage trait and pipeline orchestration.

use image::RgbaImage;
use log::{debug, info};
use thiserror::Error;

use crate::params::PlanetParameters;
use crate::terrain::TerrainSynth;
use crate::textures::{
    generate_cloud_map, generate_moon_map, generate_ring_map, generate_surface_maps,
    SurfaceMaps, TextureError,
};

/// Unique identifier for generation stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageId {
    /// Height field and palette-colored surface.
    Surface,
    /// Cloud alpha layer.
    Clouds,
    /// Ring annulus texture.
    Rings,
    /// Moon grayscale texture.
    Moon,
}

impl StageId {
    /// Returns the name of the stage.
    pub fn name(&self) -> &'static str {
        match self {
            StageId::Surface => "surface",
            StageId::Clouds => "clouds",
            StageId::Rings => "rings",
            StageId::Moon => "moon",
        }
    }
}

/// Texture resolutions for each stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageConfig {
    /// Equirectangular surface map size.
    pub surface_size: (u32, u32),
    /// Equirectangular cloud map size.
    pub cloud_size: (u32, u32),
    /// Square ring texture size.
    pub ring_size: (u32, u32),
    /// Equirectangular moon map size.
    pub moon_size: (u32, u32),
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            surface_size: (1024, 512),
            cloud_size: (1024, 512),
            ring_size: (512, 512),
            moon_size: (256, 128),
        }
    }
}

impl StageConfig {
    /// Every map scaled down by `factor` (at least 1 texel per side).
    pub fn downscaled(factor: u32) -> Self {
        let f = factor.max(1);
        let scale = |(w, h): (u32, u32)| ((w / f).max(1), (h / f).max(1));
        let base = Self::default();
        Self {
            surface_size: scale(base.surface_size),
            cloud_size: scale(base.cloud_size),
            ring_size: scale(base.ring_size),
            moon_size: scale(base.moon_size),
        }
    }
}

/// Textures produced by a pipeline run. A stage that did not run or was
/// skipped leaves its slot as `None`.
#[derive(Debug, Clone, Default)]
pub struct PlanetTextures {
    pub surface: Option<SurfaceMaps>,
    pub clouds: Option<RgbaImage>,
    pub rings: Option<RgbaImage>,
    pub moon: Option<RgbaImage>,
}

/// Errors that can occur during pipeline execution.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("Stage '{0}' failed: {1}")]
    StageFailed(String, String),
}

impl PipelineError {
    fn from_texture(stage: StageId, err: TextureError) -> Self {
        PipelineError::StageFailed(stage.name().to_string(), err.to_string())
    }
}

/// Read-only inputs shared by every stage of a run.
pub struct StageContext<'a> {
    pub synth: &'a TerrainSynth,
    pub params: &'a PlanetParameters,
    pub config: &'a StageConfig,
}

/// Trait for implementing generation stages.
///
/// Stages are independent: each reads the shared synthesizer and parameters and
/// writes exactly one slot of [`PlanetTextures`].
pub trait GenerationStage: Send + Sync {
    /// Returns the unique identifier for this stage.
    fn id(&self) -> StageId;

    /// Returns a human-readable name for the stage.
    fn name(&self) -> &str;

    /// Executes the stage, filling its slot in `out`.
    fn execute(&self, ctx: &StageContext<'_>, out: &mut PlanetTextures) -> Result<(), PipelineError>;
}

/// Orchestrates multiple generation stages into a complete texture set.
pub struct Pipeline {
    stages: Vec<Box<dyn GenerationStage>>,
    config: StageConfig,
}

impl Pipeline {
    /// Creates a new empty pipeline with the given configuration.
    pub fn new(config: StageConfig) -> Self {
        Self {
            stages: Vec::new(),
            config,
        }
    }

    /// Pipeline with surface, cloud, ring and moon stages in that order.
    pub fn standard(config: StageConfig) -> Self {
        let mut pipeline = Self::new(config);
        pipeline
            .add_stage(SurfaceStage)
            .add_stage(CloudStage)
            .add_stage(RingStage)
            .add_stage(MoonStage);
        pipeline
    }

    /// Adds a stage to the pipeline.
    pub fn add_stage<S: GenerationStage + 'static>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Returns the number of stages in the pipeline.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    /// Regenerates every texture from scratch for `params`.
    pub fn run(&self, params: &PlanetParameters) -> Result<PlanetTextures, PipelineError> {
        self.run_with_callbacks(params, |_, _, _| {}, |_, _, _| {})
    }

    /// Executes all stages with progress callbacks.
    ///
    /// # Arguments
    /// * `params` - Parameters to synthesize (clamped before use)
    /// * `on_stage_start` - Called when each stage begins
    /// * `on_stage_complete` - Called when each stage finishes
    pub fn run_with_callbacks<F1, F2>(
        &self,
        params: &PlanetParameters,
        on_stage_start: F1,
        on_stage_complete: F2,
    ) -> Result<PlanetTextures, PipelineError>
    where
        F1: FnMut(&str, usize, usize),
        F2: FnMut(&str, usize, usize),
    {
        let synth = TerrainSynth::new(params.seed);
        self.run_with_synth(&synth, params, on_stage_start, on_stage_complete)
    }

    /// Like [`Pipeline::run_with_callbacks`] but reuses an existing synthesizer.
    pub fn run_with_synth<F1, F2>(
        &self,
        synth: &TerrainSynth,
        params: &PlanetParameters,
        mut on_stage_start: F1,
        mut on_stage_complete: F2,
    ) -> Result<PlanetTextures, PipelineError>
    where
        F1: FnMut(&str, usize, usize),
        F2: FnMut(&str, usize, usize),
    {
        let params = params.clamped();
        let ctx = StageContext {
            synth,
            params: &params,
            config: &self.config,
        };
        let total = self.stages.len();
        let mut out = PlanetTextures::default();

        info!(
            "Regenerating {} texture stage(s) for seed {}",
            total, synth.seed()
        );
        for (i, stage) in self.stages.iter().enumerate() {
            on_stage_start(stage.name(), i, total);
            stage.execute(&ctx, &mut out)?;
            on_stage_complete(stage.name(), i, total);
        }

        Ok(out)
    }
}

/// Height field and colored surface stage.
pub struct SurfaceStage;

impl GenerationStage for SurfaceStage {
    fn id(&self) -> StageId {
        StageId::Surface
    }

    fn name(&self) -> &str {
        "Surface Synthesis"
    }

    fn execute(&self, ctx: &StageContext<'_>, out: &mut PlanetTextures) -> Result<(), PipelineError> {
        let (w, h) = ctx.config.surface_size;
        let maps = generate_surface_maps(ctx.synth, ctx.params, w, h)
            .map_err(|e| PipelineError::from_texture(self.id(), e))?;
        out.surface = Some(maps);
        Ok(())
    }
}

/// Cloud layer stage.
pub struct CloudStage;

impl GenerationStage for CloudStage {
    fn id(&self) -> StageId {
        StageId::Clouds
    }

    fn name(&self) -> &str {
        "Cloud Layer"
    }

    fn execute(&self, ctx: &StageContext<'_>, out: &mut PlanetTextures) -> Result<(), PipelineError> {
        let (w, h) = ctx.config.cloud_size;
        let img = generate_cloud_map(ctx.synth, ctx.params, w, h)
            .map_err(|e| PipelineError::from_texture(self.id(), e))?;
        out.clouds = Some(img);
        Ok(())
    }
}

/// Ring texture stage. Skipped when the planet has no rings.
pub struct RingStage;

impl GenerationStage for RingStage {
    fn id(&self) -> StageId {
        StageId::Rings
    }

    fn name(&self) -> &str {
        "Ring System"
    }

    fn execute(&self, ctx: &StageContext<'_>, out: &mut PlanetTextures) -> Result<(), PipelineError> {
        if !ctx.params.has_rings() {
            debug!("ring_density is 0, skipping ring texture");
            out.rings = None;
            return Ok(());
        }
        let (w, h) = ctx.config.ring_size;
        let img = generate_ring_map(ctx.synth, ctx.params, w, h)
            .map_err(|e| PipelineError::from_texture(self.id(), e))?;
        out.rings = Some(img);
        Ok(())
    }
}

/// Moon texture stage. Skipped when the planet has no moon.
pub struct MoonStage;

impl GenerationStage for MoonStage {
    fn id(&self) -> StageId {
        StageId::Moon
    }

    fn name(&self) -> &str {
        "Moon Surface"
    }

    fn execute(&self, ctx: &StageContext<'_>, out: &mut PlanetTextures) -> Result<(), PipelineError> {
        if !ctx.params.has_moon() {
            debug!("moon_size is 0, skipping moon texture");
            out.moon = None;
            return Ok(());
        }
        let (w, h) = ctx.config.moon_size;
        let img = generate_moon_map(ctx.synth, ctx.params, w, h)
            .map_err(|e| PipelineError::from_texture(self.id(), e))?;
        out.moon = Some(img);
        Ok(())
    }
}
