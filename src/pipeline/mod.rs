//! Pipeline module for orchestrating texture generation stages.
//!
//! Provides a trait-based architecture for modular stages that compose into a
//! complete regeneration of the planet's textures.

mod stage;

pub use stage::{
    GenerationStage, StageId, StageConfig, StageContext, Pipeline, PipelineError,
    PlanetTextures, SurfaceStage, CloudStage, RingStage, MoonStage,
};
