//! Procedural planet generator.
//!
//! This crate synthesizes planet surface, cloud, ring and moon textures from
//! seeded gradient noise and a climate-driven color palette, and evolves the
//! planet over simulated time with a temporal engine and a storm simulator.

pub mod geometry;
pub mod noise;
pub mod params;
pub mod palette;
pub mod terrain;
pub mod textures;
pub mod pipeline;
pub mod temporal;
pub mod weather;
pub mod planet;

pub use self::noise::{NoiseChannel, NoiseGenerator};
pub use params::{PlanetParameters, PlanetPreset, TemporalSettings};
pub use palette::{get_palette, ColorPalette};
pub use terrain::TerrainSynth;
pub use pipeline::{GenerationStage, Pipeline, PlanetTextures, StageConfig};
pub use temporal::{EvolvedParameters, TemporalEffects, TemporalEngine};
pub use weather::{StormSystem, StormType, WeatherConfig, WeatherSimulator};
pub use planet::{Planet, PlanetCommand, PlanetStatus};
