//! Terrain field synthesis.
//!
//! Pure per-texel sampling functions for the planet surface, cloud layer,
//! rings and moon. Whole textures are assembled in [`crate::textures`].

mod synth;

pub use synth::{
    TerrainSynth, terrain_octaves, moon_brightness, RING_INNER_RADIUS, RING_OUTER_RADIUS,
};
