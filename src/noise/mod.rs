//! Noise generation module for terrain, cloud, ring, moon, temporal and
//! weather synthesis.
//!
//! A single generator type keyed by seed; independent channels are obtained by
//! offsetting the seed (see [`NoiseChannel`]).

mod gradient;
mod fractal;

pub use gradient::{NoiseChannel, NoiseGenerator};
pub use fractal::{FractalNoiseConfig, Octave, sample_fractal, sample_weighted};
