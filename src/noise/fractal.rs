//! Multi-octave fractal Brownian motion (fBm) over a [`NoiseGenerator`].

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::NoiseGenerator;

/// Configuration for multi-octave fractal noise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FractalNoiseConfig {
    /// Number of noise octaves.
    pub octaves: u8,
    /// Base frequency of the noise.
    pub frequency: f32,
    /// Frequency multiplier per octave (typically 2.0).
    pub lacunarity: f32,
    /// Amplitude decay per octave.
    pub persistence: f32,
}

impl Default for FractalNoiseConfig {
    fn default() -> Self {
        Self {
            octaves: 4,
            frequency: 2.0,
            lacunarity: 2.0,
            persistence: 0.5,
        }
    }
}

impl FractalNoiseConfig {
    /// Cloud layer: four octaves at 3, 6, 12 and 24.
    pub fn clouds() -> Self {
        Self {
            octaves: 4,
            frequency: 3.0,
            lacunarity: 2.0,
            persistence: 0.5,
        }
    }

    /// Smoother two-octave relief for the moon.
    pub fn moon() -> Self {
        Self {
            octaves: 2,
            frequency: 4.0,
            lacunarity: 2.0,
            persistence: 0.5,
        }
    }
}

/// One explicit (frequency, weight) layer of a hand-tuned octave stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Octave {
    pub frequency: f32,
    pub weight: f32,
}

impl Octave {
    pub fn new(frequency: f32, weight: f32) -> Self {
        Self { frequency, weight }
    }
}

/// Samples fractal noise at a 3D position (typically on a unit sphere).
///
/// The sum is normalized by the total amplitude, so the result stays in [-1, 1].
pub fn sample_fractal(noise: &NoiseGenerator, pos: Vec3, config: &FractalNoiseConfig) -> f32 {
    let mut total = 0.0f32;
    let mut amplitude = 1.0f32;
    let mut frequency = config.frequency;
    let mut max_amplitude = 0.0f32;

    for _ in 0..config.octaves {
        total += noise.sample_vec(pos * frequency) * amplitude;
        max_amplitude += amplitude;
        amplitude *= config.persistence;
        frequency *= config.lacunarity;
    }

    if max_amplitude <= 0.0 {
        return 0.0;
    }
    (total / max_amplitude).clamp(-1.0, 1.0)
}

/// Weighted sum of explicit octaves. Not normalized: the caller owns the weights.
pub fn sample_weighted(noise: &NoiseGenerator, pos: Vec3, octaves: &[Octave]) -> f32 {
    octaves
        .iter()
        .map(|o| noise.sample_vec(pos * o.frequency) * o.weight)
        .sum()
}
