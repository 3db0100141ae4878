//! Per-texel sampling recipes for planet, cloud, ring and moon textures.

use glam::Vec3;

use crate::geometry::{PolarCoord, SphericalCoord};
use crate::noise::{
    FractalNoiseConfig, NoiseChannel, NoiseGenerator, Octave, sample_fractal, sample_weighted,
};
use crate::palette::{get_palette, rgb_to_rgba8};
use crate::params::{clamp_unit, PlanetParameters};

/// Inner and outer edge of the ring annulus, as a fraction of the texture half-width.
pub const RING_INNER_RADIUS: f32 = 0.4;
pub const RING_OUTER_RADIUS: f32 = 0.9;
const RING_EDGE_SOFTNESS: f32 = 0.03;

const ICY_RING_TINT: Vec3 = Vec3::new(0.80, 0.84, 0.90);
const DUSTY_RING_TINT: Vec3 = Vec3::new(0.80, 0.70, 0.55);

/// Holds one noise generator per texture channel for a planet seed.
///
/// Generators are built once and only read afterwards, so a synth can be
/// shared across rayon workers. The noise seed is fixed at construction; the
/// `seed` field of parameters passed to the sampling methods is not consulted.
#[derive(Debug, Clone)]
pub struct TerrainSynth {
    seed: u64,
    terrain: NoiseGenerator,
    clouds: NoiseGenerator,
    rings: NoiseGenerator,
    moon: NoiseGenerator,
}

impl TerrainSynth {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            terrain: NoiseGenerator::for_channel(seed, NoiseChannel::Terrain),
            clouds: NoiseGenerator::for_channel(seed, NoiseChannel::Clouds),
            rings: NoiseGenerator::for_channel(seed, NoiseChannel::Rings),
            moon: NoiseGenerator::for_channel(seed, NoiseChannel::Moon),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Surface height in [0, 1].
    ///
    /// Two low octaves follow coastline complexity; two high octaves follow
    /// mountain density and are weighted by it, so flat worlds lose relief.
    pub fn generate_height(&self, params: &PlanetParameters, coord: &SphericalCoord) -> f32 {
        let sum = sample_weighted(&self.terrain, coord.point, &terrain_octaves(params));
        clamp_unit((sum + 1.0) * 0.5)
    }

    /// Cloud coverage in [0, 1], already scaled by the `clouds` parameter.
    pub fn generate_cloud_density(&self, params: &PlanetParameters, coord: &SphericalCoord) -> f32 {
        let sum = sample_fractal(&self.clouds, coord.point, &FractalNoiseConfig::clouds());
        clamp_unit((sum + 0.1) * 1.6) * clamp_unit(params.clouds)
    }

    /// RGBA texel of the ring texture; fully transparent outside the annulus.
    pub fn generate_ring_texel(&self, params: &PlanetParameters, polar: PolarCoord) -> [u8; 4] {
        let r = polar.radius;
        if !(RING_INNER_RADIUS..=RING_OUTER_RADIUS).contains(&r) {
            return [0, 0, 0, 0];
        }

        let (sin_a, cos_a) = polar.angle.sin_cos();
        let bands = self.rings.sample(r * 40.0, cos_a * 0.5, sin_a * 0.5);
        let grain = self.rings.sample(r * 140.0, 11.0, 7.0) * 0.3;
        let density = clamp_unit((bands * 0.7 + grain + 1.0) * 0.5);

        let edge = ((r - RING_INNER_RADIUS) / RING_EDGE_SOFTNESS)
            .min((RING_OUTER_RADIUS - r) / RING_EDGE_SOFTNESS)
            .clamp(0.0, 1.0);
        let alpha = density * clamp_unit(params.ring_density) * edge;

        let tint = if clamp_unit(params.climate) < 0.5 {
            ICY_RING_TINT
        } else {
            DUSTY_RING_TINT
        };
        rgb_to_rgba8(tint * (0.7 + 0.3 * density), (alpha * 255.0).round() as u8)
    }

    /// Moon relief in [0, 1].
    ///
    /// `moon_size` only decides whether a moon exists and how large it is
    /// drawn; the relief depends on the seed alone, so resizing a moon keeps
    /// its features in place.
    pub fn generate_moon_height(&self, _params: &PlanetParameters, coord: &SphericalCoord) -> f32 {
        let n = sample_fractal(&self.moon, coord.point, &FractalNoiseConfig::moon());
        clamp_unit((n + 1.0) * 0.5)
    }

    /// Palette color of the surface at `coord`, using the sea level implied by
    /// the parameters' land/water ratio.
    pub fn surface_color(&self, params: &PlanetParameters, coord: &SphericalCoord) -> [u8; 4] {
        let height = self.generate_height(params, coord);
        get_palette(params.climate).color_at_rgba8(height, params.sea_level())
    }
}

/// Terrain octave stack for the given parameters.
///
/// Weights 0.4 and 0.25 on the coastline octaves (1× and 2× the low
/// frequency); 0.15 and 0.1 scaled by mountain density on the mountain octaves
/// (4× and 8× the high frequency).
pub fn terrain_octaves(params: &PlanetParameters) -> [Octave; 4] {
    let coastline = clamp_unit(params.coastline_complexity);
    let mountains = clamp_unit(params.mountain_density);
    let low = 1.5 + coastline * 2.5;
    let high = 2.0 + mountains * 4.0;
    [
        Octave::new(low, 0.4),
        Octave::new(low * 2.0, 0.25),
        Octave::new(high * 4.0, 0.15 * mountains),
        Octave::new(high * 8.0, 0.1 * mountains),
    ]
}

/// Grayscale brightness of the moon surface for a relief value.
pub fn moon_brightness(height: f32) -> f32 {
    0.3 + clamp_unit(height) * 0.4
}
