//! Texture map generation.

use image::RgbaImage;
use rayon::prelude::*;
use thiserror::Error;

use crate::geometry::{PolarCoord, SphericalCoord};
use crate::palette::{get_palette, rgb_to_rgba8};
use crate::params::PlanetParameters;
use crate::terrain::{moon_brightness, TerrainSynth};

/// Errors that can occur during texture synthesis.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TextureError {
    #[error("Invalid texture dimensions: {0}x{1}")]
    InvalidDimensions(u32, u32),
}

/// Scalar height samples of an equirectangular map, row-major.
#[derive(Debug, Clone)]
pub struct HeightField {
    pub width: u32,
    pub height: u32,
    pub data: Vec<f32>,
}

impl HeightField {
    /// Height at texel `(x, y)`.
    ///
    /// # Panics
    /// Panics if x or y is out of bounds.
    pub fn get(&self, x: u32, y: u32) -> f32 {
        debug_assert!(x < self.width && y < self.height);
        self.data[texel_index(x, y, self.width)]
    }

    /// Returns (min, max) over all samples.
    pub fn range(&self) -> (f32, f32) {
        self.data
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &h| (lo.min(h), hi.max(h)))
    }

    /// Fraction of texels at or above `sea_level`.
    pub fn land_fraction(&self, sea_level: f32) -> f32 {
        if self.data.is_empty() {
            return 0.0;
        }
        let land = self.data.iter().filter(|&&h| h >= sea_level).count();
        land as f32 / self.data.len() as f32
    }
}

/// Height field plus palette-colored surface texture.
#[derive(Debug, Clone)]
pub struct SurfaceMaps {
    pub heights: HeightField,
    pub color: RgbaImage,
}

/// Row-major buffer index of texel `(x, y)`, computed in `usize`.
#[inline]
fn texel_index(x: u32, y: u32, width: u32) -> usize {
    y as usize * width as usize + x as usize
}

/// Inverse of [`texel_index`].
#[inline]
fn texel_coords(i: usize, width: u32) -> (u32, u32) {
    let w = width as usize;
    ((i % w) as u32, (i / w) as u32)
}

fn check_dims(width: u32, height: u32) -> Result<(), TextureError> {
    if width == 0 || height == 0 {
        return Err(TextureError::InvalidDimensions(width, height));
    }
    Ok(())
}

/// Fills an RGBA image in parallel, one texel at a time.
fn par_fill<F>(width: u32, height: u32, texel: F) -> Result<RgbaImage, TextureError>
where
    F: Fn(u32, u32) -> [u8; 4] + Sync,
{
    check_dims(width, height)?;
    let mut img = RgbaImage::new(width, height);
    img.par_chunks_mut(4).enumerate().for_each(|(i, px)| {
        let (x, y) = texel_coords(i, width);
        px.copy_from_slice(&texel(x, y));
    });
    Ok(img)
}

/// Generates the surface height field and its palette-colored texture.
pub fn generate_surface_maps(
    synth: &TerrainSynth,
    params: &PlanetParameters,
    width: u32,
    height: u32,
) -> Result<SurfaceMaps, TextureError> {
    check_dims(width, height)?;

    let mut data = vec![0.0f32; (width as usize) * (height as usize)];
    data.par_iter_mut().enumerate().for_each(|(i, h)| {
        let (x, y) = texel_coords(i, width);
        let coord = SphericalCoord::from_texel(x, y, width, height);
        *h = synth.generate_height(params, &coord);
    });

    let palette = get_palette(params.climate);
    let sea_level = params.sea_level();
    let color = par_fill(width, height, |x, y| {
        palette.color_at_rgba8(data[texel_index(x, y, width)], sea_level)
    })?;

    Ok(SurfaceMaps {
        heights: HeightField { width, height, data },
        color,
    })
}

/// Generates the cloud layer: white texels with density in the alpha channel.
pub fn generate_cloud_map(
    synth: &TerrainSynth,
    params: &PlanetParameters,
    width: u32,
    height: u32,
) -> Result<RgbaImage, TextureError> {
    par_fill(width, height, |x, y| {
        let coord = SphericalCoord::from_texel(x, y, width, height);
        let density = synth.generate_cloud_density(params, &coord);
        [255, 255, 255, (density * 255.0).round() as u8]
    })
}

/// Generates the square ring texture centered on the image.
pub fn generate_ring_map(
    synth: &TerrainSynth,
    params: &PlanetParameters,
    width: u32,
    height: u32,
) -> Result<RgbaImage, TextureError> {
    par_fill(width, height, |x, y| {
        synth.generate_ring_texel(params, PolarCoord::from_texel(x, y, width, height))
    })
}

/// Generates the grayscale moon texture.
pub fn generate_moon_map(
    synth: &TerrainSynth,
    params: &PlanetParameters,
    width: u32,
    height: u32,
) -> Result<RgbaImage, TextureError> {
    par_fill(width, height, |x, y| {
        let coord = SphericalCoord::from_texel(x, y, width, height);
        let b = moon_brightness(synth.generate_moon_height(params, &coord));
        rgb_to_rgba8(glam::Vec3::splat(b), 255)
    })
}

/// Mean alpha of an RGBA image in [0, 1].
pub fn alpha_coverage(img: &RgbaImage) -> f32 {
    let n = (img.width() as u64) * (img.height() as u64);
    if n == 0 {
        return 0.0;
    }
    let sum: u64 = img.pixels().map(|p| p.0[3] as u64).sum();
    sum as f32 / (n as f32 * 255.0)
}
