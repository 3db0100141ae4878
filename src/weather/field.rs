//! Precomputed wind and temperature lattices.

use glam::Vec3;

use crate::geometry::{lat_lon_deg, lat_lon_to_dir, local_tangent_basis, unit_or};
use crate::noise::NoiseGenerator;
use crate::params::clamp_unit;

/// Returned by [`TemperatureMap::get`] when a lookup falls outside the lattice.
pub const FALLBACK_TEMPERATURE: f32 = 0.5;

/// Regular latitude/longitude lattice with cell centers every `step_deg` degrees.
///
/// Rows run from -90° to +90° inclusive, columns from -180° (exclusive of +180°).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LatLonGrid {
    step_deg: u32,
    rows: usize,
    cols: usize,
}

impl LatLonGrid {
    fn new(step_deg: u32) -> Self {
        let step = step_deg.max(1);
        Self {
            step_deg: step,
            rows: (180 / step) as usize + 1,
            cols: (360 / step) as usize,
        }
    }

    fn len(&self) -> usize {
        self.rows * self.cols
    }

    fn cell_center(&self, idx: usize) -> (f32, f32) {
        let step = self.step_deg as f32;
        let row = idx / self.cols;
        let col = idx % self.cols;
        (-90.0 + row as f32 * step, -180.0 + col as f32 * step)
    }

    /// Nearest cell index for a direction, or `None` for degenerate input.
    fn nearest(&self, p: Vec3) -> Option<usize> {
        let (lat, lon) = lat_lon_deg(p)?;
        let step = self.step_deg as f32;
        let row = ((lat + 90.0) / step).round() as i64;
        let col = ((lon + 180.0) / step).round() as i64;
        if row < 0 || row as usize >= self.rows {
            return None;
        }
        let col = col.rem_euclid(self.cols as i64) as usize;
        Some(row as usize * self.cols + col)
    }
}

/// Unit wind vectors on a 10° lattice.
///
/// Each cell combines a Coriolis-like meridional term `sin(lat)·0.8` with a
/// banded trade-wind zonal term `cos(3·lat)·0.6`, both perturbed by noise.
#[derive(Debug, Clone)]
pub struct GlobalWindField {
    grid: LatLonGrid,
    vectors: Vec<Vec3>,
}

impl GlobalWindField {
    pub const STEP_DEG: u32 = 10;

    pub fn new(noise: &NoiseGenerator) -> Self {
        let grid = LatLonGrid::new(Self::STEP_DEG);
        let vectors = (0..grid.len())
            .map(|idx| {
                let (lat, lon) = grid.cell_center(idx);
                let p = lat_lon_to_dir(lat, lon);
                let (east, north) = local_tangent_basis(p);
                let lat_rad = lat.to_radians();

                let coriolis = lat_rad.sin() * 0.8 + noise.sample_vec(p * 2.0) * 0.2;
                let trade = (3.0 * lat_rad).cos() * 0.6
                    + noise.sample_vec(p * 2.0 + Vec3::splat(17.5)) * 0.2;

                unit_or(east * trade + north * coriolis, unit_or(east, Vec3::X))
            })
            .collect();
        Self { grid, vectors }
    }

    /// Wind at the lattice cell nearest `p`. Degenerate input gets `+X`.
    pub fn wind_at(&self, p: Vec3) -> Vec3 {
        self.grid
            .nearest(p)
            .and_then(|idx| self.vectors.get(idx).copied())
            .unwrap_or(Vec3::X)
    }

    pub fn cell_count(&self) -> usize {
        self.vectors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vec3> {
        self.vectors.iter()
    }
}

/// Normalized temperature on a 5° lattice: warm equator, cold poles.
#[derive(Debug, Clone)]
pub struct TemperatureMap {
    grid: LatLonGrid,
    values: Vec<f32>,
}

impl TemperatureMap {
    pub const STEP_DEG: u32 = 5;

    pub fn new(noise: &NoiseGenerator) -> Self {
        let grid = LatLonGrid::new(Self::STEP_DEG);
        let values = (0..grid.len())
            .map(|idx| {
                let (lat, lon) = grid.cell_center(idx);
                let p = lat_lon_to_dir(lat, lon);
                let variation = noise.sample_vec(p * 3.0 + Vec3::splat(41.25)) * 0.2;
                clamp_unit(lat.to_radians().cos() + variation)
            })
            .collect();
        Self { grid, values }
    }

    /// Temperature at the lattice cell nearest `p`, or
    /// [`FALLBACK_TEMPERATURE`] if `p` has no valid cell.
    pub fn get(&self, p: Vec3) -> f32 {
        self.grid
            .nearest(p)
            .and_then(|idx| self.values.get(idx).copied())
            .unwrap_or(FALLBACK_TEMPERATURE)
    }

    pub fn cell_count(&self) -> usize {
        self.values.len()
    }
}
