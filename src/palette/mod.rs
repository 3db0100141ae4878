//! Climate palettes and height-banded terrain coloring.
//!
//! `get_palette(climate)` blends the two palettes adjacent to the climate value;
//! `ColorPalette::color_at` classifies a height against sea level into seven
//! bands and interpolates within each.

mod table;

use glam::Vec3;

use crate::params::clamp_unit;
use table::{PALETTES, PALETTE_COUNT};

/// The eight terrain anchor colors of a palette, RGB in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteColors {
    pub deep_ocean: Vec3,
    pub shallow_water: Vec3,
    pub beach: Vec3,
    pub lowland: Vec3,
    pub highland: Vec3,
    pub mountain: Vec3,
    pub peak: Vec3,
    pub polar: Vec3,
}

impl PaletteColors {
    /// Anchors in band order, deep ocean first.
    pub fn anchors(&self) -> [Vec3; 8] {
        [
            self.deep_ocean,
            self.shallow_water,
            self.beach,
            self.lowland,
            self.highland,
            self.mountain,
            self.peak,
            self.polar,
        ]
    }

    fn from_anchors(a: [Vec3; 8]) -> Self {
        Self {
            deep_ocean: a[0],
            shallow_water: a[1],
            beach: a[2],
            lowland: a[3],
            highland: a[4],
            mountain: a[5],
            peak: a[6],
            polar: a[7],
        }
    }

    fn lerp(&self, other: &PaletteColors, t: f32) -> Self {
        let a = self.anchors();
        let b = other.anchors();
        let mut out = a;
        for (o, (x, y)) in out.iter_mut().zip(a.iter().zip(b.iter())) {
            *o = mix(*x, *y, t);
        }
        Self::from_anchors(out)
    }
}

/// A continuous palette for one climate value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPalette {
    pub colors: PaletteColors,
    /// Atmosphere tint, taken from the lower of the two blended palettes.
    pub atmosphere: Vec3,
}

/// Returns the palette for `climate` (clamped into [0, 1]).
pub fn get_palette(climate: f32) -> ColorPalette {
    let scaled = clamp_unit(climate) * (PALETTE_COUNT - 1) as f32;
    let mut index = scaled.floor() as usize;
    let mut fraction = scaled - index as f32;
    if index >= PALETTE_COUNT - 1 {
        index = PALETTE_COUNT - 2;
        fraction = 1.0;
    }

    let lower = PALETTES[index].colors();
    let upper = PALETTES[index + 1].colors();
    ColorPalette {
        colors: lower.lerp(&upper, fraction),
        atmosphere: PALETTES[index].atmosphere(),
    }
}

impl ColorPalette {
    /// Terrain color for a height in [0, 1] given `sea_level`.
    ///
    /// Water below `0.7 * sea_level` is deep ocean, the rest of the water column
    /// blends to shallow water. Above sea level the land fraction
    /// `(h - sea) / (1 - sea)` is banded at 0.05, 0.3, 0.5, 0.7 and 0.9
    /// (beach, lowland, highland, mountain, peak) with polar beyond.
    pub fn color_at(&self, height: f32, sea_level: f32) -> Vec3 {
        let c = &self.colors;
        let h = clamp_unit(height);
        let sea = clamp_unit(sea_level);

        if h < sea {
            let deep_limit = 0.7 * sea;
            if h < deep_limit {
                let t = h / deep_limit;
                return mix(c.deep_ocean, c.shallow_water, 0.5 * t);
            }
            let t = (h - deep_limit) / (sea - deep_limit);
            return mix(c.deep_ocean, c.shallow_water, 0.5 + 0.5 * t);
        }

        let land_span = 1.0 - sea;
        if land_span <= 0.0 {
            return c.shallow_water;
        }
        let land = (h - sea) / land_span;

        let bands = [
            (0.0, 0.05, c.beach, c.lowland),
            (0.05, 0.3, c.lowland, c.highland),
            (0.3, 0.5, c.highland, c.mountain),
            (0.5, 0.7, c.mountain, c.peak),
            (0.7, 0.9, c.peak, c.polar),
        ];
        for (lo, hi, from, to) in bands {
            if land < hi {
                return mix(from, to, (land - lo) / (hi - lo));
            }
        }
        c.polar
    }

    /// [`Self::color_at`] packed as RGBA8.
    pub fn color_at_rgba8(&self, height: f32, sea_level: f32) -> [u8; 4] {
        rgb_to_rgba8(self.color_at(height, sea_level), 255)
    }
}

/// Linear blend that returns `a` exactly at `t = 0` and `b` exactly at `t = 1`.
#[inline]
fn mix(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a * (1.0 - t) + b * t
}

/// Packs an RGB color in [0, 1] and an alpha byte into RGBA8.
pub fn rgb_to_rgba8(color: Vec3, alpha: u8) -> [u8; 4] {
    let c = color.clamp(Vec3::ZERO, Vec3::ONE) * 255.0;
    [c.x.round() as u8, c.y.round() as u8, c.z.round() as u8, alpha]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strictly_between(v: Vec3, a: Vec3, b: Vec3) -> bool {
        (0..3).all(|i| {
            let (lo, hi) = if a[i] < b[i] { (a[i], b[i]) } else { (b[i], a[i]) };
            if lo == hi { (v[i] - lo).abs() < 1e-6 } else { v[i] > lo && v[i] < hi }
        }) && v != a && v != b
    }

    #[test]
    fn test_palette_endpoints() {
        assert_eq!(get_palette(0.0).colors, PALETTES[0].colors());
        assert_eq!(get_palette(1.0).colors, PALETTES[PALETTE_COUNT - 1].colors());
        assert_eq!(get_palette(1.0).atmosphere, PALETTES[PALETTE_COUNT - 2].atmosphere());
    }

    #[test]
    fn test_out_of_range_climate_is_clamped() {
        assert_eq!(get_palette(-3.0), get_palette(0.0));
        assert_eq!(get_palette(7.5), get_palette(1.0));
        assert_eq!(get_palette(f32::NAN), get_palette(0.0));
    }

    #[test]
    fn test_palette_continuity() {
        let eps = 1e-3;
        let bound = (PALETTE_COUNT - 1) as f32 * eps + 1e-4;
        let mut c = 0.0;
        while c + eps <= 1.0 {
            let a = get_palette(c).colors.anchors();
            let b = get_palette(c + eps).colors.anchors();
            for (x, y) in a.iter().zip(b.iter()) {
                let d = (*x - *y).abs().max_element();
                assert!(d <= bound, "palette jump {} at climate {}", d, c);
            }
            c += eps;
        }
    }

    #[test]
    fn test_atmosphere_is_discrete() {
        let just_below = get_palette(0.2499);
        let at = get_palette(0.25);
        assert_eq!(just_below.atmosphere, PALETTES[0].atmosphere());
        assert_eq!(at.atmosphere, PALETTES[1].atmosphere());
    }

    #[test]
    fn test_sea_level_banding() {
        let p = get_palette(0.5);
        let c = p.colors;
        let shallow = p.color_at(0.3, 0.5);
        assert!(strictly_between(shallow, c.deep_ocean, c.shallow_water));
        assert_eq!(p.color_at(0.95, 0.5), c.polar);
        assert_eq!(p.color_at(1.0, 0.5), c.polar);
    }

    #[test]
    fn test_band_boundaries_are_anchor_colors() {
        let p = get_palette(0.5);
        let c = p.colors;
        // land fraction 0 is the beach anchor; 0.5 of the land span is mountain
        assert_eq!(p.color_at(0.5, 0.5), c.beach);
        assert!((p.color_at(0.75, 0.5) - c.mountain).abs().max_element() < 1e-5);
    }

    #[test]
    fn test_water_column_is_continuous_at_deep_limit() {
        let p = get_palette(0.4);
        let below = p.color_at(0.35 - 1e-4, 0.5);
        let above = p.color_at(0.35 + 1e-4, 0.5);
        assert!((below - above).abs().max_element() < 1e-2);
    }

    #[test]
    fn test_degenerate_sea_levels() {
        let p = get_palette(0.5);
        // No water at all: height 0 is the beach.
        assert_eq!(p.color_at(0.0, 0.0), p.colors.beach);
        // All water: everything sits in the water column.
        let top = p.color_at(1.0, 1.0);
        assert!(top.is_finite());
    }

    #[test]
    fn test_rgba8_packing() {
        assert_eq!(rgb_to_rgba8(Vec3::new(1.0, 0.0, 0.5), 128), [255, 0, 128, 128]);
        assert_eq!(rgb_to_rgba8(Vec3::new(2.0, -1.0, 0.0), 255), [255, 0, 0, 255]);
    }
}
