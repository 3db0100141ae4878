//! Planet parameter model.
//!
//! `PlanetParameters` is the immutable base snapshot supplied by the control
//! layer. The core never mutates it; evolved and clamped variants are derived
//! copies.

mod planet;
mod temporal;

pub use planet::{PlanetParameters, PlanetPreset, PresetError};
pub use temporal::TemporalSettings;

/// Clamps a ratio into [0, 1]. NaN collapses to 0.
#[inline]
pub fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Clamps into `[min, max]`, mapping NaN to `min`.
#[inline]
pub fn clamp_range(value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}
