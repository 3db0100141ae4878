//! Temporal control knobs.

use serde::{Deserialize, Serialize};

use super::{clamp_range, clamp_unit};

/// Knobs governing how base parameters drift over simulated time.
///
/// Ranges:
/// - `ocean_level`: [-0.5, 0.5]
/// - `time_speed`: [0.1, 10]
/// - everything else: [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalSettings {
    /// Strength of mountain building over geological time.
    pub tectonic_activity: f32,
    /// Offset added to the land/water ratio (negative floods land).
    pub ocean_level: f32,
    /// Drift of atmospheric density over time.
    pub atmospheric_evolution: f32,
    /// Enables geological drift of mountains, coastline and oceans when > 0.
    pub geological_time: f32,
    /// Seasonal cloud/atmosphere oscillation strength.
    pub weather_cycle: f32,
    /// Long-term climate drift strength.
    pub climatic_shift: f32,
    /// Coastline smoothing due to erosion.
    pub erosion_level: f32,
    /// Simulated years per real second.
    pub time_speed: f32,
    /// Gates aurora, meteor shower and solar flare flags.
    pub show_temporal_effects: bool,
}

impl Default for TemporalSettings {
    fn default() -> Self {
        Self {
            tectonic_activity: 0.5,
            ocean_level: 0.0,
            atmospheric_evolution: 0.0,
            geological_time: 0.0,
            weather_cycle: 0.0,
            climatic_shift: 0.0,
            erosion_level: 0.0,
            time_speed: 1.0,
            show_temporal_effects: true,
        }
    }
}

impl TemporalSettings {
    /// A static planet: every evolution knob off.
    pub fn frozen() -> Self {
        Self {
            tectonic_activity: 0.0,
            show_temporal_effects: false,
            ..Default::default()
        }
    }

    /// Every evolution branch enabled at moderate strength.
    pub fn active() -> Self {
        Self {
            tectonic_activity: 0.7,
            ocean_level: 0.0,
            atmospheric_evolution: 0.5,
            geological_time: 0.6,
            weather_cycle: 0.6,
            climatic_shift: 0.4,
            erosion_level: 0.3,
            time_speed: 1.0,
            show_temporal_effects: true,
        }
    }

    /// Returns a copy with every knob clamped into its declared range.
    pub fn clamped(&self) -> Self {
        Self {
            tectonic_activity: clamp_unit(self.tectonic_activity),
            ocean_level: clamp_range(self.ocean_level, -0.5, 0.5),
            atmospheric_evolution: clamp_unit(self.atmospheric_evolution),
            geological_time: clamp_unit(self.geological_time),
            weather_cycle: clamp_unit(self.weather_cycle),
            climatic_shift: clamp_unit(self.climatic_shift),
            erosion_level: clamp_unit(self.erosion_level),
            time_speed: clamp_range(self.time_speed, 0.1, 10.0),
            show_temporal_effects: self.show_temporal_effects,
        }
    }
}
