//! Base planet parameters and named presets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{clamp_unit, TemporalSettings};

/// Base parameter snapshot describing a planet.
///
/// All ratios are in [0, 1]. Out-of-range values are tolerated on input and
/// clamped by every consumer (see [`PlanetParameters::clamped`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetParameters {
    /// Master seed for all noise channels.
    pub seed: u64,
    /// Fraction of the surface above sea level. Sea level is `1 - land_water_ratio`.
    pub land_water_ratio: f32,
    /// Frequency of the low terrain octaves (coastline wiggle).
    pub coastline_complexity: f32,
    /// Weight and frequency of the high terrain octaves.
    pub mountain_density: f32,
    /// 0 = frozen, 1 = arid. Selects the color palette.
    pub climate: f32,
    /// Atmosphere thickness.
    pub atmosphere: f32,
    /// Cloud coverage.
    pub clouds: f32,
    /// Ring opacity; 0 disables rings.
    pub ring_density: f32,
    /// Moon scale; 0 disables the moon.
    pub moon_size: f32,
    /// Temporal evolution knobs.
    pub temporal: TemporalSettings,
}

impl Default for PlanetParameters {
    fn default() -> Self {
        Self {
            seed: 42,
            land_water_ratio: 0.4,
            coastline_complexity: 0.5,
            mountain_density: 0.3,
            climate: 0.5,
            atmosphere: 0.6,
            clouds: 0.5,
            ring_density: 0.0,
            moon_size: 0.3,
            temporal: TemporalSettings::default(),
        }
    }
}

impl PlanetParameters {
    /// Default parameters with the given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Temperate, Earth-like world.
    pub fn earth_like(seed: u64) -> Self {
        Self::with_seed(seed)
    }

    /// Hot, dry, mostly land.
    pub fn desert(seed: u64) -> Self {
        Self {
            seed,
            land_water_ratio: 0.85,
            coastline_complexity: 0.3,
            mountain_density: 0.4,
            climate: 0.95,
            atmosphere: 0.3,
            clouds: 0.1,
            ..Default::default()
        }
    }

    /// Scattered islands in a global ocean.
    pub fn ocean_world(seed: u64) -> Self {
        Self {
            seed,
            land_water_ratio: 0.12,
            coastline_complexity: 0.8,
            mountain_density: 0.15,
            climate: 0.6,
            atmosphere: 0.8,
            clouds: 0.75,
            ..Default::default()
        }
    }

    /// Frozen world with thin atmosphere.
    pub fn ice_world(seed: u64) -> Self {
        Self {
            seed,
            land_water_ratio: 0.55,
            coastline_complexity: 0.4,
            mountain_density: 0.35,
            climate: 0.0,
            atmosphere: 0.35,
            clouds: 0.3,
            moon_size: 0.5,
            ..Default::default()
        }
    }

    /// Rugged, tectonically restless world.
    pub fn volcanic(seed: u64) -> Self {
        Self {
            seed,
            land_water_ratio: 0.7,
            coastline_complexity: 0.9,
            mountain_density: 0.9,
            climate: 0.8,
            atmosphere: 0.9,
            clouds: 0.6,
            temporal: TemporalSettings {
                tectonic_activity: 1.0,
                geological_time: 0.8,
                ..TemporalSettings::default()
            },
            ..Default::default()
        }
    }

    /// Cold world with dense rings and a large moon.
    pub fn ringed_giant(seed: u64) -> Self {
        Self {
            seed,
            land_water_ratio: 0.3,
            climate: 0.3,
            atmosphere: 0.9,
            clouds: 0.8,
            ring_density: 0.85,
            moon_size: 0.7,
            ..Default::default()
        }
    }

    /// Returns a copy with every field clamped into its declared range.
    pub fn clamped(&self) -> Self {
        Self {
            seed: self.seed,
            land_water_ratio: clamp_unit(self.land_water_ratio),
            coastline_complexity: clamp_unit(self.coastline_complexity),
            mountain_density: clamp_unit(self.mountain_density),
            climate: clamp_unit(self.climate),
            atmosphere: clamp_unit(self.atmosphere),
            clouds: clamp_unit(self.clouds),
            ring_density: clamp_unit(self.ring_density),
            moon_size: clamp_unit(self.moon_size),
            temporal: self.temporal.clamped(),
        }
    }

    /// Height threshold separating water from land.
    pub fn sea_level(&self) -> f32 {
        1.0 - clamp_unit(self.land_water_ratio)
    }

    pub fn has_rings(&self) -> bool {
        self.ring_density > 0.0
    }

    pub fn has_moon(&self) -> bool {
        self.moon_size > 0.0
    }
}

/// Errors raised while resolving a preset by name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PresetError {
    #[error("Unknown preset '{0}' (expected one of: {1})")]
    Unknown(String, String),
}

/// Named starting points for [`PlanetParameters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanetPreset {
    EarthLike,
    Desert,
    OceanWorld,
    IceWorld,
    Volcanic,
    RingedGiant,
}

impl PlanetPreset {
    pub fn all() -> [PlanetPreset; 6] {
        [
            PlanetPreset::EarthLike,
            PlanetPreset::Desert,
            PlanetPreset::OceanWorld,
            PlanetPreset::IceWorld,
            PlanetPreset::Volcanic,
            PlanetPreset::RingedGiant,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            PlanetPreset::EarthLike => "earth-like",
            PlanetPreset::Desert => "desert",
            PlanetPreset::OceanWorld => "ocean-world",
            PlanetPreset::IceWorld => "ice-world",
            PlanetPreset::Volcanic => "volcanic",
            PlanetPreset::RingedGiant => "ringed-giant",
        }
    }

    /// Builds the preset's parameters for `seed`.
    pub fn parameters(&self, seed: u64) -> PlanetParameters {
        match self {
            PlanetPreset::EarthLike => PlanetParameters::earth_like(seed),
            PlanetPreset::Desert => PlanetParameters::desert(seed),
            PlanetPreset::OceanWorld => PlanetParameters::ocean_world(seed),
            PlanetPreset::IceWorld => PlanetParameters::ice_world(seed),
            PlanetPreset::Volcanic => PlanetParameters::volcanic(seed),
            PlanetPreset::RingedGiant => PlanetParameters::ringed_giant(seed),
        }
    }
}

impl fmt::Display for PlanetPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlanetPreset {
    type Err = PresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        PlanetPreset::all()
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = PlanetPreset::all().iter().map(|p| p.name()).collect();
                PresetError::Unknown(s.to_string(), names.join(", "))
            })
    }
}
