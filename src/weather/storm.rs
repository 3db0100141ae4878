//! Storm records and their intensity envelope.

use std::f32::consts::TAU;
use std::fmt;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::WeatherConfig;
use crate::geometry::unit_or;

/// Kind of storm. Chosen uniformly on spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StormType {
    Thunderstorm,
    Cyclone,
    Dust,
    Aurora,
}

impl StormType {
    pub fn all() -> [StormType; 4] {
        [
            StormType::Thunderstorm,
            StormType::Cyclone,
            StormType::Dust,
            StormType::Aurora,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            StormType::Thunderstorm => "thunderstorm",
            StormType::Cyclone => "cyclone",
            StormType::Dust => "dust",
            StormType::Aurora => "aurora",
        }
    }
}

impl fmt::Display for StormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fraction of the lifespan spent ramping up, and where the ramp-down starts.
pub const RAMP_UP_END: f32 = 0.2;
pub const RAMP_DOWN_START: f32 = 0.8;

/// Intensity multiplier in [0, 1] for a storm `age` seconds into `lifespan`.
///
/// Linear ramp-up over the first 20%, plateau, linear ramp-down over the
/// final 20%.
pub fn envelope(age: f32, lifespan: f32) -> f32 {
    if lifespan.is_nan() || lifespan <= 0.0 || !age.is_finite() {
        return 0.0;
    }
    let p = (age / lifespan).clamp(0.0, 1.0);
    let k = if p < RAMP_UP_END {
        p / RAMP_UP_END
    } else if p < RAMP_DOWN_START {
        1.0
    } else {
        (1.0 - p) / (1.0 - RAMP_DOWN_START)
    };
    k.clamp(0.0, 1.0)
}

/// A single storm owned by the simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StormSystem {
    pub id: u64,
    pub kind: StormType,
    pub position: Vec3,
    pub radius: f32,
    pub intensity: f32,
    /// Envelope plateau value.
    pub peak_intensity: f32,
    /// Rotation phase in radians, wrapped to [0, 2π).
    pub rotation: f32,
    pub age: f32,
    pub lifespan: f32,
}

impl StormSystem {
    /// Rolls a new storm of `kind` with type-specific size, strength and placement.
    pub fn spawn<R: Rng>(id: u64, kind: StormType, rng: &mut R, cfg: &WeatherConfig) -> Self {
        let dir = random_unit(rng);
        let (lo, hi) = ordered(cfg.spawn_inner_radius, cfg.spawn_outer_radius);
        let altitude = if hi > lo { rng.random_range(lo..=hi) } else { lo };
        let (lmin, lmax) = ordered(cfg.min_lifespan.max(1e-3), cfg.max_lifespan.max(1e-3));

        let mut storm = Self {
            id,
            kind,
            position: dir * altitude,
            radius: rng.random_range(0.05..=0.15),
            intensity: 0.0,
            peak_intensity: rng.random_range(0.4..=0.8),
            rotation: rng.random_range(0.0..TAU),
            age: 0.0,
            lifespan: if lmax > lmin { rng.random_range(lmin..=lmax) } else { lmin },
        };

        match kind {
            StormType::Thunderstorm => {}
            StormType::Cyclone => {
                storm.radius *= 2.0;
                storm.lifespan *= 1.5;
                storm.peak_intensity = (storm.peak_intensity + 0.2).min(1.0);
            }
            StormType::Dust => {
                storm.radius *= 1.5;
                storm.peak_intensity *= 0.6;
                storm.position = dir * cfg.dust_altitude;
            }
            StormType::Aurora => {
                storm.radius *= 0.6;
                let side = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
                storm.position = Vec3::new(
                    side * cfg.aurora_altitude,
                    rng.random_range(-0.1..=0.1),
                    rng.random_range(-0.1..=0.1),
                );
            }
        }
        storm
    }

    /// Lifetime progress in [0, 1].
    pub fn progress(&self) -> f32 {
        if self.lifespan > 0.0 {
            (self.age / self.lifespan).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    pub fn is_ramping_up(&self) -> bool {
        self.progress() < RAMP_UP_END
    }

    /// Point on the unit sphere directly beneath the storm.
    pub fn ground_point(&self) -> Vec3 {
        unit_or(self.position, Vec3::X)
    }

    /// Influence at `p`: intensity with linear falloff to zero at `radius`.
    ///
    /// Distance is measured between surface foot points, so a storm riding
    /// at altitude still acts on the ground below it.
    pub fn influence_at(&self, p: Vec3) -> f32 {
        if self.radius.is_nan() || self.radius <= 0.0 {
            return 0.0;
        }
        let d = unit_or(p, Vec3::X).distance(self.ground_point());
        (self.intensity * (1.0 - d / self.radius)).max(0.0)
    }

    /// Ages the storm by `dt`, spinning it and drifting it along `wind`.
    ///
    /// Drift keeps the storm at its current altitude.
    pub(crate) fn advance(&mut self, dt: f32, wind: Vec3, cfg: &WeatherConfig) {
        self.age += dt;
        self.rotation = (self.rotation + self.intensity * dt * cfg.rotation_rate).rem_euclid(TAU);

        let altitude = self.position.length();
        let moved = self.position + wind * dt * cfg.drift_scale;
        self.position = unit_or(moved, unit_or(self.position, Vec3::X)) * altitude;

        self.intensity = self.peak_intensity * envelope(self.age, self.lifespan);
    }
}

/// Uniformly distributed direction on the unit sphere.
pub(crate) fn random_unit<R: Rng>(rng: &mut R) -> Vec3 {
    let z: f32 = rng.random_range(-1.0..=1.0);
    let phi: f32 = rng.random_range(0.0..TAU);
    let r = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(r * phi.cos(), z, r * phi.sin())
}

fn ordered(a: f32, b: f32) -> (f32, f32) {
    if a <= b { (a, b) } else { (b, a) }
}
