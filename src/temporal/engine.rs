//! Time-driven parameter evolution.

use std::collections::VecDeque;

use log::debug;
use serde::{Deserialize, Serialize};

use super::clock::SimulatedClock;
use super::config::TemporalConfig;
use super::epoch::{epoch_name, time_description};
use crate::noise::{NoiseChannel, NoiseGenerator};
use crate::params::{clamp_unit, PlanetParameters, TemporalSettings};

/// Time-dependent copy of the evolving planet fields.
///
/// Recomputed from the base parameters on every request. Never fed back into
/// the base.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvolvedParameters {
    pub mountain_density: f32,
    pub coastline_complexity: f32,
    pub land_water_ratio: f32,
    pub climate: f32,
    pub atmosphere: f32,
    pub clouds: f32,
}

impl EvolvedParameters {
    /// The unevolved values of `base`, clamped.
    pub fn from_base(base: &PlanetParameters) -> Self {
        Self {
            mountain_density: clamp_unit(base.mountain_density),
            coastline_complexity: clamp_unit(base.coastline_complexity),
            land_water_ratio: clamp_unit(base.land_water_ratio),
            climate: clamp_unit(base.climate),
            atmosphere: clamp_unit(base.atmosphere),
            clouds: clamp_unit(base.clouds),
        }
    }

    /// Overlays the evolved fields on `base`, producing parameters the terrain
    /// synthesizer can render directly.
    pub fn apply_to(&self, base: &PlanetParameters) -> PlanetParameters {
        PlanetParameters {
            mountain_density: self.mountain_density,
            coastline_complexity: self.coastline_complexity,
            land_water_ratio: self.land_water_ratio,
            climate: self.climate,
            atmosphere: self.atmosphere,
            clouds: self.clouds,
            ..base.clone()
        }
    }

    /// Sea level derived from the evolved land/water ratio.
    pub fn sea_level(&self) -> f32 {
        1.0 - self.land_water_ratio
    }
}

/// Transient visual effect flags. Plain threshold tests, not debounced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalEffects {
    pub aurora: bool,
    pub meteor_shower: bool,
    pub solar_flare: bool,
    pub lightning: bool,
    pub dust_storm: bool,
    pub polar_ice_caps: bool,
}

impl TemporalEffects {
    /// Names of the active flags, in declaration order.
    pub fn active(&self) -> Vec<&'static str> {
        [
            (self.aurora, "aurora"),
            (self.meteor_shower, "meteor shower"),
            (self.solar_flare, "solar flare"),
            (self.lightning, "lightning"),
            (self.dust_storm, "dust storm"),
            (self.polar_ice_caps, "polar ice caps"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect()
    }
}

/// Evolved state recorded at a point in simulated time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    pub time: f64,
    pub evolved: EvolvedParameters,
}

// Sampling rates and lanes of the effect noise. The half-cell offsets keep the
// samples off lattice planes, where gradient noise collapses toward zero.
const AURORA_LANE: (f32, f32, f32) = (0.01, 500.5, 0.5);
const METEOR_LANE: (f32, f32, f32) = (0.02, 600.5, 0.5);
const FLARE_LANE: (f32, f32, f32) = (0.005, 700.5, 0.5);
const LIGHTNING_LANE: (f32, f32, f32) = (0.05, 800.5, 0.5);
const DUST_LANE: (f32, f32, f32) = (0.03, 900.5, 0.5);

/// Drives a [`SimulatedClock`] and derives evolved parameters from it.
#[derive(Debug, Clone)]
pub struct TemporalEngine {
    base: PlanetParameters,
    noise: NoiseGenerator,
    clock: SimulatedClock,
    config: TemporalConfig,
    history: VecDeque<HistorySnapshot>,
}

impl TemporalEngine {
    pub fn new(base: &PlanetParameters) -> Self {
        Self::with_config(base, TemporalConfig::default())
    }

    pub fn with_config(base: &PlanetParameters, config: TemporalConfig) -> Self {
        Self {
            base: base.clamped(),
            noise: NoiseGenerator::for_channel(base.seed, NoiseChannel::Temporal),
            clock: SimulatedClock::new(),
            config,
            history: VecDeque::new(),
        }
    }

    pub fn base(&self) -> &PlanetParameters {
        &self.base
    }

    /// Replaces the base parameters, keeping clock and history.
    ///
    /// The temporal noise channel is rebuilt only if the seed changed.
    pub fn set_base(&mut self, base: &PlanetParameters) {
        if base.seed != self.base.seed {
            self.noise = NoiseGenerator::for_channel(base.seed, NoiseChannel::Temporal);
        }
        self.base = base.clamped();
    }

    pub fn current_time(&self) -> f64 {
        self.clock.current_time()
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn pause(&mut self) {
        self.clock.pause();
    }

    pub fn resume(&mut self) {
        self.clock.resume();
    }

    /// Returns the new running state.
    pub fn toggle_running(&mut self) -> bool {
        self.clock.toggle()
    }

    /// Advances the clock by `delta_real_seconds × time_speed` of the base
    /// settings, recording a snapshot whenever a snapshot boundary is crossed.
    pub fn tick(&mut self, delta_real_seconds: f64) {
        let before = self.clock.current_time();
        let speed = self.base.temporal.time_speed as f64;
        if self.clock.tick(delta_real_seconds, speed) > 0.0 {
            self.maybe_snapshot(before);
        }
    }

    /// Jumps ahead by `amount` simulated years. Negative amounts are ignored.
    pub fn fast_forward(&mut self, amount: f64) {
        self.clock.fast_forward(amount);
    }

    /// Zeroes the clock and clears the history.
    pub fn reset(&mut self) {
        self.clock.reset();
        self.history.clear();
    }

    pub fn history(&self) -> impl Iterator<Item = &HistorySnapshot> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn time_description(&self) -> String {
        time_description(self.clock.current_time())
    }

    pub fn epoch_name(&self) -> &'static str {
        epoch_name(self.clock.current_time())
    }

    /// Evolved parameters at the current time.
    ///
    /// Mountain, coastline and land each derive from the base plus a single
    /// perturbation. Clouds and atmosphere layer on top of earlier terms.
    pub fn get_evolved_parameters(&self, settings: &TemporalSettings) -> EvolvedParameters {
        let s = settings.clamped();
        let base = &self.base;
        let t = self.clock.current_time() as f32;
        let n = |x: f32, y: f32, z: f32| self.noise.sample(x, y, z);

        let mut evolved = EvolvedParameters::from_base(base);

        if s.geological_time > 0.0 {
            let geo_scale = s.geological_time * 10.0;
            evolved.mountain_density = clamp_unit(
                base.mountain_density + n(t * 0.001, 0.0, geo_scale) * 0.3 * s.tectonic_activity,
            );
            evolved.coastline_complexity = clamp_unit(
                base.coastline_complexity - s.erosion_level * s.erosion_level * 0.4
                    + n(t * 0.0005, 100.0, geo_scale) * 0.1,
            );
            evolved.land_water_ratio = clamp_unit(
                base.land_water_ratio + n(t * 0.0003, 200.0, geo_scale) * 0.2 + s.ocean_level,
            );
        }

        if s.climatic_shift > 0.0 {
            evolved.climate = clamp_unit(
                evolved.climate
                    + n(t * 0.0002, s.climatic_shift * 5.0, 0.0) * s.climatic_shift * 0.5,
            );
        }

        if s.atmospheric_evolution > 0.0 {
            evolved.atmosphere = clamp_unit(
                evolved.atmosphere
                    + n(t * 0.0001, 300.0, s.atmospheric_evolution * 3.0)
                        * s.atmospheric_evolution
                        * 0.4,
            );
        }

        if s.weather_cycle > 0.0 {
            let season = (t * 0.01 * s.weather_cycle).sin() * 0.3;
            evolved.clouds = clamp_unit(
                evolved.clouds
                    + season
                    + n(t * 0.005, 400.0, s.weather_cycle * 2.0) * 0.4 * s.weather_cycle,
            );
            evolved.atmosphere = clamp_unit(evolved.atmosphere + season * 0.1);
        }

        evolved
    }

    /// Effect flags at the current time.
    pub fn get_temporal_effects(&self, settings: &TemporalSettings) -> TemporalEffects {
        let s = settings.clamped();
        let t = self.clock.current_time() as f32;
        let lane = |(rate, y, z): (f32, f32, f32)| self.noise.sample(t * rate, y, z);
        let show = s.show_temporal_effects;

        TemporalEffects {
            aurora: show && lane(AURORA_LANE) > 0.7,
            meteor_shower: show && lane(METEOR_LANE) > 0.8,
            solar_flare: show && lane(FLARE_LANE) > 0.85,
            lightning: s.weather_cycle > 0.5 && lane(LIGHTNING_LANE) > 0.6,
            dust_storm: s.weather_cycle > 0.3 && lane(DUST_LANE) > 0.7,
            polar_ice_caps: s.geological_time > 0.3 && self.base.climate < 0.6,
        }
    }

    fn maybe_snapshot(&mut self, before: f64) {
        let interval = self.config.snapshot_interval;
        if self.config.max_history == 0 || interval.is_nan() || interval <= 0.0 {
            return;
        }
        let now = self.clock.current_time();
        if (now / interval).floor() <= (before / interval).floor() {
            return;
        }

        let evolved = self.get_evolved_parameters(&self.base.temporal);
        if self.history.len() >= self.config.max_history {
            self.history.pop_front();
        }
        self.history.push_back(HistorySnapshot { time: now, evolved });
        debug!("History snapshot at {} ({} kept)", time_description(now), self.history.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn in_unit(v: f32) -> bool {
        (0.0..=1.0).contains(&v)
    }

    fn all_in_unit(e: &EvolvedParameters) -> bool {
        [
            e.mountain_density,
            e.coastline_complexity,
            e.land_water_ratio,
            e.climate,
            e.atmosphere,
            e.clouds,
        ]
        .into_iter()
        .all(in_unit)
    }

    #[test]
    fn test_evolution_is_idempotent_at_fixed_time() {
        let mut engine = TemporalEngine::new(&PlanetParameters::default());
        engine.fast_forward(123_456.0);
        let settings = TemporalSettings::active();

        let a = engine.get_evolved_parameters(&settings);
        let b = engine.get_evolved_parameters(&settings);
        assert_eq!(a, b);
        assert_eq!(engine.get_temporal_effects(&settings), engine.get_temporal_effects(&settings));
    }

    #[test]
    fn test_evolution_stays_bounded() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            let base = PlanetParameters {
                seed: rng.random(),
                land_water_ratio: rng.random(),
                coastline_complexity: rng.random(),
                mountain_density: rng.random(),
                climate: rng.random(),
                atmosphere: rng.random(),
                clouds: rng.random(),
                ..Default::default()
            };
            let settings = TemporalSettings {
                tectonic_activity: rng.random(),
                ocean_level: rng.random_range(-0.5..=0.5),
                atmospheric_evolution: rng.random(),
                geological_time: rng.random(),
                weather_cycle: rng.random(),
                climatic_shift: rng.random(),
                erosion_level: rng.random(),
                time_speed: rng.random_range(0.1..=10.0),
                show_temporal_effects: rng.random(),
            };
            let mut engine = TemporalEngine::new(&base);
            engine.fast_forward(rng.random_range(0.0..1e9));

            let evolved = engine.get_evolved_parameters(&settings);
            assert!(all_in_unit(&evolved), "out of range: {:?}", evolved);
        }
    }

    #[test]
    fn test_out_of_range_settings_still_bounded() {
        let base = PlanetParameters {
            mountain_density: 5.0,
            clouds: -3.0,
            ..Default::default()
        };
        let settings = TemporalSettings {
            ocean_level: -40.0,
            weather_cycle: 9.0,
            geological_time: 2.0,
            ..TemporalSettings::active()
        };
        let mut engine = TemporalEngine::new(&base);
        engine.fast_forward(777.0);
        assert!(all_in_unit(&engine.get_evolved_parameters(&settings)));
    }

    #[test]
    fn test_zero_geological_time_passes_through() {
        let base = PlanetParameters::earth_like(3);
        let mut engine = TemporalEngine::new(&base);
        engine.fast_forward(9_999_999.0);

        let settings = TemporalSettings {
            geological_time: 0.0,
            ocean_level: 0.4,
            erosion_level: 1.0,
            ..TemporalSettings::active()
        };
        let evolved = engine.get_evolved_parameters(&settings);
        assert_relative_eq!(evolved.mountain_density, base.mountain_density);
        assert_relative_eq!(evolved.coastline_complexity, base.coastline_complexity);
        assert_relative_eq!(evolved.land_water_ratio, base.land_water_ratio);
    }

    #[test]
    fn test_frozen_settings_return_base() {
        let base = PlanetParameters::desert(11);
        let mut engine = TemporalEngine::new(&base);
        engine.fast_forward(50_000.0);
        let evolved = engine.get_evolved_parameters(&TemporalSettings::frozen());
        assert_eq!(evolved, EvolvedParameters::from_base(&base));
    }

    #[test]
    fn test_erosion_smooths_coastline_at_time_zero() {
        let base = PlanetParameters::default();
        let engine = TemporalEngine::new(&base);
        let settings = TemporalSettings {
            geological_time: 0.5,
            erosion_level: 0.5,
            ..TemporalSettings::frozen()
        };
        // all three noise coordinates sit on lattice points at t = 0, so the perturbation vanishes
        let evolved = engine.get_evolved_parameters(&settings);
        assert_relative_eq!(
            evolved.coastline_complexity,
            base.coastline_complexity - 0.25 * 0.4,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_ocean_level_offsets_land_ratio() {
        let base = PlanetParameters { land_water_ratio: 0.4, ..Default::default() };
        let engine = TemporalEngine::new(&base);
        let neutral = TemporalSettings { geological_time: 0.5, ..TemporalSettings::frozen() };
        let raised = TemporalSettings { ocean_level: 0.3, ..neutral.clone() };
        let lowered = TemporalSettings { ocean_level: -0.3, ..neutral.clone() };

        // all three noise coordinates sit on lattice points at t = 0
        let a = engine.get_evolved_parameters(&neutral);
        let b = engine.get_evolved_parameters(&raised);
        let c = engine.get_evolved_parameters(&lowered);
        assert_relative_eq!(a.land_water_ratio, 0.4, epsilon = 1e-6);
        assert_relative_eq!(b.land_water_ratio, 0.7, epsilon = 1e-6);
        assert_relative_eq!(c.land_water_ratio, 0.1, epsilon = 1e-6);
        assert!(b.sea_level() < a.sea_level());
    }

    #[test]
    fn test_apply_to_keeps_base_fields() {
        let base = PlanetParameters::ringed_giant(5);
        let evolved = EvolvedParameters {
            clouds: 0.1,
            ..EvolvedParameters::from_base(&base)
        };
        let applied = evolved.apply_to(&base);
        assert_eq!(applied.clouds, 0.1);
        assert_eq!(applied.seed, 5);
        assert_eq!(applied.ring_density, base.ring_density);
        assert_eq!(applied.moon_size, base.moon_size);
    }

    #[test]
    fn test_effect_gating() {
        let base = PlanetParameters { climate: 0.2, ..Default::default() };
        let mut engine = TemporalEngine::new(&base);
        let hidden = TemporalSettings {
            show_temporal_effects: false,
            weather_cycle: 0.0,
            ..TemporalSettings::active()
        };
        for _ in 0..2000 {
            engine.fast_forward(37.0);
            let fx = engine.get_temporal_effects(&hidden);
            assert!(!fx.aurora && !fx.meteor_shower && !fx.solar_flare);
            assert!(!fx.lightning && !fx.dust_storm);
            assert!(fx.polar_ice_caps);
        }
    }

    #[test]
    fn test_ice_caps_need_cold_base_climate() {
        let settings = TemporalSettings { geological_time: 0.5, ..TemporalSettings::frozen() };
        let cold = TemporalEngine::new(&PlanetParameters { climate: 0.3, ..Default::default() });
        let warm = TemporalEngine::new(&PlanetParameters { climate: 0.8, ..Default::default() });
        assert!(cold.get_temporal_effects(&settings).polar_ice_caps);
        assert!(!warm.get_temporal_effects(&settings).polar_ice_caps);
        let young = TemporalSettings { geological_time: 0.2, ..settings };
        assert!(!cold.get_temporal_effects(&young).polar_ice_caps);
    }

    #[test]
    fn test_tick_uses_base_time_speed() {
        let mut base = PlanetParameters::default();
        base.temporal.time_speed = 4.0;
        let mut engine = TemporalEngine::new(&base);
        engine.tick(2.5);
        assert_relative_eq!(engine.current_time(), 10.0);

        engine.toggle_running();
        engine.tick(2.5);
        assert_relative_eq!(engine.current_time(), 10.0);
        engine.fast_forward(90.0);
        assert_relative_eq!(engine.current_time(), 100.0);
        assert!(!engine.is_running());
    }

    #[test]
    fn test_history_snapshots_and_reset() {
        let config = TemporalConfig { snapshot_interval: 10.0, max_history: 3 };
        let mut engine = TemporalEngine::with_config(&PlanetParameters::default(), config);
        for _ in 0..100 {
            engine.tick(1.0);
        }
        assert_eq!(engine.history_len(), 3);
        let times: Vec<f64> = engine.history().map(|s| s.time).collect();
        assert!(times.windows(2).all(|w| w[0] < w[1]));
        assert_relative_eq!(times[2], 100.0);

        engine.reset();
        assert_eq!(engine.current_time(), 0.0);
        assert_eq!(engine.history_len(), 0);
    }

    #[test]
    fn test_paused_engine_records_nothing() {
        let config = TemporalConfig { snapshot_interval: 1.0, max_history: 8 };
        let mut engine = TemporalEngine::with_config(&PlanetParameters::default(), config);
        engine.pause();
        for _ in 0..10 {
            engine.tick(1.0);
        }
        assert_eq!(engine.history_len(), 0);
        let mut silent = TemporalEngine::with_config(
            &PlanetParameters::default(),
            TemporalConfig::without_history(),
        );
        silent.tick(1_000.0);
        assert_eq!(silent.history_len(), 0);
    }

    #[test]
    fn test_labels_follow_clock() {
        let mut engine = TemporalEngine::new(&PlanetParameters::default());
        assert_eq!(engine.epoch_name(), "Present Era");
        engine.fast_forward(2_000_000.0);
        assert_eq!(engine.epoch_name(), "Neogene");
        engine.reset();
        engine.fast_forward(250_000.0);
        assert_eq!(engine.time_description(), "2.5M years");
    }

    #[test]
    fn test_set_base_keeps_clock() {
        let mut engine = TemporalEngine::new(&PlanetParameters::default());
        engine.fast_forward(500.0);
        engine.set_base(&PlanetParameters { climate: 0.9, ..Default::default() });
        assert_eq!(engine.current_time(), 500.0);
        assert_eq!(engine.base().climate, 0.9);
    }

    #[test]
    fn test_effect_names() {
        let fx = TemporalEffects { aurora: true, polar_ice_caps: true, ..Default::default() };
        assert_eq!(fx.active(), vec!["aurora", "polar ice caps"]);
    }
}
