//! Frame-driven storm simulation and weather sampling.

use glam::Vec3;
use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::field::{GlobalWindField, TemperatureMap};
use super::storm::{random_unit, StormSystem, StormType};
use super::WeatherConfig;
use crate::geometry::unit_or;
use crate::noise::{NoiseChannel, NoiseGenerator};
use crate::params::clamp_unit;

/// Standard sea-level pressure in hPa.
pub const BASE_PRESSURE_HPA: f32 = 1013.25;

/// Local conditions at a point.
///
/// Every field is in [0, 1] except `pressure`, which is in hPa.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    pub cloud_density: f32,
    pub storm_intensity: f32,
    pub wind_speed: f32,
    pub precipitation: f32,
    pub temperature: f32,
    pub pressure: f32,
}

/// Approximate planet-wide summary for a status overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherStats {
    pub average_cloud_cover: f32,
    pub average_wind_speed: f32,
    pub min_temperature: f32,
    pub max_temperature: f32,
    pub active_storms: usize,
}

/// Owns the storm population and the static wind/temperature lattices.
///
/// Storm spawning draws from a `ChaCha8Rng` seeded by the weather noise channel,
/// so a fixed seed and a fixed sequence of updates reproduce the same storms.
#[derive(Debug, Clone)]
pub struct WeatherSimulator {
    config: WeatherConfig,
    seed: u64,
    noise: NoiseGenerator,
    wind: GlobalWindField,
    temperature: TemperatureMap,
    storms: Vec<StormSystem>,
    rng: ChaCha8Rng,
    stats_rng: ChaCha8Rng,
    time: f64,
    next_id: u64,
}

impl WeatherSimulator {
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, WeatherConfig::default())
    }

    pub fn with_config(seed: u64, config: WeatherConfig) -> Self {
        let weather_seed = NoiseChannel::Weather.seed(seed);
        let lattice = NoiseGenerator::for_channel(seed, NoiseChannel::WeatherLattice);
        Self {
            config,
            seed,
            noise: NoiseGenerator::new(weather_seed),
            wind: GlobalWindField::new(&lattice),
            temperature: TemperatureMap::new(&lattice),
            storms: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(weather_seed),
            stats_rng: ChaCha8Rng::seed_from_u64(weather_seed.rotate_left(17)),
            time: 0.0,
            next_id: 0,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &WeatherConfig {
        &self.config
    }

    /// Simulated seconds since construction or the last reset.
    pub fn current_time(&self) -> f64 {
        self.time
    }

    pub fn active_storms(&self) -> &[StormSystem] {
        &self.storms
    }

    pub fn wind_field(&self) -> &GlobalWindField {
        &self.wind
    }

    /// Advances the simulation by `delta × time_speed` simulated seconds.
    pub fn update(&mut self, delta: f32, time_speed: f32) {
        let mut dt = delta * time_speed;
        if !dt.is_finite() || dt < 0.0 {
            dt = 0.0;
        }
        self.time += dt as f64;

        let cfg = &self.config;
        let wind = &self.wind;
        for storm in &mut self.storms {
            let w = wind.wind_at(storm.position);
            storm.advance(dt, w, cfg);
        }

        let floor = cfg.intensity_floor;
        self.storms.retain(|s| {
            let expired = s.age >= s.lifespan;
            let faded = !s.is_ramping_up() && s.intensity < floor;
            if expired || faded {
                debug!("{} #{} dissipated after {:.1}s", s.kind, s.id, s.age);
            }
            !(expired || faded)
        });

        if self.storms.len() < self.config.max_storms
            && self.rng.random::<f32>() < self.config.spawn_probability
        {
            self.spawn_storm();
        }
    }

    fn spawn_storm(&mut self) {
        let types = StormType::all();
        let kind = types[self.rng.random_range(0..types.len())];
        let storm = StormSystem::spawn(self.next_id, kind, &mut self.rng, &self.config);
        self.next_id += 1;
        debug!(
            "Spawned {} #{} at ({:.2}, {:.2}, {:.2}), lifespan {:.1}s",
            storm.kind, storm.id, storm.position.x, storm.position.y, storm.position.z, storm.lifespan
        );
        self.storms.push(storm);
    }

    /// Nearest-cell temperature for a position, 0.5 when no cell applies.
    pub fn temperature_at(&self, position: Vec3) -> f32 {
        self.temperature.get(position)
    }

    /// Nearest-cell unit wind vector.
    pub fn wind_at(&self, position: Vec3) -> Vec3 {
        self.wind.wind_at(position)
    }

    /// Strongest storm influence at `position`.
    fn storm_influence(&self, position: Vec3) -> f32 {
        self.storms
            .iter()
            .map(|s| s.influence_at(position))
            .fold(0.0, f32::max)
    }

    /// Local conditions at `position`, advected by the simulation clock.
    pub fn sample_weather(&self, position: Vec3) -> WeatherSample {
        let p = unit_or(position, Vec3::X);
        let t = self.time as f32;

        let cloud_n = self.noise.sample_vec(p * 2.0 + Vec3::new(t * 0.01, 0.0, 0.0));
        let storm_n = self.noise.sample_vec(p * 3.0 + Vec3::new(100.5, t * 0.02, 0.0));
        let wind_n = self.noise.sample_vec(p * 1.5 + Vec3::new(0.0, 200.5, t * 0.005));
        let influence = clamp_unit(self.storm_influence(position));

        let cloud_density = clamp_unit((cloud_n + 1.0) * 0.5 + influence * 0.5);
        let storm_intensity = clamp_unit(storm_n.max(0.0) * 0.3 + influence);
        let wind_speed = clamp_unit((wind_n + 1.0) * 0.3 + influence * 0.4);
        let precipitation = clamp_unit(cloud_density * 0.6 + storm_intensity * 0.6 - 0.3);
        let temperature = clamp_unit(self.temperature_at(position) - influence * 0.1);
        let pressure = BASE_PRESSURE_HPA - storm_intensity * 50.0 + wind_n * 10.0 - cloud_n * 5.0;

        WeatherSample {
            cloud_density,
            storm_intensity,
            wind_speed,
            precipitation,
            temperature,
            pressure,
        }
    }

    /// Monte-Carlo summary over random surface points.
    ///
    /// Uses its own random stream, so calling it does not perturb storm spawning.
    pub fn weather_stats(&mut self) -> WeatherStats {
        let samples = self.config.stats_samples.max(1);
        let mut cloud_sum = 0.0;
        let mut wind_sum = 0.0;
        let mut min_t = f32::MAX;
        let mut max_t = f32::MIN;

        for _ in 0..samples {
            let p = random_unit(&mut self.stats_rng);
            let w = self.sample_weather(p);
            cloud_sum += w.cloud_density;
            wind_sum += w.wind_speed;
            min_t = min_t.min(w.temperature);
            max_t = max_t.max(w.temperature);
        }

        WeatherStats {
            average_cloud_cover: cloud_sum / samples as f32,
            average_wind_speed: wind_sum / samples as f32,
            min_temperature: min_t,
            max_temperature: max_t,
            active_storms: self.storms.len(),
        }
    }

    /// Clears all storms and zeroes the clock. Lattices are kept.
    pub fn reset(&mut self) {
        debug!("Weather reset, dropping {} storm(s)", self.storms.len());
        self.storms.clear();
        self.time = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(sim: &mut WeatherSimulator, steps: usize, delta: f32) {
        for _ in 0..steps {
            sim.update(delta, 1.0);
        }
    }

    #[test]
    fn test_storm_lifecycle() {
        let cfg = WeatherConfig {
            spawn_probability: 1.0,
            max_storms: 5,
            ..WeatherConfig::default()
        };
        let mut sim = WeatherSimulator::with_config(7, cfg);
        sim.update(0.1, 1.0);
        assert_eq!(sim.active_storms().len(), 1);

        // Stop spawning and watch the population drain.
        run(&mut sim, 4, 0.1);
        sim.config.spawn_probability = 0.0;
        let longest = sim.config.max_lifespan * 1.5;
        let steps = (longest / 0.5) as usize + 2;
        let mut seen_plateau = false;
        for _ in 0..steps {
            sim.update(0.5, 1.0);
            for s in sim.active_storms() {
                assert!(s.age < s.lifespan);
                assert!(s.intensity >= 0.0 && s.intensity <= s.peak_intensity + 1e-6);
                if !s.is_ramping_up() {
                    assert!(s.intensity >= sim.config.intensity_floor);
                }
                seen_plateau |= (s.intensity - s.peak_intensity).abs() < 1e-6;
            }
        }
        assert!(seen_plateau, "storms should reach their peak");
        assert!(sim.active_storms().is_empty());
    }

    #[test]
    fn test_population_is_capped() {
        let cfg = WeatherConfig {
            spawn_probability: 1.0,
            max_storms: 3,
            ..WeatherConfig::default()
        };
        let mut sim = WeatherSimulator::with_config(1, cfg);
        run(&mut sim, 50, 0.1);
        assert_eq!(sim.active_storms().len(), 3);
        let ids: Vec<u64> = sim.active_storms().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_storm_sequence_is_reproducible() {
        let mut a = WeatherSimulator::with_config(99, WeatherConfig::stormy());
        let mut b = WeatherSimulator::with_config(99, WeatherConfig::stormy());
        for i in 0..400 {
            a.update(1.0 / 30.0, 2.0);
            b.update(1.0 / 30.0, 2.0);
            if i % 50 == 0 {
                a.weather_stats();
            }
        }
        assert_eq!(a.active_storms(), b.active_storms());
        assert!(a.next_id > 0, "stormy config should spawn within 400 updates");
    }

    #[test]
    fn test_reset_clears_storms() {
        let cfg = WeatherConfig {
            spawn_probability: 1.0,
            ..WeatherConfig::default()
        };
        let mut sim = WeatherSimulator::with_config(3, cfg);
        run(&mut sim, 10, 0.1);
        assert!(!sim.active_storms().is_empty());
        let wind_before = sim.wind_at(Vec3::Y);

        sim.reset();
        assert!(sim.active_storms().is_empty());
        assert_eq!(sim.current_time(), 0.0);
        assert_eq!(sim.weather_stats().active_storms, 0);
        assert_eq!(sim.wind_at(Vec3::Y), wind_before);
    }

    #[test]
    fn test_calm_config_never_spawns() {
        let mut sim = WeatherSimulator::with_config(5, WeatherConfig::calm());
        run(&mut sim, 1000, 0.1);
        assert!(sim.active_storms().is_empty());
    }

    #[test]
    fn test_time_scaled_clock() {
        let mut sim = WeatherSimulator::with_config(5, WeatherConfig::calm());
        sim.update(0.5, 4.0);
        assert!((sim.current_time() - 2.0).abs() < 1e-9);
        sim.update(-1.0, 1.0);
        sim.update(f32::NAN, 1.0);
        assert!((sim.current_time() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_sample_weather_bounds() {
        let cfg = WeatherConfig {
            spawn_probability: 1.0,
            ..WeatherConfig::default()
        };
        let mut sim = WeatherSimulator::with_config(11, cfg);
        run(&mut sim, 200, 0.5);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..500 {
            let p = random_unit(&mut rng) * rng.random_range(0.9f32..1.3);
            let w = sim.sample_weather(p);
            for v in [w.cloud_density, w.storm_intensity, w.wind_speed, w.precipitation, w.temperature] {
                assert!((0.0..=1.0).contains(&v), "{:?}", w);
            }
            assert!(w.pressure.is_finite());
            assert_eq!(sim.sample_weather(p), w);
        }
        let degenerate = sim.sample_weather(Vec3::ZERO);
        assert!(degenerate.pressure.is_finite());
    }

    #[test]
    fn test_storm_raises_local_intensity() {
        let mut sim = WeatherSimulator::with_config(21, WeatherConfig::calm());
        let calm = sim.sample_weather(Vec3::Z);
        sim.storms.push(StormSystem {
            id: 0,
            kind: StormType::Cyclone,
            position: Vec3::Z,
            radius: 0.3,
            intensity: 0.9,
            peak_intensity: 0.9,
            rotation: 0.0,
            age: 10.0,
            lifespan: 40.0,
        });
        let stormy = sim.sample_weather(Vec3::Z);
        assert!(stormy.storm_intensity >= 0.9);
        assert!(stormy.storm_intensity > calm.storm_intensity);
        assert!(stormy.pressure < calm.pressure);
    }

    #[test]
    fn test_fresh_storm_of_each_kind_shows_at_surface() {
        let cfg = WeatherConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(31);
        for (id, kind) in StormType::all().into_iter().enumerate() {
            let mut sim = WeatherSimulator::with_config(13, WeatherConfig::calm());
            let mut storm = StormSystem::spawn(id as u64, kind, &mut rng, &cfg);
            storm.intensity = storm.peak_intensity;
            let below = storm.ground_point();
            let before = sim.sample_weather(below);

            sim.storms.push(storm.clone());
            let after = sim.sample_weather(below);
            assert!(after.storm_intensity > before.storm_intensity, "{}", kind);
            assert!(after.storm_intensity >= storm.intensity.min(1.0) - 1e-4, "{}", kind);
        }
    }

    #[test]
    fn test_default_spawn_rate_and_kind_mix() {
        let mut sim = WeatherSimulator::new(2024);
        let updates = 10_000;
        let mut counts = [0usize; 4];
        for _ in 0..updates {
            let before = sim.next_id;
            sim.update(0.1, 1.0);
            if sim.next_id > before {
                let newest = sim.active_storms().last().map(|s| s.kind);
                let slot = StormType::all().iter().position(|k| Some(*k) == newest);
                counts[slot.unwrap()] += 1;
            }
        }

        // 2% of 10k updates is 200 spawns, standard deviation ~14
        let spawned = sim.next_id as usize;
        assert_eq!(counts.iter().sum::<usize>(), spawned);
        assert!((140..=260).contains(&spawned), "spawned {}", spawned);
        for (kind, n) in StormType::all().iter().zip(counts) {
            assert!((25..=80).contains(&n), "{} spawned {} times", kind, n);
        }
    }

    #[test]
    fn test_kind_choice_is_uniform() {
        let cfg = WeatherConfig {
            spawn_probability: 1.0,
            max_storms: usize::MAX,
            ..WeatherConfig::default()
        };
        let mut sim = WeatherSimulator::with_config(77, cfg);
        // zero delta keeps every storm in its ramp-up, so none are removed
        run(&mut sim, 2000, 0.0);
        assert_eq!(sim.active_storms().len(), 2000);
        for kind in StormType::all() {
            let n = sim.active_storms().iter().filter(|s| s.kind == kind).count();
            assert!((420..=580).contains(&n), "{} spawned {} times", kind, n);
        }
    }

    #[test]
    fn test_temperature_lookup() {
        let sim = WeatherSimulator::new(8);
        assert_eq!(sim.temperature_at(Vec3::ZERO), 0.5);
        assert!(sim.temperature_at(Vec3::X) > sim.temperature_at(Vec3::Y));
    }

    #[test]
    fn test_weather_stats_ranges() {
        let mut sim = WeatherSimulator::new(4);
        let stats = sim.weather_stats();
        assert!(stats.min_temperature <= stats.max_temperature);
        assert!((0.0..=1.0).contains(&stats.average_cloud_cover));
        assert!((0.0..=1.0).contains(&stats.average_wind_speed));
        assert_eq!(stats.active_storms, 0);
    }
}
