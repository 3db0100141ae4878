//! Seeded 3D gradient noise.

use glam::Vec3;
use ::noise::{NoiseFn, Perlin};

/// Seed offsets that decorrelate the noise channels from terrain noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoiseChannel {
    Terrain,
    Clouds,
    Rings,
    Moon,
    Temporal,
    Weather,
    /// Wind and temperature lattices of the weather simulator.
    WeatherLattice,
}

impl NoiseChannel {
    /// Offset added (wrapping) to the planet seed.
    pub fn seed_offset(&self) -> u64 {
        match self {
            NoiseChannel::Terrain => 0,
            NoiseChannel::Clouds => 1000,
            NoiseChannel::Rings => 2000,
            NoiseChannel::Moon => 3000,
            NoiseChannel::Temporal => 50_000,
            NoiseChannel::Weather => 60_000,
            NoiseChannel::WeatherLattice => 70_000,
        }
    }

    pub fn seed(&self, planet_seed: u64) -> u64 {
        planet_seed.wrapping_add(self.seed_offset())
    }
}

/// Perlin gradient noise keyed by a 64-bit seed.
///
/// The permutation table is built once in [`NoiseGenerator::new`] and never
/// mutated, so a generator can be shared freely across threads.
#[derive(Debug, Clone)]
pub struct NoiseGenerator {
    seed: u64,
    perlin: Perlin,
}

impl NoiseGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            perlin: Perlin::new(fold_seed(seed)),
        }
    }

    /// Generator for one channel of a planet seed.
    pub fn for_channel(planet_seed: u64, channel: NoiseChannel) -> Self {
        Self::new(channel.seed(planet_seed))
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Samples noise at `(x, y, z)`.
    ///
    /// Returns a value in [-1, 1]. Non-finite coordinates are treated as 0.
    pub fn sample(&self, x: f32, y: f32, z: f32) -> f32 {
        let point = [finite_or_zero(x), finite_or_zero(y), finite_or_zero(z)];
        (self.perlin.get(point) as f32).clamp(-1.0, 1.0)
    }

    #[inline]
    pub fn sample_vec(&self, p: Vec3) -> f32 {
        self.sample(p.x, p.y, p.z)
    }
}

/// Perlin tables are keyed by `u32`; both halves of the seed contribute.
#[inline]
fn fold_seed(seed: u64) -> u32 {
    (seed ^ (seed >> 32)) as u32
}

#[inline]
fn finite_or_zero(v: f32) -> f64 {
    if v.is_finite() { v as f64 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_same_seed_same_value() {
        let a = NoiseGenerator::new(1234);
        let b = NoiseGenerator::new(1234);
        for &(x, y, z) in &[(0.5, 0.3, 0.7), (10.25, -3.5, 1.125), (-100.7, 42.0, 0.01)] {
            assert_eq!(a.sample(x, y, z), a.sample(x, y, z));
            assert_eq!(a.sample(x, y, z), b.sample(x, y, z));
        }
    }

    #[test]
    fn test_different_seeds_decorrelate() {
        let a = NoiseGenerator::new(1);
        let b = NoiseGenerator::new(2);
        let differing = (0..64)
            .filter(|i| {
                let x = *i as f32 * 0.37 + 0.11;
                a.sample(x, 0.5, 0.25) != b.sample(x, 0.5, 0.25)
            })
            .count();
        assert!(differing > 32);
    }

    #[test]
    fn test_range_over_random_samples() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..10_000 {
            let g = NoiseGenerator::new(rng.random_range(0..50));
            let x = rng.random_range(-1000.0..1000.0);
            let y = rng.random_range(-1000.0..1000.0);
            let z = rng.random_range(-1000.0..1000.0);
            let v = g.sample(x, y, z);
            assert!((-1.0..=1.0).contains(&v), "noise {} out of range", v);
        }
    }

    #[test]
    fn test_zero_at_lattice_points() {
        let g = NoiseGenerator::new(7);
        assert_eq!(g.sample(3.0, -2.0, 5.0), 0.0);
    }

    #[test]
    fn test_continuity() {
        let g = NoiseGenerator::new(77);
        let mut prev = g.sample(0.0, 0.3, 0.6);
        for i in 1..1000 {
            let x = i as f32 * 0.001;
            let v = g.sample(x, 0.3, 0.6);
            assert!((v - prev).abs() < 0.02, "jump at x={}: {} -> {}", x, prev, v);
            prev = v;
        }
    }

    #[test]
    fn test_non_finite_input_is_total() {
        let g = NoiseGenerator::new(5);
        assert!(g.sample(f32::NAN, 1.5, f32::INFINITY).is_finite());
    }

    #[test]
    fn test_seed_folding_keeps_high_bits() {
        assert_ne!(fold_seed(1), fold_seed(1 << 32 | 1));
        assert_eq!(fold_seed(42), 42);
    }

    #[test]
    fn test_channel_offsets() {
        assert_eq!(NoiseChannel::Clouds.seed(42), 1042);
        assert_eq!(NoiseChannel::Temporal.seed(42), 50_042);
        assert_eq!(NoiseChannel::Terrain.seed(u64::MAX), u64::MAX);
        assert_eq!(NoiseChannel::Moon.seed(u64::MAX), 2999);
        assert_eq!(NoiseGenerator::for_channel(42, NoiseChannel::Rings).seed(), 2042);
    }
}
