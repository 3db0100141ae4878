//! Weather simulator configuration parameters.

/// Configuration for the storm simulator.
///
/// Units:
/// - distances: planet radii (the surface is the unit sphere)
/// - times: simulated seconds (`delta × time_speed`)
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherConfig {
    // Spawning
    pub spawn_probability: f32, // chance of one new storm per update
    pub max_storms: usize,
    pub spawn_inner_radius: f32,
    pub spawn_outer_radius: f32,
    pub dust_altitude: f32,   // dust storms hug the surface
    pub aurora_altitude: f32, // auroras sit above a pole on the x-axis

    // Lifecycle
    pub intensity_floor: f32, // storms fading below this are removed
    pub min_lifespan: f32,
    pub max_lifespan: f32,

    // Motion
    pub drift_scale: f32,   // wind vector → positional drift per second
    pub rotation_rate: f32, // radians per second at full intensity

    /// Surface points sampled by `weather_stats`.
    pub stats_samples: usize,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            spawn_probability: 0.02,
            max_storms: 24,
            spawn_inner_radius: 1.05,
            spawn_outer_radius: 1.2,
            dust_altitude: 1.02,
            aurora_altitude: 1.3,

            intensity_floor: 0.1,
            min_lifespan: 20.0,
            max_lifespan: 60.0,

            drift_scale: 0.01,
            rotation_rate: 2.0,

            stats_samples: 100,
        }
    }
}

impl WeatherConfig {
    /// Busier skies: storms spawn five times as often and live longer.
    pub fn stormy() -> Self {
        Self {
            spawn_probability: 0.1,
            max_storms: 48,
            max_lifespan: 90.0,
            ..Self::default()
        }
    }

    /// No storms ever spawn.
    pub fn calm() -> Self {
        Self {
            spawn_probability: 0.0,
            ..Self::default()
        }
    }
}
