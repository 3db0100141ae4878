//! Weather and storm simulation.
//!
//! A [`WeatherSimulator`] keeps a population of short-lived [`StormSystem`]s
//! that spawn at random, drift along a fixed wind lattice and fade out along
//! a ramp/plateau/ramp envelope. Point queries combine time-advected noise
//! with the influence of nearby storms.

mod config;
mod field;
mod simulator;
mod storm;

pub use config::WeatherConfig;
pub use field::{GlobalWindField, TemperatureMap, FALLBACK_TEMPERATURE};
pub use simulator::{WeatherSample, WeatherSimulator, WeatherStats, BASE_PRESSURE_HPA};
pub use storm::{envelope, StormSystem, StormType, RAMP_DOWN_START, RAMP_UP_END};
