//! Frame-driven planet owner.
//!
//! [`Planet`] bundles the terrain synthesizer, temporal engine and weather
//! simulator behind one single-writer interface. A host loop calls
//! [`Planet::frame`] once per frame and routes user actions through
//! [`Planet::apply`].

use glam::Vec3;
use log::info;
use serde::Serialize;

use crate::geometry::SphericalCoord;
use crate::params::PlanetParameters;
use crate::pipeline::{Pipeline, PipelineError, PlanetTextures};
use crate::temporal::{EvolvedParameters, TemporalEffects, TemporalEngine};
use crate::terrain::TerrainSynth;
use crate::weather::{WeatherSimulator, WeatherStats};

/// Control actions accepted by [`Planet::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum PlanetCommand {
    /// Jump ahead by this many simulated years.
    FastForward(f64),
    /// Zero the clocks, clear history and storms.
    ResetTime,
    /// Flip between running and paused.
    TogglePause,
    /// Replace the base parameters.
    SetParameters(PlanetParameters),
}

/// Snapshot for a status overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanetStatus {
    pub time: f64,
    pub time_description: String,
    pub epoch: &'static str,
    pub running: bool,
    pub storm_count: usize,
    pub effects: TemporalEffects,
}

#[derive(Debug, Clone)]
pub struct Planet {
    params: PlanetParameters,
    synth: TerrainSynth,
    temporal: TemporalEngine,
    weather: WeatherSimulator,
}

impl Planet {
    pub fn new(params: &PlanetParameters) -> Self {
        let params = params.clamped();
        info!("Building planet for seed {}", params.seed);
        Self {
            synth: TerrainSynth::new(params.seed),
            temporal: TemporalEngine::new(&params),
            weather: WeatherSimulator::new(params.seed),
            params,
        }
    }

    pub fn parameters(&self) -> &PlanetParameters {
        &self.params
    }

    pub fn temporal(&self) -> &TemporalEngine {
        &self.temporal
    }

    pub fn weather(&self) -> &WeatherSimulator {
        &self.weather
    }

    pub fn synth(&self) -> &TerrainSynth {
        &self.synth
    }

    /// Advances both simulations by one frame. A paused planet is frozen.
    pub fn frame(&mut self, delta_real_seconds: f32) {
        if !self.temporal.is_running() {
            return;
        }
        self.temporal.tick(delta_real_seconds as f64);
        self.weather
            .update(delta_real_seconds, self.params.temporal.time_speed);
    }

    pub fn apply(&mut self, command: PlanetCommand) {
        match command {
            PlanetCommand::FastForward(years) => self.temporal.fast_forward(years),
            PlanetCommand::ResetTime => {
                self.temporal.reset();
                self.weather.reset();
            }
            PlanetCommand::TogglePause => {
                self.temporal.toggle_running();
            }
            PlanetCommand::SetParameters(params) => self.set_parameters(&params),
        }
    }

    fn set_parameters(&mut self, params: &PlanetParameters) {
        if params.seed != self.params.seed {
            // Derived state belongs to the old seed; start over rather than reconcile.
            *self = Planet::new(params);
            return;
        }
        self.params = params.clamped();
        self.temporal.set_base(&self.params);
    }

    pub fn evolved_parameters(&self) -> EvolvedParameters {
        self.temporal.get_evolved_parameters(&self.params.temporal)
    }

    pub fn temporal_effects(&self) -> TemporalEffects {
        self.temporal.get_temporal_effects(&self.params.temporal)
    }

    /// Base parameters with the evolved fields applied.
    pub fn render_parameters(&self) -> PlanetParameters {
        self.evolved_parameters().apply_to(&self.params)
    }

    /// Surface height in [0, 1] at the current moment for a direction.
    pub fn height_at(&self, direction: Vec3) -> f32 {
        let coord = SphericalCoord::from_point(direction);
        self.synth.generate_height(&self.render_parameters(), &coord)
    }

    /// Regenerates every texture for the current evolved state.
    pub fn textures(&self, pipeline: &Pipeline) -> Result<PlanetTextures, PipelineError> {
        pipeline.run_with_synth(&self.synth, &self.render_parameters(), |_, _, _| {}, |_, _, _| {})
    }

    pub fn weather_stats(&mut self) -> WeatherStats {
        self.weather.weather_stats()
    }

    pub fn status(&self) -> PlanetStatus {
        PlanetStatus {
            time: self.temporal.current_time(),
            time_description: self.temporal.time_description(),
            epoch: self.temporal.epoch_name(),
            running: self.temporal.is_running(),
            storm_count: self.weather.active_storms().len(),
            effects: self.temporal_effects(),
        }
    }
}
