//! Temporal evolution of planet parameters.
//!
//! A [`TemporalEngine`] owns a simulated clock and derives time-dependent
//! [`EvolvedParameters`] and [`TemporalEffects`] from the base parameters.
//! Derivation is a pure recomputation, so asking twice at the same time gives
//! the same answer.

mod clock;
mod config;
mod engine;
mod epoch;

pub use clock::SimulatedClock;
pub use config::TemporalConfig;
pub use engine::{EvolvedParameters, HistorySnapshot, TemporalEffects, TemporalEngine};
pub use epoch::{epoch_name, time_description};
