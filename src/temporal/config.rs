//! Temporal engine configuration.

/// Configuration for history recording in the temporal engine.
#[derive(Debug, Clone, PartialEq)]
pub struct TemporalConfig {
    pub snapshot_interval: f64, // simulated years between snapshots
    pub max_history: usize,     // oldest snapshots are dropped past this
}

impl Default for TemporalConfig {
    fn default() -> Self {
        Self {
            snapshot_interval: 100.0,
            max_history: 256,
        }
    }
}

impl TemporalConfig {
    /// No snapshots are kept.
    pub fn without_history() -> Self {
        Self {
            max_history: 0,
            ..Self::default()
        }
    }
}
