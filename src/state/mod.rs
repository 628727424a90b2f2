//! Point-in-time snapshots and sampled trajectories.
//!
//! The driver owns the live state vector; consumers only ever see
//! snapshots, emitted at the configured output interval as an ordered
//! stream with strictly increasing time.

use std::collections::HashMap;

use serde::Serialize;

/// One sampled simulation state.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// Seconds since simulation start.
    pub time_s: f64,
    /// Concentration (mM) per metabolite id.
    pub concentrations: HashMap<String, f64>,
    /// Reaction flux (mM/s) per reaction id, when flux capture is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fluxes: Option<HashMap<String, f64>>,
}

impl Snapshot {
    /// Concentration of a metabolite; `None` when the id is not tracked.
    ///
    /// Readers that need a plain number should map `None` to 0 themselves;
    /// the option is the out-of-band "not present" indicator.
    pub fn concentration(&self, metabolite_id: &str) -> Option<f64> {
        self.concentrations.get(metabolite_id).copied()
    }

    /// Flux of a reaction; `None` when fluxes were not captured or the id
    /// is unknown.
    pub fn flux(&self, reaction_id: &str) -> Option<f64> {
        self.fluxes.as_ref()?.get(reaction_id).copied()
    }
}

/// Sampled history of one simulation run.
#[derive(Debug, Clone, Default)]
pub struct Trajectory {
    samples: Vec<Snapshot>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a snapshot; out-of-order times are rejected with a logged
    /// warning so the stream stays strictly increasing.
    pub fn push(&mut self, snapshot: Snapshot) {
        if let Some(last) = self.samples.last() {
            if snapshot.time_s <= last.time_s {
                log::warn!(
                    "dropped out-of-order snapshot at t = {} (last = {})",
                    snapshot.time_s,
                    last.time_s
                );
                return;
            }
        }
        self.samples.push(snapshot);
    }

    /// All samples in time order.
    pub fn samples(&self) -> &[Snapshot] {
        &self.samples
    }

    /// Most recent sample.
    pub fn latest(&self) -> Option<&Snapshot> {
        self.samples.last()
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no samples have been recorded.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Time series of one metabolite as (t, concentration) pairs; absent
    /// ids yield 0 readings.
    pub fn series(&self, metabolite_id: &str) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .map(|s| (s.time_s, s.concentration(metabolite_id).unwrap_or(0.0)))
            .collect()
    }
}
