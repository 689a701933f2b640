//! Snapshot Types
//!
//! Serialization structs for the periodic value snapshots.
//!
//! A snapshot captures every agent's opinion at a point in simulation time,
//! ordered by node id. The time-ordered snapshot series is the input of the
//! convergence measurement and the main artifact a run leaves behind.

use serde::{Deserialize, Serialize};

/// The full opinion vector at one point in simulation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueSnapshot {
    /// Simulation time of the observation.
    pub time: f64,
    /// One value per node, ordered by node id.
    pub values: Vec<f64>,
}

impl ValueSnapshot {
    /// Creates a snapshot from a time and a value vector.
    pub fn new(time: f64, values: Vec<f64>) -> Self {
        Self { time, values }
    }

    /// Number of observed nodes.
    pub fn node_count(&self) -> usize {
        self.values.len()
    }
}
