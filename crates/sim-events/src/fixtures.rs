//! Sample data fixtures for testing.
//!
//! This module provides ready-made test data for other crates to use.
//! Enable the `test-fixtures` feature to access these helpers.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // sim-events = { path = "../sim-events", features = ["test-fixtures"] }
//!
//! use sim_events::fixtures;
//!
//! let features = fixtures::spread_features(5);
//! let snapshots = fixtures::decaying_snapshots();
//! ```

use crate::{AgentFeatures, ValueSnapshot};

/// Returns `n` active features with evenly spread values `0, 1, ..., n-1`
/// and unit speed.
pub fn spread_features(n: usize) -> Vec<AgentFeatures> {
    (0..n)
        .map(|i| AgentFeatures::active(i as f64, 1.0))
        .collect()
}

/// Returns a small snapshot series whose disagreement halves at every step.
///
/// Two nodes symmetric around 1.0, observed at unit intervals. Useful for
/// exercising error computation and the log-linear fit against a known
/// exponential decay.
pub fn decaying_snapshots() -> Vec<ValueSnapshot> {
    (0..8)
        .map(|t| {
            let spread = 0.5f64.powi(t);
            ValueSnapshot::new(t as f64, vec![1.0 - spread, 1.0 + spread])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spread_features_shape() {
        let features = spread_features(4);
        assert_eq!(features.len(), 4);
        assert_eq!(features[3].value, 3.0);
        assert!(features.iter().all(|f| f.state.is_active()));
    }

    #[test]
    fn test_decaying_snapshots_halve() {
        let snaps = decaying_snapshots();
        assert_eq!(snaps.len(), 8);
        assert_eq!(snaps[0].values, vec![0.0, 2.0]);
        assert_eq!(snaps[1].values, vec![0.5, 1.5]);
        assert!(snaps.windows(2).all(|w| w[1].time > w[0].time));
    }
}
