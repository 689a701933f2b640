//! Run Report Types
//!
//! Serialization structs for the products of a finished run: the normalized
//! error trajectory, the fitted convergence rate, and the surrounding run
//! parameters. Persistence of these reports is an external concern; this
//! crate only defines the shapes.

use serde::{Deserialize, Serialize};

use crate::snapshot::ValueSnapshot;

/// The convergence measurement produced by a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceReport {
    /// Normalized disagreement error, one entry per snapshot, in time order.
    pub error_series: Vec<f64>,
    /// Absolute slope of the log-linear fit over the trailing half of the
    /// snapshot series.
    pub convergence_rate: f64,
}

impl ConvergenceReport {
    /// Creates a report from an error trajectory and a fitted rate.
    pub fn new(error_series: Vec<f64>, convergence_rate: f64) -> Self {
        Self {
            error_series,
            convergence_rate,
        }
    }

    /// The last observed error, if any snapshot was taken.
    pub fn final_error(&self) -> Option<f64> {
        self.error_series.last().copied()
    }
}

/// Everything an external consumer needs to interpret one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Random seed the run was driven by.
    pub seed: u64,
    /// Simulation horizon.
    pub horizon: f64,
    /// Spacing of the snapshot series.
    pub log_interval: f64,
    /// Number of nodes in the topology.
    pub node_count: usize,
    /// Convergence measurement.
    pub convergence: ConvergenceReport,
    /// Final opinion of every agent, ordered by node id.
    pub final_values: Vec<f64>,
    /// The full snapshot series the measurement was computed from.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub snapshots: Vec<ValueSnapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convergence_report_final_error() {
        let report = ConvergenceReport::new(vec![1.0, 0.5, 0.25], 0.7);
        assert_eq!(report.final_error(), Some(0.25));

        let empty = ConvergenceReport::new(vec![], 0.0);
        assert_eq!(empty.final_error(), None);
    }

    #[test]
    fn test_run_report_roundtrip() {
        let report = RunReport {
            seed: 42,
            horizon: 50.0,
            log_interval: 1.0,
            node_count: 2,
            convergence: ConvergenceReport::new(vec![1.0, 0.1], 1.2),
            final_values: vec![0.5, 0.5],
            snapshots: vec![ValueSnapshot::new(0.0, vec![0.0, 1.0])],
        };
        let json = serde_json::to_string_pretty(&report).unwrap();
        let parsed: RunReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_empty_snapshots_omitted() {
        let report = RunReport {
            seed: 1,
            horizon: 10.0,
            log_interval: 1.0,
            node_count: 1,
            convergence: ConvergenceReport::new(vec![], 0.0),
            final_values: vec![1.0],
            snapshots: vec![],
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("snapshots"));
    }
}
