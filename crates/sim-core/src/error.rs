//! Error taxonomy for the simulation engine.
//!
//! Configuration errors surface at construction or scheduling time and are
//! never silently corrected. There is no retry logic anywhere: a run is
//! deterministic given its seed and inputs, so retrying would reproduce the
//! same failure.

use thiserror::Error;

/// Errors produced by model construction, scheduling, and measurement.
#[derive(Debug, Error)]
pub enum SimError {
    /// A process asked to suspend for a negative or non-finite duration.
    #[error("invalid event delay {0}: delays must be finite and non-negative")]
    InvalidDelay(f64),

    /// The topology has no nodes.
    #[error("topology has no nodes")]
    EmptyTopology,

    /// The feature list does not cover the topology exactly.
    #[error("expected {expected} agent features, found {found}")]
    FeatureCountMismatch { expected: usize, found: usize },

    /// An agent's inter-event-time parameter is unusable.
    #[error("agent {node} has invalid speed {speed}: speeds must be finite and positive")]
    InvalidSpeed { node: usize, speed: f64 },

    /// A node without neighbors can never perform a meaningful move.
    #[error("node {0} has no neighbors; the topology must be free of isolated nodes")]
    IsolatedNode(usize),

    /// A node id outside the topology was referenced.
    #[error("unknown node id {0}")]
    UnknownNode(usize),

    /// A selection policy returned the mover itself.
    #[error("agent {0} selected itself as interaction partner")]
    SelfInteraction(usize),

    /// An edge references endpoints outside the node range, or a self-loop.
    #[error("invalid edge ({from}, {to}): endpoints must be distinct nodes inside the topology")]
    InvalidEdge { from: usize, to: usize },

    /// The run window is not measurable.
    #[error("invalid run window: horizon and log interval must be finite and positive")]
    InvalidRunWindow,

    /// Neighbor weights could not form a sampling distribution.
    #[error("agent {0} has degenerate neighbor weights")]
    DegenerateWeights(usize),

    /// `run_simulation` was asked for a convergence measurement but the
    /// model was built without time logging.
    #[error("time logging is disabled; no snapshot series to measure")]
    SnapshotsDisabled,

    /// The regression window holds too few points to fit a slope.
    #[error("need at least two snapshots in the fit window, found {0}")]
    TooFewSnapshots(usize),

    /// Time and error series of different lengths were handed to the fit.
    #[error("time series length {times} does not match error series length {errors}")]
    SeriesLengthMismatch { times: usize, errors: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_offender() {
        let err = SimError::IsolatedNode(7);
        assert!(err.to_string().contains('7'));

        let err = SimError::FeatureCountMismatch {
            expected: 10,
            found: 9,
        };
        assert!(err.to_string().contains("10"));
        assert!(err.to_string().contains('9'));
    }

    #[test]
    fn test_invalid_delay_message() {
        let err = SimError::InvalidDelay(-1.5);
        assert!(err.to_string().contains("-1.5"));
    }
}
