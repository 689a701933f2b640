//! Determinism verification tests
//!
//! A simulation run is a pure function of its topology, features, policies,
//! and seed. These tests reconstruct whole models and verify the runs are
//! bit-identical.

use sim_core::{
    ActivationPolicy, Graph, ModelConfig, NetworkModel, PolicySet, SelectionKind, TimingKind,
};
use sim_events::AgentFeatures;

fn spread_features(n: usize) -> Vec<AgentFeatures> {
    (0..n)
        .map(|i| AgentFeatures::active(i as f64, 1.0))
        .collect()
}

fn make_model(seed: u64, selection: SelectionKind, timing: TimingKind) -> NetworkModel<Graph> {
    let policies = PolicySet::from_kinds(selection, timing, ActivationPolicy::FromFeatures);
    let config = ModelConfig {
        horizon: 30.0,
        log_interval: 1.0,
        event_logging: true,
        time_logging: true,
        seed,
    };
    NetworkModel::new(Graph::cycle(8).unwrap(), &spread_features(8), policies, config).unwrap()
}

/// Reconstructing a model with identical inputs and seed reproduces an
/// identical snapshot series, event log, and convergence rate.
#[test]
fn test_identical_seeds_reproduce_the_run() {
    for selection in [
        SelectionKind::Uniform,
        SelectionKind::RoundRobin,
        SelectionKind::DegreeWeighted,
        SelectionKind::DistanceWeighted,
    ] {
        let mut first = make_model(42, selection, TimingKind::Exponential);
        let mut second = make_model(42, selection, TimingKind::Exponential);

        let report_first = first.run_simulation().unwrap();
        let report_second = second.run_simulation().unwrap();

        assert_eq!(first.time_series(), second.time_series());
        assert_eq!(first.event_log(), second.event_log());
        assert_eq!(first.get_values(), second.get_values());
        assert_eq!(
            report_first.convergence_rate,
            report_second.convergence_rate
        );
        assert_eq!(report_first.error_series, report_second.error_series);
    }
}

/// Poisson timing is reproducible too.
#[test]
fn test_poisson_timing_is_deterministic() {
    let mut first = make_model(7, SelectionKind::Uniform, TimingKind::Poisson);
    let mut second = make_model(7, SelectionKind::Uniform, TimingKind::Poisson);

    first.run_to_horizon().unwrap();
    second.run_to_horizon().unwrap();

    assert_eq!(first.event_log(), second.event_log());
    assert_eq!(first.get_values(), second.get_values());
}

/// Different seeds drive the population through different trajectories.
#[test]
fn test_different_seeds_diverge() {
    let mut first = make_model(42, SelectionKind::Uniform, TimingKind::Exponential);
    let mut second = make_model(43, SelectionKind::Uniform, TimingKind::Exponential);

    first.run_to_horizon().unwrap();
    second.run_to_horizon().unwrap();

    assert_ne!(first.event_log(), second.event_log());
}

/// The neighbor permutation is part of the seeded state: agents cache the
/// same ordering across reconstructions.
#[test]
fn test_neighbor_permutations_are_reproducible() {
    let first = make_model(5, SelectionKind::Uniform, TimingKind::Exponential);
    let second = make_model(5, SelectionKind::Uniform, TimingKind::Exponential);

    for (a, b) in first.agents().iter().zip(second.agents()) {
        assert_eq!(a.neighbors(), b.neighbors());
        assert_eq!(a.degree_weights(), b.degree_weights());
        assert_eq!(a.distance_weights(), b.distance_weights());
        assert_eq!(a.next_wait(), b.next_wait());
    }
}
