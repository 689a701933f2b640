//! Feature Assembly
//!
//! Seeded helpers that build the per-node feature list a model is
//! constructed from: an initial value vector, an activation subset, and a
//! shared speed. This is input assembly only; generating the topology those
//! features land on is an external collaborator's job.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use sim_events::{ActivationState, AgentFeatures};

use crate::config::{InitialValues, RunConfig};

/// Evenly spread values `0, 1, ..., n-1`.
pub fn spread_values(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64).collect()
}

/// Uniform draws from `[low, high)`.
pub fn uniform_values(n: usize, low: f64, high: f64, rng: &mut SmallRng) -> Vec<f64> {
    (0..n).map(|_| rng.gen_range(low..high)).collect()
}

/// Normal draws with the given mean and standard deviation.
pub fn normal_values(n: usize, mean: f64, std_dev: f64, rng: &mut SmallRng) -> Vec<f64> {
    let dist = Normal::new(mean, std_dev).expect("standard deviation is validated non-negative");
    (0..n).map(|_| dist.sample(rng)).collect()
}

/// Pairs a value vector with an activation subset and a shared speed.
///
/// With `active_fraction = 1.0` every agent starts active. Otherwise a
/// random subset of the requested size is activated; the rest stay dormant.
pub fn assemble_features(
    values: Vec<f64>,
    speed: f64,
    active_fraction: f64,
    rng: &mut SmallRng,
) -> Vec<AgentFeatures> {
    let n = values.len();
    if active_fraction >= 1.0 {
        return values
            .into_iter()
            .map(|v| AgentFeatures::active(v, speed))
            .collect();
    }

    let active_count = ((n as f64) * active_fraction).round() as usize;
    let mut ids: Vec<usize> = (0..n).collect();
    ids.shuffle(rng);
    let mut active = vec![false; n];
    for &id in ids.iter().take(active_count.min(n)) {
        active[id] = true;
    }

    values
        .into_iter()
        .enumerate()
        .map(|(id, v)| {
            let state = if active[id] {
                ActivationState::Active
            } else {
                ActivationState::Dormant
            };
            AgentFeatures::new(v, state, speed)
        })
        .collect()
}

/// Builds the feature list a [`RunConfig`] describes.
pub fn build_features(config: &RunConfig, rng: &mut SmallRng) -> Vec<AgentFeatures> {
    let values = match config.initial_values {
        InitialValues::Spread => spread_values(config.nodes),
        InitialValues::Uniform { low, high } => uniform_values(config.nodes, low, high, rng),
        InitialValues::Normal { mean, std_dev } => {
            normal_values(config.nodes, mean, std_dev, rng)
        }
    };
    assemble_features(values, config.speed, config.active_fraction, rng)
}
