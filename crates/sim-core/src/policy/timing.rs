//! Inter-Event-Time Policies
//!
//! Samples how long an armed agent waits before its next move, parameterized
//! by the agent's `speed`. Speeds are validated finite and positive at model
//! construction, so the distribution constructors here cannot fail inside a
//! run.

use std::rc::Rc;

use clap::ValueEnum;
use rand::rngs::SmallRng;
use rand_distr::{Distribution, Exp, Poisson};
use serde::{Deserialize, Serialize};

/// Samples the wait before an agent's next move.
pub trait TimingPolicy {
    /// Returns a non-negative duration.
    fn next_wait(&self, speed: f64, rng: &mut SmallRng) -> f64;
}

/// Exponentially distributed waits with mean `speed`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExponentialWait;

impl TimingPolicy for ExponentialWait {
    fn next_wait(&self, speed: f64, rng: &mut SmallRng) -> f64 {
        let dist = Exp::new(1.0 / speed).expect("speed is validated at model construction");
        dist.sample(rng)
    }
}

/// Poisson-distributed waits with mean `speed`, offset by one so the wait is
/// strictly positive.
#[derive(Debug, Clone, Copy, Default)]
pub struct PoissonWait;

impl TimingPolicy for PoissonWait {
    fn next_wait(&self, speed: f64, rng: &mut SmallRng) -> f64 {
        let dist = Poisson::new(speed).expect("speed is validated at model construction");
        dist.sample(rng) + 1.0
    }
}

/// Named built-in timing policies, for configuration files and the CLI.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum TimingKind {
    /// Exponential waits with mean `speed`.
    #[default]
    Exponential,
    /// Poisson waits with mean `speed`, offset by one.
    Poisson,
}

impl TimingKind {
    /// Instantiates the policy this name stands for.
    pub fn build(self) -> Rc<dyn TimingPolicy> {
        match self {
            TimingKind::Exponential => Rc::new(ExponentialWait),
            TimingKind::Poisson => Rc::new(PoissonWait),
        }
    }
}
