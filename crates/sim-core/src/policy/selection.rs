//! Neighbor Selection Policies
//!
//! Each policy is a pure function of the mover's state: it reads the cached
//! neighbor list (and, for the weighted variants, the distributions fixed at
//! construction) and returns one neighbor id. Selection never mutates agent
//! state; all mutation happens in the interaction step.
//!
//! Every variant requires a non-empty neighbor list. The model rejects
//! isolated nodes at construction, so inside a run this precondition always
//! holds.

use std::rc::Rc;

use clap::ValueEnum;
use rand::rngs::SmallRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::agent::Agent;
use crate::topology::NodeId;

/// Picks the interaction partner for one move.
pub trait SelectionPolicy {
    /// Returns the id of one of `agent`'s neighbors.
    fn select(&self, agent: &Agent, rng: &mut SmallRng) -> NodeId;
}

/// Uniform-random choice over the neighbor list.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformSelection;

impl SelectionPolicy for UniformSelection {
    fn select(&self, agent: &Agent, rng: &mut SmallRng) -> NodeId {
        let neighbors = agent.neighbors();
        neighbors[rng.gen_range(0..neighbors.len())]
    }
}

/// Deterministic cycle through the neighbor list by move count.
///
/// The neighbor list was permuted once at construction, so round-robin does
/// not synchronize across agents that share neighbors.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundRobinSelection;

impl SelectionPolicy for RoundRobinSelection {
    fn select(&self, agent: &Agent, _rng: &mut SmallRng) -> NodeId {
        let neighbors = agent.neighbors();
        neighbors[agent.move_count() as usize % neighbors.len()]
    }
}

/// Samples neighbors proportionally to their degree.
#[derive(Debug, Clone, Copy, Default)]
pub struct DegreeWeightedSelection;

impl SelectionPolicy for DegreeWeightedSelection {
    fn select(&self, agent: &Agent, rng: &mut SmallRng) -> NodeId {
        agent.sample_degree_weighted(rng)
    }
}

/// Samples neighbors proportionally to inverse common-neighbor distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct DistanceWeightedSelection;

impl SelectionPolicy for DistanceWeightedSelection {
    fn select(&self, agent: &Agent, rng: &mut SmallRng) -> NodeId {
        agent.sample_distance_weighted(rng)
    }
}

/// Named built-in selection policies, for configuration files and the CLI.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum SelectionKind {
    /// Uniform-random over neighbors.
    #[default]
    Uniform,
    /// Cycle through neighbors by move count.
    RoundRobin,
    /// Degree-proportional sampling.
    DegreeWeighted,
    /// Inverse common-neighbor-distance sampling.
    DistanceWeighted,
}

impl SelectionKind {
    /// Instantiates the policy this name stands for.
    pub fn build(self) -> Rc<dyn SelectionPolicy> {
        match self {
            SelectionKind::Uniform => Rc::new(UniformSelection),
            SelectionKind::RoundRobin => Rc::new(RoundRobinSelection),
            SelectionKind::DegreeWeighted => Rc::new(DegreeWeightedSelection),
            SelectionKind::DistanceWeighted => Rc::new(DistanceWeightedSelection),
        }
    }
}
