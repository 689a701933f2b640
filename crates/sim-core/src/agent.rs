//! Agent State
//!
//! One agent per topology node. An agent is a two-state machine:
//!
//! - `dormant`: not yet participating; it holds a pre-sampled wait so that
//!   activation can schedule its first move immediately.
//! - `armed`: repeatedly waits a policy-sampled duration, then performs one
//!   move against a selected neighbor.
//!
//! The neighbor list is cached at construction and permuted once to avoid
//! synchronization between agents that share neighbors. The two neighbor
//! weight distributions (degree-proportional and inverse common-neighbor
//! distance) depend only on the topology, which is immutable for the run, so
//! they too are fixed at construction.

use std::fmt;
use std::rc::Rc;

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use sim_events::{ActivationState, AgentFeatures};

use crate::error::SimError;
use crate::policy::{InteractionPolicy, PolicySet, SelectionPolicy, TimingPolicy};
use crate::topology::{NodeId, Topology};

/// The simulated entity at one topology node.
pub struct Agent {
    id: NodeId,
    /// Current opinion. Written only by the interaction step of a move.
    pub value: f64,
    state: ActivationState,
    speed: f64,
    move_count: u64,
    neighbors: Vec<NodeId>,
    degree_weights: Vec<f64>,
    distance_weights: Vec<f64>,
    degree_sampler: WeightedIndex<f64>,
    distance_sampler: WeightedIndex<f64>,
    next_wait: f64,
    next_move_at: f64,
    last_move_at: f64,
    selection: Rc<dyn SelectionPolicy>,
    interaction: Rc<dyn InteractionPolicy>,
    timing: Rc<dyn TimingPolicy>,
}

impl Agent {
    /// Builds the agent for node `id` from its feature triple.
    ///
    /// Agents always start dormant; the model activates the initially-active
    /// set once the whole population exists. The wait for the first move is
    /// pre-sampled here so a later activation only has to schedule it.
    pub fn new<T: Topology + ?Sized>(
        id: NodeId,
        features: &AgentFeatures,
        topology: &T,
        policies: &PolicySet,
        rng: &mut SmallRng,
    ) -> Result<Self, SimError> {
        if !features.speed.is_finite() || features.speed <= 0.0 {
            return Err(SimError::InvalidSpeed {
                node: id,
                speed: features.speed,
            });
        }

        let mut neighbors: Vec<NodeId> = topology.neighbors(id).to_vec();
        if neighbors.is_empty() {
            return Err(SimError::IsolatedNode(id));
        }
        neighbors.shuffle(rng);

        let degree_weights = normalize(
            neighbors
                .iter()
                .map(|&n| topology.degree(n) as f64)
                .collect(),
        );
        let distance_weights = normalize(
            neighbors
                .iter()
                .map(|&n| 1.0 / (topology.common_neighbors(id, n) as f64 + 1.0))
                .collect(),
        );
        let degree_sampler =
            WeightedIndex::new(&degree_weights).map_err(|_| SimError::DegenerateWeights(id))?;
        let distance_sampler =
            WeightedIndex::new(&distance_weights).map_err(|_| SimError::DegenerateWeights(id))?;

        let next_wait = policies.timing.next_wait(features.speed, rng);

        Ok(Self {
            id,
            value: features.value,
            state: ActivationState::Dormant,
            speed: features.speed,
            move_count: 0,
            neighbors,
            degree_weights,
            distance_weights,
            degree_sampler,
            distance_sampler,
            next_wait,
            next_move_at: 0.0,
            last_move_at: 0.0,
            selection: Rc::clone(&policies.selection),
            interaction: Rc::clone(&policies.interaction),
            timing: Rc::clone(&policies.timing),
        })
    }

    /// Node id.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Current activation state.
    pub fn state(&self) -> ActivationState {
        self.state
    }

    /// Whether the agent participates in the dynamics.
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Inter-event-time parameter.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Moves fired so far.
    pub fn move_count(&self) -> u64 {
        self.move_count
    }

    /// Cached neighbor ids, in this agent's fixed permuted order.
    pub fn neighbors(&self) -> &[NodeId] {
        &self.neighbors
    }

    /// Degree-proportional probabilities aligned with [`Self::neighbors`].
    pub fn degree_weights(&self) -> &[f64] {
        &self.degree_weights
    }

    /// Inverse-distance probabilities aligned with [`Self::neighbors`].
    pub fn distance_weights(&self) -> &[f64] {
        &self.distance_weights
    }

    /// Pre-sampled wait before the next candidate move.
    pub fn next_wait(&self) -> f64 {
        self.next_wait
    }

    /// Absolute time of the next scheduled move, once armed.
    pub fn next_move_at(&self) -> f64 {
        self.next_move_at
    }

    /// Time of the last fired move (or of activation, before any move).
    pub fn last_move_at(&self) -> f64 {
        self.last_move_at
    }

    /// Samples one neighbor proportionally to degree.
    pub fn sample_degree_weighted(&self, rng: &mut SmallRng) -> NodeId {
        self.neighbors[self.degree_sampler.sample(rng)]
    }

    /// Samples one neighbor proportionally to inverse common-neighbor
    /// distance.
    pub fn sample_distance_weighted(&self, rng: &mut SmallRng) -> NodeId {
        self.neighbors[self.distance_sampler.sample(rng)]
    }

    /// Shared handle to the selection strategy.
    pub(crate) fn selection_policy(&self) -> Rc<dyn SelectionPolicy> {
        Rc::clone(&self.selection)
    }

    /// Shared handle to the interaction strategy.
    pub(crate) fn interaction_policy(&self) -> Rc<dyn InteractionPolicy> {
        Rc::clone(&self.interaction)
    }

    /// Shared handle to the timing strategy.
    pub(crate) fn timing_policy(&self) -> Rc<dyn TimingPolicy> {
        Rc::clone(&self.timing)
    }

    /// Flips `dormant -> active`. Returns false (and does nothing) if the
    /// agent is already active: re-activation has no observable effect.
    pub(crate) fn activate(&mut self, now: f64) -> bool {
        if self.state.is_active() {
            return false;
        }
        self.state = ActivationState::Active;
        self.last_move_at = now;
        true
    }

    /// Bookkeeping after one fired move.
    pub(crate) fn finish_move(&mut self, now: f64) {
        self.move_count += 1;
        self.last_move_at = now;
    }

    /// Records the freshly sampled wait and its absolute resumption time.
    pub(crate) fn arm(&mut self, wait: f64, at: f64) {
        self.next_wait = wait;
        self.next_move_at = at;
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("id", &self.id)
            .field("value", &self.value)
            .field("state", &self.state)
            .field("speed", &self.speed)
            .field("move_count", &self.move_count)
            .field("neighbors", &self.neighbors)
            .field("next_move_at", &self.next_move_at)
            .finish_non_exhaustive()
    }
}

/// Scales a weight vector to sum to one.
fn normalize(mut weights: Vec<f64>) -> Vec<f64> {
    let total: f64 = weights.iter().sum();
    for w in &mut weights {
        *w /= total;
    }
    weights
}
