//! Behavioral Policies
//!
//! The three per-move strategies (neighbor selection, interaction, wait-time
//! sampling) plus the activation rule. Each strategy is a stateless
//! capability trait injected at model construction; every agent holds shared
//! references to the same instances. Policies are trusted extension points:
//! one that panics aborts the run, and the engine makes no attempt to
//! recover.

pub mod activation;
pub mod interaction;
pub mod selection;
pub mod timing;

pub use activation::ActivationPolicy;
pub use interaction::{InteractionPolicy, PairwiseAverage};
pub use selection::{
    DegreeWeightedSelection, DistanceWeightedSelection, RoundRobinSelection, SelectionKind,
    SelectionPolicy, UniformSelection,
};
pub use timing::{ExponentialWait, PoissonWait, TimingKind, TimingPolicy};

use std::rc::Rc;

/// The full set of strategies wired into a model.
#[derive(Clone)]
pub struct PolicySet {
    /// Picks one neighbor per move.
    pub selection: Rc<dyn SelectionPolicy>,
    /// Updates the two endpoint values of a move.
    pub interaction: Rc<dyn InteractionPolicy>,
    /// Samples the wait before an agent's next move.
    pub timing: Rc<dyn TimingPolicy>,
    /// When agents leave dormancy.
    pub activation: ActivationPolicy,
}

impl PolicySet {
    /// Bundles explicit strategy instances.
    pub fn new(
        selection: Rc<dyn SelectionPolicy>,
        interaction: Rc<dyn InteractionPolicy>,
        timing: Rc<dyn TimingPolicy>,
        activation: ActivationPolicy,
    ) -> Self {
        Self {
            selection,
            interaction,
            timing,
            activation,
        }
    }

    /// Builds the set from the named built-in variants.
    pub fn from_kinds(
        selection: SelectionKind,
        timing: TimingKind,
        activation: ActivationPolicy,
    ) -> Self {
        Self {
            selection: selection.build(),
            interaction: Rc::new(PairwiseAverage),
            timing: timing.build(),
            activation,
        }
    }
}

impl Default for PolicySet {
    /// Uniform selection, pairwise averaging, exponential waits, activation
    /// taken from the feature list.
    fn default() -> Self {
        Self::from_kinds(
            SelectionKind::Uniform,
            TimingKind::Exponential,
            ActivationPolicy::FromFeatures,
        )
    }
}

impl std::fmt::Debug for PolicySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicySet")
            .field("activation", &self.activation)
            .finish_non_exhaustive()
    }
}
