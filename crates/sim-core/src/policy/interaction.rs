//! Interaction Policies
//!
//! An interaction receives the mover and its selected partner and may update
//! both opinion values. Since exactly one process runs at a time, the pair
//! is never observed mid-move by anyone else.

use crate::agent::Agent;

/// Updates both endpoints of one move.
pub trait InteractionPolicy {
    /// Applies the interaction to the mover and its partner.
    fn apply(&self, mover: &mut Agent, partner: &mut Agent);
}

/// Pairwise averaging: both endpoints take the arithmetic mean of their
/// pre-interaction values.
///
/// Symmetric, conserves the pair sum (and therefore the global sum), and is
/// idempotent when repeated immediately on the same pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct PairwiseAverage;

impl InteractionPolicy for PairwiseAverage {
    fn apply(&self, mover: &mut Agent, partner: &mut Agent) {
        let mean = (mover.value + partner.value) / 2.0;
        mover.value = mean;
        partner.value = mean;
    }
}
