//! Activation Policy
//!
//! Decides when dormant agents join the dynamics. Activation itself is
//! always monotone and at-most-once; the policy only controls what triggers
//! it.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// When dormant agents become active.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum ActivationPolicy {
    /// Exactly the agents whose feature state is `active` are activated at
    /// construction time; everyone else stays dormant for the whole run.
    #[default]
    FromFeatures,
    /// As above, and additionally a move whose selected partner is dormant
    /// activates that partner.
    OnContact,
}
