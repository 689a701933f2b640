//! Agent Feature Types
//!
//! Immutable per-node inputs consumed when a model is constructed: the
//! initial opinion value, the initial activation flag, and the rate/scale
//! parameter of the agent's inter-event-time distribution.

use serde::{Deserialize, Serialize};

/// Whether an agent participates in the dynamics yet.
///
/// The transition `Dormant -> Active` happens at most once per run and is
/// irreversible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivationState {
    #[default]
    Dormant,
    Active,
}

impl ActivationState {
    /// Returns true if the agent is participating in the dynamics.
    pub fn is_active(self) -> bool {
        matches!(self, ActivationState::Active)
    }
}

/// Immutable triple assigned to one topology node before a run.
///
/// Created once per node, consumed to initialize an agent, never mutated
/// after assignment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentFeatures {
    /// Initial scalar opinion.
    pub value: f64,
    /// Initial activation flag.
    pub state: ActivationState,
    /// Rate/scale parameter for the inter-event-time distribution.
    /// Must be strictly positive; the model rejects anything else.
    pub speed: f64,
}

impl AgentFeatures {
    /// Creates a feature triple.
    pub fn new(value: f64, state: ActivationState, speed: f64) -> Self {
        Self {
            value,
            state,
            speed,
        }
    }

    /// Creates a feature triple for an agent that starts active.
    pub fn active(value: f64, speed: f64) -> Self {
        Self::new(value, ActivationState::Active, speed)
    }

    /// Creates a feature triple for an agent that starts dormant.
    pub fn dormant(value: f64, speed: f64) -> Self {
        Self::new(value, ActivationState::Dormant, speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activation_state_default_is_dormant() {
        assert_eq!(ActivationState::default(), ActivationState::Dormant);
        assert!(!ActivationState::default().is_active());
    }

    #[test]
    fn test_activation_state_serialization() {
        assert_eq!(
            serde_json::to_string(&ActivationState::Dormant).unwrap(),
            r#""dormant""#
        );
        assert_eq!(
            serde_json::to_string(&ActivationState::Active).unwrap(),
            r#""active""#
        );
    }

    #[test]
    fn test_features_constructors() {
        let f = AgentFeatures::active(0.25, 2.0);
        assert_eq!(f.value, 0.25);
        assert!(f.state.is_active());
        assert_eq!(f.speed, 2.0);

        let g = AgentFeatures::dormant(-1.0, 1.0);
        assert!(!g.state.is_active());
    }

    #[test]
    fn test_features_roundtrip() {
        let f = AgentFeatures::new(1.5, ActivationState::Active, 0.5);
        let json = serde_json::to_string(&f).unwrap();
        let parsed: AgentFeatures = serde_json::from_str(&json).unwrap();
        assert_eq!(f, parsed);
    }
}
