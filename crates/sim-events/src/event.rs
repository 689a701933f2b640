//! Move Event Types
//!
//! One record per fired interaction event. Move events are the atomic units
//! of a run's history: who moved, which neighbor was touched, and the
//! mover's opinion after the interaction. The engine only collects them when
//! event logging is enabled, since a long run produces far more moves than
//! snapshots.

use serde::{Deserialize, Serialize};

/// A single interaction event performed by an agent with a chosen neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveEvent {
    /// Simulation time at which the move fired.
    pub time: f64,
    /// Node id of the agent that performed the move.
    pub mover: usize,
    /// Node id of the selected interaction partner.
    pub target: usize,
    /// The mover's opinion value after the interaction.
    pub value: f64,
}

impl MoveEvent {
    /// Creates a new move event.
    pub fn new(time: f64, mover: usize, target: usize, value: f64) -> Self {
        Self {
            time,
            mover,
            target,
            value,
        }
    }

    /// Serializes the event to a JSON line (for JSONL format).
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes an event from a JSON line.
    pub fn from_jsonl(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_event_serialization() {
        let event = MoveEvent::new(3.25, 4, 7, 0.5);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""mover":4"#));
        assert!(json.contains(r#""target":7"#));

        let parsed: MoveEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn test_move_event_jsonl() {
        let event = MoveEvent::new(1.0, 0, 1, 2.0);
        let line = event.to_jsonl().unwrap();
        assert!(!line.contains('\n'));

        let parsed = MoveEvent::from_jsonl(&line).unwrap();
        assert_eq!(parsed, event);
    }
}
