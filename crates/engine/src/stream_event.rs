//! Caller-facing streaming events.
//!
//! In streaming mode the gateway forwards zero or more `reasoning`
//! progress events followed by exactly one terminal `complete` event
//! carrying the move result.

use crate::result::MoveResult;
use serde::{Deserialize, Serialize};

/// Events emitted by the arbiter during a streaming call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ArbiterEvent {
    /// A fragment of the advisor's reasoning summary.
    Reasoning { text: String },

    /// The terminal event — the validated move result.
    Complete(MoveResult),
}

impl ArbiterEvent {
    /// SSE event name for this event type.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Reasoning { .. } => "reasoning",
            Self::Complete(_) => "complete",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pegwise_core::board::Move;

    #[test]
    fn reasoning_serialization() {
        let event = ArbiterEvent::Reasoning {
            text: "considering AC".into(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"reasoning""#));
        assert!(json.contains(r#""text":"considering AC""#));
        assert_eq!(event.event_type(), "reasoning");
    }

    #[test]
    fn complete_serialization_flattens_result() {
        let mv = Move::parse_code("AC").unwrap();
        let event = ArbiterEvent::Complete(MoveResult::legal(mv, "ok".into(), vec![]));
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"complete""#));
        assert!(json.contains(r#""from":0"#));
        assert!(json.contains(r#""to":2"#));
        assert_eq!(event.event_type(), "complete");
    }

    #[test]
    fn deserialization_round_trip() {
        let json = r#"{"type":"complete","from":0,"to":2,"reasoning":"ok"}"#;
        let event: ArbiterEvent = serde_json::from_str(json).unwrap();
        match event {
            ArbiterEvent::Complete(result) => {
                assert_eq!(result.from, 0);
                assert_eq!(result.to, 2);
            }
            _ => panic!("wrong variant"),
        }
    }
}
