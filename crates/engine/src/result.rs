//! The normalized answer returned to the caller.

use pegwise_core::board::Move;
use pegwise_core::error::MoveFault;
use serde::{Deserialize, Serialize};

/// The final answer for one arbitration call.
///
/// `from`/`to` are peg indices; `-1` marks a side that never decoded
/// (for fault results the indices mirror the historical wire format:
/// `-1` for undecodable labels, `0` when no move was attempted at
/// all). `error`, when present, is a stable classification from
/// `MoveFault::kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    pub from: i32,
    pub to: i32,
    pub reasoning: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub thoughts: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MoveResult {
    /// A validated, legal move. An empty rationale becomes "OK".
    pub fn legal(mv: Move, rationale: String, thoughts: Vec<String>) -> Self {
        let reasoning = if rationale.is_empty() {
            "OK".to_string()
        } else {
            rationale
        };
        Self {
            from: mv.from.index() as i32,
            to: mv.to.index() as i32,
            reasoning,
            thoughts,
            error: None,
        }
    }

    /// A well-formed error result: classification in `error`,
    /// human-readable text in `reasoning`.
    pub fn fault(fault: &MoveFault, from: i32, to: i32, thoughts: Vec<String>) -> Self {
        Self {
            from,
            to,
            reasoning: fault.to_string(),
            thoughts,
            error: Some(fault.kind().to_string()),
        }
    }

    /// The chosen move, when this result carries a valid one.
    pub fn chosen_move(&self) -> Option<Move> {
        if self.error.is_some() {
            return None;
        }
        pegwise_core::board::RawMove {
            from: usize::try_from(self.from).ok()?,
            to: usize::try_from(self.to).ok()?,
        }
        .decode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legal_result_defaults_reasoning() {
        let mv = Move::parse_code("AC").unwrap();
        let result = MoveResult::legal(mv, String::new(), vec![]);
        assert_eq!(result.from, 0);
        assert_eq!(result.to, 2);
        assert_eq!(result.reasoning, "OK");
        assert!(result.error.is_none());
        assert_eq!(result.chosen_move(), Some(mv));
    }

    #[test]
    fn fault_result_carries_kind_and_text() {
        let result = MoveResult::fault(&MoveFault::EmptySource, 2, 1, vec![]);
        assert_eq!(result.error.as_deref(), Some("empty-source"));
        assert_eq!(result.reasoning, "Empty source");
        assert!(result.chosen_move().is_none());
    }

    #[test]
    fn serialization_omits_empty_optionals() {
        let mv = Move::parse_code("AB").unwrap();
        let json = serde_json::to_string(&MoveResult::legal(mv, "go".into(), vec![])).unwrap();
        assert!(!json.contains("error"));
        assert!(!json.contains("thoughts"));
        assert!(json.contains(r#""from":0"#));
        assert!(json.contains(r#""to":1"#));
    }
}
