//! Proposal validation — the trust boundary.
//!
//! The advisor is untrusted: whatever it claims to have picked is
//! re-checked against the authoritative board and the enumerated
//! candidate set. Checks short-circuit in order, each producing a
//! typed, well-formed result.

use crate::interpret::AgentProposal;
use crate::result::MoveResult;
use pegwise_core::board::{Board, Move, PegId};
use pegwise_core::error::MoveFault;
use tracing::debug;

/// Validate a proposal against the board and candidate set.
///
/// Order: decodable code → non-empty source → stacking legality →
/// membership in the candidate set. The last check is what enforces
/// anti-oscillation independently of anything the advisor claims.
pub fn validate(proposal: &AgentProposal, board: &Board, candidates: &[Move]) -> MoveResult {
    let thoughts = proposal.thoughts.clone();

    if proposal.move_code.is_empty() {
        return MoveResult::fault(&MoveFault::Parse, -1, -1, thoughts);
    }

    let mut labels = proposal.move_code.chars();
    let from = labels.next().and_then(PegId::from_label);
    let to = labels.next().and_then(PegId::from_label);
    let trailing = labels.next().is_some();

    // Undecoded sides surface as -1, matching the wire format
    let from_idx = from.map_or(-1, |p| p.index() as i32);
    let to_idx = to.map_or(-1, |p| p.index() as i32);

    let (mv, disk) = match (from, to) {
        (Some(f), Some(t)) if f != t && !trailing => match board.top_disk(f) {
            Some(disk) => (Move { from: f, to: t }, disk),
            None => {
                return MoveResult::fault(&MoveFault::EmptySource, from_idx, to_idx, thoughts);
            }
        },
        _ => {
            debug!(code = %proposal.move_code, "Proposal code did not decode");
            return MoveResult::fault(&MoveFault::InvalidFormat, from_idx, to_idx, thoughts);
        }
    };

    if !board.can_place(disk, mv.to) {
        return MoveResult::fault(&MoveFault::IllegalPlacement, from_idx, to_idx, thoughts);
    }

    if !candidates.contains(&mv) {
        let fault = MoveFault::NotACandidate { code: mv.code() };
        return MoveResult::fault(&fault, from_idx, to_idx, thoughts);
    }

    MoveResult::legal(mv, proposal.rationale.clone(), thoughts)
}
