//! Legal move enumeration.
//!
//! Candidates are every physically legal move except the exact reverse
//! of the immediately preceding move. Without that exclusion the state
//! graph allows an immediate undo, which lets an advisor thrash
//! between two states forever.

use pegwise_core::board::{Board, Move, PegId};

/// Enumerate candidate moves for the current board.
///
/// Order is deterministic (source peg ascending, then destination peg
/// ascending) so prompts and tests are reproducible.
///
/// If the anti-oscillation filter would leave nothing, the reverse of
/// the last move is offered on its own — a forced undo — so the set is
/// never empty while a physically legal move exists.
pub fn legal_moves(board: &Board, last: Option<Move>) -> Vec<Move> {
    let mut moves = Vec::new();

    for from in PegId::ALL {
        let Some(disk) = board.top_disk(from) else {
            continue;
        };
        for to in PegId::ALL {
            if to == from {
                continue;
            }
            if let Some(last) = last {
                if last.from == to && last.to == from {
                    continue;
                }
            }
            if board.can_place(disk, to) {
                // distinct pegs, so construction cannot fail
                if let Some(mv) = Move::new(from, to) {
                    moves.push(mv);
                }
            }
        }
    }

    // Only undo available: relax the filter
    if moves.is_empty() {
        if let Some(last) = last {
            moves.push(last.reversed());
        }
    }

    moves
}
