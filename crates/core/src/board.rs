//! The Tower of Hanoi board model.
//!
//! Three ordered disk stacks, stored bottom-to-top. The service never
//! applies moves — it only validates them — so the board is immutable
//! once accepted from the caller.

use crate::error::BoardError;
use serde::{Deserialize, Serialize};

/// One of the three pegs. Labeled A, B, C on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PegId {
    A,
    B,
    C,
}

impl PegId {
    /// All pegs in label order. Iteration order is the contract that
    /// makes candidate enumeration deterministic.
    pub const ALL: [PegId; 3] = [PegId::A, PegId::B, PegId::C];

    /// Zero-based peg index, matching the caller's `pegs` array.
    pub fn index(self) -> usize {
        match self {
            PegId::A => 0,
            PegId::B => 1,
            PegId::C => 2,
        }
    }

    /// The single-letter label used in move codes and prompts.
    pub fn label(self) -> char {
        match self {
            PegId::A => 'A',
            PegId::B => 'B',
            PegId::C => 'C',
        }
    }

    pub fn from_index(index: usize) -> Option<PegId> {
        match index {
            0 => Some(PegId::A),
            1 => Some(PegId::B),
            2 => Some(PegId::C),
            _ => None,
        }
    }

    pub fn from_label(label: char) -> Option<PegId> {
        match label {
            'A' => Some(PegId::A),
            'B' => Some(PegId::B),
            'C' => Some(PegId::C),
            _ => None,
        }
    }
}

impl std::fmt::Display for PegId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Moving the top disk of `from` onto `to`. Always `from != to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: PegId,
    pub to: PegId,
}

impl Move {
    /// Create a move between two distinct pegs.
    pub fn new(from: PegId, to: PegId) -> Option<Move> {
        if from == to { None } else { Some(Move { from, to }) }
    }

    /// The two-letter wire code, e.g. "AC".
    pub fn code(self) -> String {
        format!("{}{}", self.from.label(), self.to.label())
    }

    /// Parse a two-letter code like "AC". Rejects unknown labels,
    /// identical pegs, and any extra characters.
    pub fn parse_code(code: &str) -> Option<Move> {
        let mut chars = code.chars();
        let from = PegId::from_label(chars.next()?)?;
        let to = PegId::from_label(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Move::new(from, to)
    }

    /// Whether this move exactly undoes `other`.
    pub fn is_reverse_of(self, other: Move) -> bool {
        self.from == other.to && self.to == other.from
    }

    /// The move that undoes this one.
    pub fn reversed(self) -> Move {
        Move {
            from: self.to,
            to: self.from,
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// A history entry exactly as the caller sent it: raw peg indices,
/// not yet range-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMove {
    pub from: usize,
    pub to: usize,
}

impl RawMove {
    /// Decode into a typed `Move`. `None` when an index is out of
    /// range or the pegs are identical.
    pub fn decode(self) -> Option<Move> {
        Move::new(PegId::from_index(self.from)?, PegId::from_index(self.to)?)
    }
}

/// The authoritative peg state for one request.
///
/// Invariant: every peg is strictly descending bottom-to-top and all
/// disk sizes are positive. `try_new` is the only way in, so a `Board`
/// in hand is always well-formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pegs: [Vec<u32>; 3],
}

impl Board {
    /// Accept a peg layout, enforcing the stacking invariant.
    pub fn try_new(pegs: [Vec<u32>; 3]) -> Result<Board, BoardError> {
        for (peg, disks) in PegId::ALL.iter().zip(&pegs) {
            for pair in disks.windows(2) {
                if pair[1] >= pair[0] {
                    return Err(BoardError::UnsortedPeg { peg: peg.label() });
                }
            }
            if disks.contains(&0) {
                return Err(BoardError::ZeroDisk { peg: peg.label() });
            }
        }
        Ok(Board { pegs })
    }

    /// Accept the caller's wire shape: a list that must hold exactly
    /// three pegs.
    pub fn from_vecs(pegs: Vec<Vec<u32>>) -> Result<Board, BoardError> {
        let count = pegs.len();
        let arr: [Vec<u32>; 3] = pegs
            .try_into()
            .map_err(|_| BoardError::WrongPegCount(count))?;
        Board::try_new(arr)
    }

    /// Disks on one peg, bottom-to-top.
    pub fn peg(&self, id: PegId) -> &[u32] {
        &self.pegs[id.index()]
    }

    /// The disk currently movable from a peg, if any.
    pub fn top_disk(&self, id: PegId) -> Option<u32> {
        self.pegs[id.index()].last().copied()
    }

    /// Stacking legality: destination empty, or its top disk larger
    /// than the disk being placed.
    pub fn can_place(&self, disk: u32, dest: PegId) -> bool {
        match self.top_disk(dest) {
            None => true,
            Some(top) => top > disk,
        }
    }

    /// True when no peg holds any disk.
    pub fn is_empty(&self) -> bool {
        self.pegs.iter().all(|p| p.is_empty())
    }
}
