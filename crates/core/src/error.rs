//! Error types for the Pegwise domain.
//!
//! Uses `thiserror` for ergonomic error definitions. Each fault that
//! can reach the caller carries a stable wire classification via
//! `kind()`; the `Display` text doubles as the human-readable
//! reasoning string in a move result.

use thiserror::Error;

/// Failures talking to the external reasoning service.
#[derive(Debug, Clone, Error)]
pub enum AdvisorError {
    #[error("API request failed: {message} (status: {status_code})")]
    Api { status_code: u16, message: String },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Stream interrupted: {0}")]
    StreamInterrupted(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl AdvisorError {
    /// Wire classification: did the upstream service answer with a
    /// failure, or did the transport itself break?
    pub fn kind(&self) -> &'static str {
        match self {
            AdvisorError::Api { .. } | AdvisorError::AuthenticationFailed(_) => "upstream-error",
            AdvisorError::StreamInterrupted(_)
            | AdvisorError::Timeout(_)
            | AdvisorError::Network(_) => "transport-error",
        }
    }
}

/// A peg layout the service refuses to process. These abort the
/// request with a client error before any other work happens.
#[derive(Debug, Clone, Error)]
pub enum BoardError {
    #[error("expected exactly 3 pegs, got {0}")]
    WrongPegCount(usize),

    #[error("peg {peg} is not stacked in descending order")]
    UnsortedPeg { peg: char },

    #[error("peg {peg} contains a zero-sized disk")]
    ZeroDisk { peg: char },
}

/// Why arbitration did not produce a legal move.
///
/// Every variant converts into a well-formed move result rather than
/// a raw fault: the caller always gets a parseable answer.
#[derive(Debug, Clone, Error)]
pub enum MoveFault {
    #[error("Gave up after {limit} moves.")]
    BudgetExceeded { limit: usize },

    #[error("{0}")]
    Advisor(#[from] AdvisorError),

    #[error("No move found in reply")]
    Parse,

    #[error("Invalid move format")]
    InvalidFormat,

    #[error("Empty source")]
    EmptySource,

    #[error("Invalid: big on small")]
    IllegalPlacement,

    #[error("Move {code} is not among the offered candidates")]
    NotACandidate { code: String },
}

impl MoveFault {
    /// The stable error classification carried on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            MoveFault::BudgetExceeded { .. } => "budget-exceeded",
            MoveFault::Advisor(e) => e.kind(),
            MoveFault::Parse => "parse-error",
            MoveFault::InvalidFormat => "invalid-format",
            MoveFault::EmptySource => "empty-source",
            MoveFault::IllegalPlacement => "illegal-placement",
            MoveFault::NotACandidate { .. } => "not-a-candidate",
        }
    }
}
