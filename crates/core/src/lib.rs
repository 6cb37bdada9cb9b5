//! # Pegwise Core
//!
//! Domain types, traits, and error definitions for the Pegwise
//! Tower of Hanoi move-arbitration service. This crate has **zero
//! framework dependencies** — it defines the board model and the
//! advisor seam that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The external reasoning service is defined as a trait here
//! (`Advisor`); implementations live in their own crate. This keeps
//! the arbitration engine testable with deterministic stubs and the
//! dependency graph pointing inward on core.

pub mod advisor;
pub mod board;
pub mod error;

// Re-export key types at crate root for ergonomics
pub use advisor::{Advisor, AdvisorEvent, AdvisorRequest};
pub use board::{Board, Move, PegId, RawMove};
pub use error::{AdvisorError, BoardError, MoveFault};
