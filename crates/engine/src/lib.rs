//! The Pegwise move-arbitration engine.
//!
//! One call flows through a fixed pipeline:
//!
//! 1. **Budget check** — games at the move ceiling are refused before
//!    any prompt is built or network call made
//! 2. **Enumerate** legal candidate moves (with the anti-oscillation
//!    rule and its forced-undo relaxation)
//! 3. **Render** the instruction and context prompts
//! 4. **Ask** the advisor, single-shot or streaming
//! 5. **Interpret** the untrusted reply text into a move proposal
//! 6. **Validate** the proposal against the authoritative board —
//!    the advisor's claim of legality is never trusted
//!
//! The engine is stateless across calls: every input arrives from the
//! caller and every result is built fresh.

pub mod arbiter;
pub mod candidates;
pub mod interpret;
pub mod prompt;
pub mod result;
pub mod stream_event;
pub mod validate;

pub use arbiter::{Arbiter, PuzzleState};
pub use candidates::legal_moves;
pub use interpret::{AgentProposal, extract_proposal};
pub use prompt::{SYSTEM_INSTRUCTIONS, render_context};
pub use result::MoveResult;
pub use stream_event::ArbiterEvent;
pub use validate::validate;

#[cfg(test)]
pub(crate) mod test_helpers;
