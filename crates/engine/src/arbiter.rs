//! The arbitration pipeline.
//!
//! One caller invocation triggers at most one advisor call and yields
//! exactly one move result. The arbiter holds no cross-request state:
//! board and history arrive with every call.

use crate::candidates::legal_moves;
use crate::interpret::extract_proposal;
use crate::prompt::{SYSTEM_INSTRUCTIONS, render_context};
use crate::result::MoveResult;
use crate::stream_event::ArbiterEvent;
use crate::validate::validate;
use pegwise_core::advisor::{Advisor, AdvisorEvent, AdvisorRequest};
use pegwise_core::board::{Board, Move};
use pegwise_core::error::MoveFault;
use std::sync::Arc;
use tracing::{debug, warn};

/// Everything the caller supplies for one arbitration.
#[derive(Debug, Clone)]
pub struct PuzzleState {
    pub board: Board,
    pub disk_count: u32,
    pub history: Vec<Move>,
}

/// Orchestrates enumeration, prompting, the advisor call, and
/// validation.
pub struct Arbiter {
    advisor: Arc<dyn Advisor>,
    model: String,
    max_moves: usize,
    history_window: usize,
}

impl Arbiter {
    /// Create an arbiter with the default move ceiling (150) and
    /// history window (10).
    pub fn new(advisor: Arc<dyn Advisor>, model: impl Into<String>) -> Self {
        Self {
            advisor,
            model: model.into(),
            max_moves: 150,
            history_window: 10,
        }
    }

    /// Set the move ceiling after which games are refused.
    pub fn with_max_moves(mut self, max: usize) -> Self {
        self.max_moves = max;
        self
    }

    /// Set how many recent moves the prompt shows.
    pub fn with_history_window(mut self, window: usize) -> Self {
        self.history_window = window;
        self
    }

    /// Budget check. Runs before any prompt is built or network call
    /// made, bounding worst-case latency and cost per game.
    fn budget_exhausted(&self, state: &PuzzleState) -> Option<MoveResult> {
        if state.history.len() >= self.max_moves {
            warn!(moves = state.history.len(), limit = self.max_moves, "Move budget exhausted");
            let fault = MoveFault::BudgetExceeded {
                limit: self.max_moves,
            };
            return Some(MoveResult::fault(&fault, 0, 0, Vec::new()));
        }
        None
    }

    fn prepare(&self, state: &PuzzleState) -> (Vec<Move>, AdvisorRequest) {
        let candidates = legal_moves(&state.board, state.history.last().copied());
        let request = AdvisorRequest {
            model: self.model.clone(),
            instructions: SYSTEM_INSTRUCTIONS.to_string(),
            input: render_context(
                &state.board,
                state.disk_count,
                &candidates,
                &state.history,
                self.history_window,
            ),
        };
        (candidates, request)
    }

    /// Single-shot arbitration: one blocking wait on the advisor.
    pub async fn decide(&self, state: &PuzzleState) -> MoveResult {
        if let Some(refused) = self.budget_exhausted(state) {
            return refused;
        }

        let (candidates, request) = self.prepare(state);
        debug!(
            candidates = candidates.len(),
            moves = state.history.len(),
            "Requesting move from advisor"
        );

        let content = match self.advisor.complete(request).await {
            Ok(content) => content,
            Err(e) => {
                warn!(error = %e, "Advisor call failed");
                return MoveResult::fault(&MoveFault::from(e), 0, 0, Vec::new());
            }
        };

        let proposal = extract_proposal(&content, Vec::new());
        validate(&proposal, &state.board, &candidates)
    }

    /// Streaming arbitration: reasoning fragments are forwarded as
    /// they arrive, followed by exactly one terminal `Complete` event.
    ///
    /// If the receiver is dropped (caller disconnect), the producer
    /// stops reading advisor fragments promptly and nothing is
    /// retained.
    pub async fn decide_stream(&self, state: PuzzleState) -> tokio::sync::mpsc::Receiver<ArbiterEvent> {
        let (tx, rx) = tokio::sync::mpsc::channel(32);

        if let Some(refused) = self.budget_exhausted(&state) {
            let _ = tx.try_send(ArbiterEvent::Complete(refused));
            return rx;
        }

        let (candidates, request) = self.prepare(&state);
        let advisor = self.advisor.clone();

        tokio::spawn(async move {
            let mut fragments = match advisor.stream(request).await {
                Ok(stream) => stream,
                Err(e) => {
                    warn!(error = %e, "Advisor stream failed to open");
                    let fault = MoveFault::from(e);
                    let _ = tx
                        .send(ArbiterEvent::Complete(MoveResult::fault(&fault, 0, 0, Vec::new())))
                        .await;
                    return;
                }
            };

            let mut content = String::new();
            let mut thinking = String::new();

            loop {
                match fragments.recv().await {
                    Some(Ok(AdvisorEvent::Thinking(text))) => {
                        thinking.push_str(&text);
                        if tx.send(ArbiterEvent::Reasoning { text }).await.is_err() {
                            return; // caller disconnected
                        }
                    }
                    Some(Ok(AdvisorEvent::Answer(text))) => content.push_str(&text),
                    Some(Ok(AdvisorEvent::Completed)) | None => break,
                    Some(Err(e)) => {
                        warn!(error = %e, "Advisor stream broke mid-flight");
                        let fault = MoveFault::from(e);
                        let thoughts = gather_thoughts(std::mem::take(&mut thinking));
                        let _ = tx
                            .send(ArbiterEvent::Complete(MoveResult::fault(&fault, 0, 0, thoughts)))
                            .await;
                        return;
                    }
                }
            }

            let thoughts = gather_thoughts(thinking);
            let proposal = extract_proposal(&content, thoughts);
            let result = validate(&proposal, &state.board, &candidates);
            let _ = tx.send(ArbiterEvent::Complete(result)).await;
        });

        rx
    }
}

fn gather_thoughts(thinking: String) -> Vec<String> {
    if thinking.is_empty() {
        Vec::new()
    } else {
        vec![thinking]
    }
}
