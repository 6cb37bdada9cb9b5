//! Advisor trait — the abstraction over the external reasoning service.
//!
//! An Advisor knows how to send a prompt pair to an LLM and get a move
//! suggestion back, either as one complete reply or as a stream of
//! tagged fragments. The arbitration engine calls `complete()` or
//! `stream()` without knowing which backend is behind the trait, so
//! tests can substitute a deterministic stub.

use crate::error::AdvisorError;
use serde::{Deserialize, Serialize};

/// The prompt pair sent to the reasoning service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorRequest {
    /// The model to use (e.g. "gpt-5.2")
    pub model: String,

    /// Fixed system/instruction text describing rules and reply shape
    pub instructions: String,

    /// Per-call context: board state, candidates, history
    pub input: String,
}

/// One fragment of an incrementally delivered reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvisorEvent {
    /// Partial reasoning-summary text.
    Thinking(String),

    /// Partial answer text.
    Answer(String),

    /// Terminal marker — no further fragments follow.
    Completed,
}

/// The core Advisor trait.
///
/// `stream()` has a default implementation that wraps `complete()` as a
/// single answer fragment, so simple backends and stubs only need one
/// method.
#[async_trait::async_trait]
pub trait Advisor: Send + Sync {
    /// A human-readable name for this advisor (e.g. "openai").
    fn name(&self) -> &str;

    /// Send a request and get the complete answer text.
    async fn complete(&self, request: AdvisorRequest) -> Result<String, AdvisorError>;

    /// Send a request and get a stream of reply fragments.
    async fn stream(
        &self,
        request: AdvisorRequest,
    ) -> Result<tokio::sync::mpsc::Receiver<Result<AdvisorEvent, AdvisorError>>, AdvisorError>
    {
        let content = self.complete(request).await?;
        let (tx, rx) = tokio::sync::mpsc::channel(2);
        let _ = tx.send(Ok(AdvisorEvent::Answer(content))).await;
        let _ = tx.send(Ok(AdvisorEvent::Completed)).await;
        Ok(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedAdvisor;

    #[async_trait::async_trait]
    impl Advisor for FixedAdvisor {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn complete(&self, _request: AdvisorRequest) -> Result<String, AdvisorError> {
            Ok(r#"{"m":"AC","r":"ok"}"#.to_string())
        }
    }

    fn request() -> AdvisorRequest {
        AdvisorRequest {
            model: "test-model".into(),
            instructions: "rules".into(),
            input: "state".into(),
        }
    }

    #[tokio::test]
    async fn default_stream_wraps_complete() {
        let advisor = FixedAdvisor;
        let mut rx = advisor.stream(request()).await.unwrap();

        let first = rx.recv().await.unwrap().unwrap();
        assert_eq!(
            first,
            AdvisorEvent::Answer(r#"{"m":"AC","r":"ok"}"#.to_string())
        );

        let second = rx.recv().await.unwrap().unwrap();
        assert_eq!(second, AdvisorEvent::Completed);

        assert!(rx.recv().await.is_none());
    }

    #[test]
    fn request_serialization() {
        let json = serde_json::to_string(&request()).unwrap();
        assert!(json.contains("test-model"));
        assert!(json.contains("instructions"));
    }
}
