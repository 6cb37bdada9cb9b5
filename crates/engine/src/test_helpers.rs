//! Shared test helpers for arbiter tests.

use pegwise_core::advisor::{Advisor, AdvisorEvent, AdvisorRequest};
use pegwise_core::error::AdvisorError;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A deterministic advisor stub.
///
/// Returns the same scripted reply (or event sequence) on every call
/// and counts how many calls were made.
pub struct ScriptedAdvisor {
    reply: String,
    events: Option<Vec<Result<AdvisorEvent, AdvisorError>>>,
    failure: Option<AdvisorError>,
    calls: AtomicUsize,
}

impl ScriptedAdvisor {
    /// Reply with fixed text on every `complete` (and as a single
    /// answer fragment when streamed).
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            events: None,
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Stream a fixed sequence of fragments.
    pub fn streaming(events: Vec<AdvisorEvent>) -> Self {
        Self::streaming_results(events.into_iter().map(Ok).collect())
    }

    /// Stream a fixed sequence of fragment results, including errors.
    pub fn streaming_results(events: Vec<Result<AdvisorEvent, AdvisorError>>) -> Self {
        Self {
            reply: String::new(),
            events: Some(events),
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Fail every call with the given error.
    pub fn failing(error: AdvisorError) -> Self {
        Self {
            reply: String::new(),
            events: None,
            failure: Some(error),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Advisor for ScriptedAdvisor {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, _request: AdvisorRequest) -> Result<String, AdvisorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(self.reply.clone()),
        }
    }

    async fn stream(
        &self,
        _request: AdvisorRequest,
    ) -> Result<tokio::sync::mpsc::Receiver<Result<AdvisorEvent, AdvisorError>>, AdvisorError>
    {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        let scripted = match &self.events {
            Some(events) => events.clone(),
            None => vec![
                Ok(AdvisorEvent::Answer(self.reply.clone())),
                Ok(AdvisorEvent::Completed),
            ],
        };

        let (tx, rx) = tokio::sync::mpsc::channel(scripted.len().max(1));
        tokio::spawn(async move {
            for event in scripted {
                if tx.send(event).await.is_err() {
                    return;
                }
            }
        });
        Ok(rx)
    }
}
