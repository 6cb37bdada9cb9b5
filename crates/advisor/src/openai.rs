//! OpenAI `/v1/responses` advisor implementation.
//!
//! Supports:
//! - Single-shot completions (one JSON body, answer text extracted)
//! - Streaming SSE consumption: reasoning-summary deltas, output-text
//!   deltas, and terminal completion markers
//!
//! Garbled individual SSE frames are skipped, not fatal; only a broken
//! byte stream or a non-success status fails the call.

use futures::StreamExt;
use pegwise_core::advisor::{Advisor, AdvisorEvent, AdvisorRequest};
use pegwise_core::error::AdvisorError;
use serde::Deserialize;
use tracing::{debug, trace, warn};

/// An advisor backed by an OpenAI-style `/responses` endpoint.
pub struct OpenAiAdvisor {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl OpenAiAdvisor {
    /// Create a new advisor with the default 120 s request timeout.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_timeout(base_url, api_key, std::time::Duration::from_secs(120))
    }

    /// Create a new advisor with an explicit request timeout.
    pub fn with_timeout(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: std::time::Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        }
    }

    fn request_body(request: &AdvisorRequest, stream: bool) -> serde_json::Value {
        serde_json::json!({
            "model": request.model,
            "input": request.input,
            "instructions": request.instructions,
            "stream": stream,
            "reasoning": {
                "effort": "low",
                "summary": "auto",
            },
        })
    }

    async fn post(
        &self,
        body: serde_json::Value,
        streaming: bool,
    ) -> Result<reqwest::Response, AdvisorError> {
        let url = format!("{}/responses", self.base_url);

        let mut builder = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json");
        if streaming {
            builder = builder.header("Accept", "text/event-stream");
        }

        let response = builder.json(&body).send().await.map_err(|e| {
            if e.is_timeout() {
                AdvisorError::Timeout(e.to_string())
            } else {
                AdvisorError::Network(e.to_string())
            }
        })?;

        let status = response.status().as_u16();

        if status == 401 || status == 403 {
            return Err(AdvisorError::AuthenticationFailed(
                "Invalid API key or insufficient permissions".into(),
            ));
        }

        if !response.status().is_success() {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Advisor returned error");
            return Err(AdvisorError::Api {
                status_code: status,
                message: error_body,
            });
        }

        Ok(response)
    }
}

#[async_trait::async_trait]
impl Advisor for OpenAiAdvisor {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: AdvisorRequest) -> Result<String, AdvisorError> {
        debug!(model = %request.model, "Sending completion request");

        let body = Self::request_body(&request, false);
        let response = self.post(body, false).await?;

        let reply: ResponsesReply = response.json().await.map_err(|e| AdvisorError::Api {
            status_code: 200,
            message: format!("Failed to parse response: {e}"),
        })?;

        Ok(reply.output_text())
    }

    async fn stream(
        &self,
        request: AdvisorRequest,
    ) -> Result<tokio::sync::mpsc::Receiver<Result<AdvisorEvent, AdvisorError>>, AdvisorError>
    {
        debug!(model = %request.model, "Sending streaming request");

        let body = Self::request_body(&request, true);
        let response = self.post(body, true).await?;

        let (tx, rx) = tokio::sync::mpsc::channel(64);

        // Read the SSE byte stream and forward tagged fragments until a
        // terminal marker or end-of-stream.
        tokio::spawn(async move {
            let mut byte_stream = response.bytes_stream();
            let mut buffer = String::new();

            while let Some(chunk_result) = byte_stream.next().await {
                let bytes = match chunk_result {
                    Ok(b) => b,
                    Err(e) => {
                        let _ = tx
                            .send(Err(AdvisorError::StreamInterrupted(e.to_string())))
                            .await;
                        return;
                    }
                };

                buffer.push_str(&String::from_utf8_lossy(&bytes));

                // Process complete lines
                while let Some(line_end) = buffer.find('\n') {
                    let line = buffer[..line_end].trim_end_matches('\r').to_string();
                    buffer = buffer[line_end + 1..].to_string();

                    // Skip empty lines and SSE comments
                    if line.is_empty() || line.starts_with(':') {
                        continue;
                    }

                    let Some(data) = line.strip_prefix("data: ") else {
                        continue;
                    };
                    let data = data.trim();

                    if data == "[DONE]" {
                        let _ = tx.send(Ok(AdvisorEvent::Completed)).await;
                        return;
                    }

                    match interpret_frame(data) {
                        Frame::Emit(event) => {
                            if tx.send(Ok(event)).await.is_err() {
                                return; // receiver dropped
                            }
                        }
                        Frame::Finish => {
                            let _ = tx.send(Ok(AdvisorEvent::Completed)).await;
                            return;
                        }
                        Frame::Ignore => {}
                    }
                }
            }

            // Stream ended without a terminal marker — still complete
            let _ = tx.send(Ok(AdvisorEvent::Completed)).await;
        });

        Ok(rx)
    }
}

/// What to do with one SSE `data:` payload.
enum Frame {
    Emit(AdvisorEvent),
    Finish,
    Ignore,
}

/// Classify a single SSE data payload. Unparseable or unknown frames
/// are ignored so one garbled event never kills a healthy stream.
fn interpret_frame(data: &str) -> Frame {
    let frame: SseFrame = match serde_json::from_str(data) {
        Ok(f) => f,
        Err(e) => {
            trace!(data = %data, error = %e, "Ignoring unparseable SSE frame");
            return Frame::Ignore;
        }
    };

    match frame.kind.as_str() {
        "response.reasoning_summary_text.delta" => {
            Frame::Emit(AdvisorEvent::Thinking(frame.delta.unwrap_or_default()))
        }
        "response.output_text.delta" => {
            Frame::Emit(AdvisorEvent::Answer(frame.delta.unwrap_or_default()))
        }
        "response.completed" | "response.done" => Frame::Finish,
        _ => Frame::Ignore,
    }
}

// --- Responses API types (internal) ---

/// A single SSE `data: {...}` frame from a streaming response.
#[derive(Debug, Deserialize)]
struct SseFrame {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    delta: Option<String>,
}

/// A non-streaming `/responses` reply body.
#[derive(Debug, Deserialize)]
struct ResponsesReply {
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    content: Vec<ContentItem>,
}

#[derive(Debug, Deserialize)]
struct ContentItem {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

impl ResponsesReply {
    /// Concatenate all output-text content across message items.
    fn output_text(&self) -> String {
        let mut text = String::new();
        for item in &self.output {
            if item.kind != "message" {
                continue;
            }
            for content in &item.content {
                if content.kind == "output_text" {
                    text.push_str(&content.text);
                }
            }
        }
        text
    }
}
