//! HTTP API gateway for Pegwise.
//!
//! Endpoints:
//!
//! - `POST /hanoi/move`        — one JSON move result
//! - `POST /hanoi/move/stream` — SSE: `reasoning` events, then one `complete`
//! - `GET  /health`            — liveness probe
//!
//! Built on Axum. The gateway holds no per-game state: every request
//! carries the full board and history, and malformed shapes are
//! rejected with a client error before any arbitration work.

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    response::sse::{Event as SseEvent, Sse},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::ReceiverStream;
use tracing::info;

use pegwise_advisor::OpenAiAdvisor;
use pegwise_core::board::{Board, RawMove};
use pegwise_engine::{Arbiter, MoveResult, PuzzleState};

/// Shared application state for the gateway.
pub struct GatewayState {
    pub arbiter: Arbiter,
}

type SharedState = Arc<GatewayState>;

/// Build the Axum router with all gateway routes.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/hanoi/move", post(move_handler))
        .route("/hanoi/move/stream", post(move_stream_handler))
        .layer(DefaultBodyLimit::max(1024 * 1024)) // 1 MB body limit
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the gateway HTTP server.
///
/// Fails fast when no API key is configured — the credential is a
/// startup precondition, never a per-request error.
pub async fn start(config: pegwise_config::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let api_key = config.require_api_key()?;

    let advisor = Arc::new(OpenAiAdvisor::with_timeout(
        &config.api_url,
        api_key,
        std::time::Duration::from_secs(config.request_timeout_secs),
    ));
    let arbiter = Arbiter::new(advisor, &config.model)
        .with_max_moves(config.max_moves)
        .with_history_window(config.history_window);

    let state = Arc::new(GatewayState { arbiter });
    let app = build_router(state);

    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    info!(addr = %addr, model = %config.model, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Request / Response types ---

/// The caller's puzzle snapshot.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MoveRequest {
    pegs: Vec<Vec<u32>>,
    disk_count: u32,
    #[serde(default)]
    move_history: Vec<RawMove>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

type ClientError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: String) -> ClientError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse { error: message }),
    )
}

/// Check the inbound shape and build a typed puzzle state. Any
/// violation aborts the request before arbitration starts.
fn parse_request(request: MoveRequest) -> Result<PuzzleState, ClientError> {
    if request.disk_count == 0 {
        return Err(bad_request("diskCount must be at least 1".into()));
    }

    let board = Board::from_vecs(request.pegs).map_err(|e| bad_request(e.to_string()))?;

    let mut history = Vec::with_capacity(request.move_history.len());
    for (index, raw) in request.move_history.iter().enumerate() {
        let mv = raw.decode().ok_or_else(|| {
            bad_request(format!(
                "moveHistory[{index}] is not a valid move: {} -> {}",
                raw.from, raw.to
            ))
        })?;
        history.push(mv);
    }

    Ok(PuzzleState {
        board,
        disk_count: request.disk_count,
        history,
    })
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `POST /hanoi/move` — single-shot arbitration.
async fn move_handler(
    State(state): State<SharedState>,
    Json(payload): Json<MoveRequest>,
) -> Result<Json<MoveResult>, ClientError> {
    let puzzle = parse_request(payload)?;
    info!(
        moves = puzzle.history.len(),
        disks = puzzle.disk_count,
        "Move request"
    );

    Ok(Json(state.arbiter.decide(&puzzle).await))
}

/// `POST /hanoi/move/stream` — SSE arbitration: zero or more
/// `reasoning` events followed by one terminal `complete` event.
async fn move_stream_handler(
    State(state): State<SharedState>,
    Json(payload): Json<MoveRequest>,
) -> Result<Sse<impl futures::Stream<Item = Result<SseEvent, Infallible>>>, ClientError> {
    let puzzle = parse_request(payload)?;
    info!(
        moves = puzzle.history.len(),
        disks = puzzle.disk_count,
        "Streaming move request"
    );

    let rx = state.arbiter.decide_stream(puzzle).await;
    let stream = ReceiverStream::new(rx).map(|event| {
        let name = event.event_type();
        let data = serde_json::to_string(&event).unwrap_or_default();
        Ok(SseEvent::default().event(name).data(data))
    });

    Ok(Sse::new(stream))
}
