//! HTTP Q&A proxy.
//!
//! Stateless: one question-answering request in, one response out. History
//! lives client-side in the session's conversation log; nothing is retained
//! here between requests.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/api/ask` | Answer a question about the revealed excerpt |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Status contract
//!
//! - `200 { answer }` — provider answered (plus `offline: true` when no
//!   credential is configured and the fixed placeholder was returned).
//! - `400 { error }` — absent or blank question; no upstream call made.
//! - `500 { error }` — upstream or unexpected failure.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so a browser front-end
//! can call the proxy directly.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::qa::{self, AskError, AskRequest};

/// Shared state passed to route handlers via Axum's `State` extractor.
#[derive(Clone)]
struct AppState {
    config: Arc<Config>,
    /// One client reused across requests; carries the provider timeout.
    http: reqwest::Client,
}

/// Starts the Q&A proxy.
///
/// Binds to `[server].bind` and serves until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.provider.timeout_secs))
        .build()?;

    let state = AppState {
        config: Arc::new(config.clone()),
        http,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/api/ask", post(handle_ask))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(state);

    println!("Lento ask proxy listening on http://{}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

/// Flat `{ error }` body used for both 400 and 500 responses.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

struct AppError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<AskError> for AppError {
    fn from(err: AskError) -> Self {
        let status = match err {
            AskError::BlankQuestion => StatusCode::BAD_REQUEST,
            AskError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        AppError {
            status,
            message: err.to_string(),
        }
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// Handler for `GET /health`.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ POST /api/ask ============

/// Handler for `POST /api/ask`.
///
/// Validation and the offline/demo short-circuit happen in [`qa`]; this
/// handler only maps the outcome onto the status contract.
async fn handle_ask(
    State(state): State<AppState>,
    Json(req): Json<AskRequest>,
) -> Result<Json<qa::AskReply>, AppError> {
    let reply = qa::answer_request(&state.config, &state.http, &req).await?;
    Ok(Json(reply))
}
