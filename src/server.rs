//! HTTP relay server for browser clients.
//!
//! Exposes `POST /chat`, which pairs the submitted history with the persona
//! instruction and the server-held credential before forwarding upstream.
//! A missing credential surfaces as HTTP 500 on every request rather than a
//! startup failure; upstream failures surface as HTTP 502.

use std::env;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::client::{GeminiClient, Relay};
use crate::error::{Error, ErrorKind, Result};
use crate::observability::{RELAY_FAILURES, RELAY_REQUESTS};
use crate::retry::RetryPolicy;
use crate::types::{ChatAnswer, ChatRequest};

/// The relay absorbs a single transient blip per request; long backoff
/// sequences belong to interactive clients, not HTTP handlers.
const SERVER_MAX_ATTEMPTS: u32 = 2;

/// Shared state for the relay server.
#[derive(Clone)]
pub struct AppState {
    relay: Option<GeminiClient>,
    retry: RetryPolicy,
    instruction: Arc<str>,
}

impl AppState {
    /// Creates state from explicit parts.
    pub fn new(
        relay: Option<GeminiClient>,
        retry: RetryPolicy,
        instruction: impl Into<String>,
    ) -> Self {
        Self {
            relay,
            retry,
            instruction: Arc::from(instruction.into()),
        }
    }

    /// Creates state from the process environment.
    ///
    /// The credential comes from GEMINI_API_KEY. Its absence is not fatal
    /// here: requests are answered with HTTP 500 until it is provided.
    pub fn from_env(instruction: &str) -> Result<Self> {
        let relay = match env::var("GEMINI_API_KEY") {
            Ok(key) => Some(GeminiClient::new(Some(key))?),
            Err(_) => None,
        };
        Ok(Self::new(
            relay,
            RetryPolicy::new(SERVER_MAX_ATTEMPTS),
            instruction,
        ))
    }

    /// Returns true if a credential was configured.
    pub fn has_credential(&self) -> bool {
        self.relay.is_some()
    }
}

/// A failed relay request, mapped to the endpoint's error contract.
#[derive(Debug)]
pub struct RelayFailure(Error);

impl RelayFailure {
    fn status(&self) -> StatusCode {
        match self.0.kind() {
            ErrorKind::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<Error> for RelayFailure {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for RelayFailure {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({"error": self.0.to_string()}));
        (self.status(), body).into_response()
    }
}

/// POST /chat - answer a conversation history.
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> std::result::Result<Json<ChatAnswer>, RelayFailure> {
    RELAY_REQUESTS.click();

    let Some(relay) = state.relay.as_ref() else {
        RELAY_FAILURES.click();
        return Err(RelayFailure(Error::configuration(
            "GEMINI_API_KEY is not set",
        )));
    };

    let history = request.chat_history.as_slice();
    let instruction = state.instruction.as_ref();
    let result = state
        .retry
        .run(move || relay.generate(history, instruction))
        .await;

    match result {
        Ok(answer) => Ok(Json(ChatAnswer::new(answer))),
        Err(err) => {
            RELAY_FAILURES.click();
            tracing::warn!(error = %err, "relay request failed");
            Err(RelayFailure(err))
        }
    }
}

/// GET /health - Simple liveness check.
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Build the relay router with CORS and request tracing.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/chat", post(chat))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
