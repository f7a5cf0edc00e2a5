//! Chat API endpoints.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::config;
use crate::format;

use super::ApiContext;

/// Build the chat router.
pub fn chat_router(ctx: ApiContext) -> Router {
    Router::new()
        .route("/get_response", post(get_response))
        .route("/health", get(health))
        .with_state(ctx)
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// `POST /get_response` — answer one free-text message.
///
/// Always HTTP 200 with a `response` string: missing input and an unloaded
/// engine are conversational replies, not transport errors (the front end
/// renders whatever comes back).
async fn get_response(
    State(ctx): State<ApiContext>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let Some(engine) = ctx.engine() else {
        return Json(ChatResponse {
            response: format::MODEL_NOT_LOADED.to_string(),
        });
    };

    let message = request.message.unwrap_or_default();
    if message.trim().is_empty() {
        return Json(ChatResponse {
            response: format::EMPTY_MESSAGE.to_string(),
        });
    }

    let response = engine.get_bot_response(&message).await;
    Json(ChatResponse { response })
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model_loaded: bool,
    pub version: &'static str,
}

/// `GET /health` — liveness check.
async fn health(State(ctx): State<ApiContext>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model_loaded: ctx.engine().is_some(),
        version: config::APP_VERSION,
    })
}
