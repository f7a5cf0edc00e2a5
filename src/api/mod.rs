//! HTTP surface for the chat bot.
//!
//! Exposes the engine as two endpoints: `POST /get_response` for one
//! question/one answer exchanges, and `GET /health` for liveness checks.
//! The router is composable — `chat_router()` returns a `Router` that can
//! be mounted on any axum server instance.

pub mod routes;
pub mod server;

use std::sync::Arc;

use crate::engine::BotEngine;

pub use routes::chat_router;

/// Shared state handed to every handler.
///
/// The engine is optional: when the intent artifacts could not be loaded the
/// API still answers, with a fixed error string, instead of refusing
/// connections.
#[derive(Clone)]
pub struct ApiContext {
    engine: Option<Arc<BotEngine>>,
}

impl ApiContext {
    pub fn new(engine: Arc<BotEngine>) -> Self {
        Self {
            engine: Some(engine),
        }
    }

    /// Context without a loaded engine (startup failed past the bind).
    pub fn unloaded() -> Self {
        Self { engine: None }
    }

    pub fn engine(&self) -> Option<&Arc<BotEngine>> {
        self.engine.as_ref()
    }
}
