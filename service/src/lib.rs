//! # Stackhook Service
//!
//! The HTTP surface of the stackhook toolkit. The orchestrator's two entry
//! points become two routes on one axum service:
//!
//! - `POST /hook`: one lifecycle event in, outcome signaled to the event's
//!   callback address, `202 Accepted` back to the invoker
//! - `POST /transform`: one transform request in, rewritten (or failed)
//!   envelope back as `200 OK`
//! - `GET /health`: liveness probe
//!
//! The service owns the process-wide wiring: the operation registry is built
//! once at startup, the rewrite configuration is read once from the
//! environment, and both are shared read-only behind [`AppState`].

pub mod config;
pub mod error;
pub mod handlers;
pub mod state;

pub use config::ServiceConfig;
pub use error::AppError;
pub use state::AppState;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

/// Build the service router over shared state
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/hook", post(handlers::handle_hook))
        .route("/transform", post(handlers::handle_transform))
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
