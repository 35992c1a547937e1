//! HTTP handlers for the hook and transform entry points

use crate::error::AppError;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{Value, json};
use stackhook_core::LifecycleEvent;
use stackhook_transform::{TransformRequest, TransformResponse, transform};
use tracing::info;

/// Handle one lifecycle event
///
/// The outcome goes to the event's `ResponseURL`; the HTTP reply only tells
/// the invoker what was signaled. A malformed event is a `400`; a failed
/// signal delivery is a `502` and the orchestrator's own timeout governs
/// recovery.
///
/// # Errors
///
/// Returns [`AppError`] for malformed events and failed signal deliveries.
pub async fn handle_hook(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let event: LifecycleEvent = serde_json::from_value(body)
        .map_err(|e| AppError::bad_request(format!("invalid lifecycle event: {e}")))?;

    info!(
        stage = %event.stage,
        resource = %event.logical_resource_id,
        request_id = %event.request_id,
        "handling lifecycle event"
    );

    let status = state
        .dispatcher
        .dispatch(&event)
        .await
        .map_err(|e| AppError::bad_gateway(e.to_string()))?;

    Ok((
        StatusCode::ACCEPTED,
        Json(json!({
            "RequestId": event.request_id,
            "Status": status,
        })),
    ))
}

/// Handle one transform request
///
/// Always replies `200 OK`: transform failures are reported inside the
/// envelope, with the original fragment returned unchanged.
pub async fn handle_transform(
    State(state): State<AppState>,
    Json(request): Json<TransformRequest>,
) -> Json<TransformResponse> {
    Json(transform(&state.rewrite, request))
}

/// Liveness probe
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
