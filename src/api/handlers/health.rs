//! `GET /health`: storage round trip plus click queue state.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::api::dto::health::{ComponentHealth, HealthChecks, HealthResponse, ServiceStatus};
use crate::state::AppState;

/// Probes every component and reports the aggregate.
///
/// Answers `200 OK` when everything is up and `503 Service Unavailable`
/// otherwise; the body has the same shape in both cases:
///
/// ```json
/// {
///   "status": "degraded",
///   "version": "0.1.0",
///   "checks": {
///     "storage": { "status": "ok", "message": "Reachable" },
///     "click_queue": { "status": "error", "message": "Click queue is closed" }
///   }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let checks = HealthChecks {
        storage: probe_storage(&state).await,
        click_queue: probe_click_queue(&state),
    };

    let status = checks.status();
    let code = match status {
        ServiceStatus::Healthy => StatusCode::OK,
        ServiceStatus::Degraded => StatusCode::SERVICE_UNAVAILABLE,
    };

    let body = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        checks,
    };

    (code, Json(body))
}

async fn probe_storage(state: &AppState) -> ComponentHealth {
    match state.shorten_service.check_storage().await {
        Ok(()) => ComponentHealth::ok("Reachable"),
        Err(e) => {
            tracing::warn!(error = %e, "Storage health check failed");
            ComponentHealth::error("Storage unreachable")
        }
    }
}

fn probe_click_queue(state: &AppState) -> ComponentHealth {
    match state.shorten_service.click_queue_capacity() {
        Some(free) => ComponentHealth::ok(format!("Capacity: {free}")),
        None => ComponentHealth::error("Click queue is closed"),
    }
}
