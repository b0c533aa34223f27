//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{debug, error};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Click Tracking
///
/// The click counter is incremented in the background after the lookup; the
/// redirect is returned without waiting for it. If the click queue is full the
/// click is dropped.
///
/// # Errors
///
/// Returns 404 Not Found if the code does not exist or has expired. Both
/// cases produce the same response body.
///
/// Returns 500 Internal Server Error if the stored URL cannot be sent as a
/// `Location` header.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let original_url = state.shorten_service.resolve(&code).await?;

    let location = HeaderValue::try_from(original_url).map_err(|e| {
        error!(%code, error = %e, "Stored URL is not a valid Location header");
        AppError::internal("Stored URL is invalid", json!({ "code": code }))
    })?;

    debug!(%code, "Redirecting");

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
