//! Handlers for creating, updating and deleting short links.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::api::extract::ValidatedJson;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "originalUrl": "https://example.com/a",
///   "customCode": "promo",   // optional
///   "expiresAfter": 7        // optional, days
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "shortCode": "promo",
///   "originalUrl": "https://example.com/a",
///   "shortUrl": "https://s.example.com/promo",
///   "expiresAt": "2026-01-08T12:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body or custom code is invalid.
/// Returns 409 Conflict if the custom code is already in use.
pub async fn create_shorten_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let record = state
        .shorten_service
        .create(
            payload.original_url,
            payload.custom_code,
            payload.expires_after,
        )
        .await?;

    let short_url = state.shorten_service.short_url(&record.short_code);

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse::new(record, short_url)),
    ))
}

/// Replaces the destination (and optionally the expiry) of a short link.
///
/// # Endpoint
///
/// `PUT /shorten/{code}`
///
/// The short code never changes; `customCode` in the body is ignored.
/// `expiresAfter` only takes effect when positive.
///
/// # Errors
///
/// Returns 400 Bad Request if the body is invalid or the code is blank.
/// Returns 404 Not Found if the code does not exist.
pub async fn update_shorten_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    let code = require_code(&code)?;

    let record = state
        .shorten_service
        .update(code, payload.original_url, payload.expires_after)
        .await?;

    let short_url = state.shorten_service.short_url(&record.short_code);

    Ok(Json(ShortenResponse::new(record, short_url)))
}

/// Permanently deletes a short link.
///
/// # Endpoint
///
/// `DELETE /shorten/{code}`
///
/// # Errors
///
/// Returns 400 Bad Request if the code is blank.
/// Returns 404 Not Found if the code does not exist.
pub async fn delete_shorten_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    let code = require_code(&code)?;

    state.shorten_service.delete(code).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Rejects `PUT /shorten` and `DELETE /shorten` without a code segment.
pub async fn missing_code_handler() -> AppError {
    AppError::bad_request("Short code is required", json!({}))
}

/// Blank codes are rejected; any other code is used exactly as sent, the same
/// way the redirect route looks it up.
fn require_code(code: &str) -> Result<&str, AppError> {
    if code.trim().is_empty() {
        return Err(AppError::bad_request("Short code is required", json!({})));
    }
    Ok(code)
}
