//! DTOs for the shorten endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::ShortenRecord;

/// Request body for `POST /shorten` and `PUT /shorten/{code}`.
///
/// ```json
/// {
///   "originalUrl": "https://example.com/some/long/path",
///   "customCode": "promo",
///   "expiresAfter": 7
/// }
/// ```
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    /// The URL to redirect to (must be a valid absolute URL).
    #[serde(alias = "originalURL")]
    #[validate(length(min = 1, message = "originalUrl must not be empty"))]
    #[validate(url(message = "Invalid URL format"))]
    pub original_url: String,

    /// Optional caller-chosen short code. Ignored on update.
    #[serde(default)]
    pub custom_code: Option<String>,

    /// Lifetime in days. Only positive values set an expiry.
    #[serde(default)]
    pub expires_after: Option<i64>,
}

/// Response body for create and update.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_code: String,
    pub original_url: String,
    pub short_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl ShortenResponse {
    pub fn new(record: ShortenRecord, short_url: String) -> Self {
        Self {
            short_code: record.short_code,
            original_url: record.original_url,
            short_url,
            expires_at: record.expires_at,
        }
    }
}
