//! Checks applied to destination URLs before they are stored.
//!
//! A stored URL is later sent verbatim as a `Location` header, so it has to be
//! a valid header value as well as a valid URL. `url::Url::parse` silently
//! drops tabs and newlines, which is why control characters are rejected
//! before parsing.

use serde_json::json;
use url::Url;

use crate::error::AppError;

/// Validates a destination URL and returns the form to store.
///
/// # Rules
///
/// 1. **Control characters**: rejected anywhere in the input
/// 2. **Syntax**: must parse as an absolute URL
/// 3. **Protocol**: only HTTP and HTTPS, with a host
///
/// Surrounding spaces are trimmed; everything else is kept as sent.
///
/// # Errors
///
/// Returns [`AppError::BadRequest`] if any rule is violated.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(sanitize_url(" https://example.com/a ")?, "https://example.com/a");
/// assert!(sanitize_url("https://example.com/a\nb").is_err());
/// assert!(sanitize_url("javascript:alert(1)").is_err());
/// ```
pub fn sanitize_url(input: &str) -> Result<String, AppError> {
    if input.chars().any(char::is_control) {
        return Err(AppError::bad_request(
            "URL must not contain control characters",
            json!({ "field": "originalUrl" }),
        ));
    }

    let trimmed = input.trim();

    let parsed = Url::parse(trimmed).map_err(|e| {
        AppError::bad_request(
            "Invalid URL format",
            json!({ "field": "originalUrl", "reason": e.to_string() }),
        )
    })?;

    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(AppError::bad_request(
            "Only HTTP and HTTPS URLs are allowed",
            json!({ "field": "originalUrl", "scheme": parsed.scheme() }),
        ));
    }

    Ok(trimmed.to_string())
}
