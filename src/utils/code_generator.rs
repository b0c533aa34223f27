//! Short code generation and validation utilities.
//!
//! Generated codes use the URL-safe base64 alphabet (`A-Z`, `a-z`, `0-9`, `-`, `_`)
//! with bytes drawn from the operating system CSPRNG. Custom codes supplied by
//! clients are checked against the same alphabet.

use std::sync::LazyLock;

use crate::error::AppError;
use base64::Engine as _;
use regex::Regex;
use serde_json::json;

/// Default length of generated short codes.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Longest custom code accepted from clients.
pub const MAX_CUSTOM_CODE_LENGTH: usize = 64;

/// Path segments owned by other routes; a short code with one of these names
/// could never be resolved.
pub const RESERVED_CODES: &[&str] = &["shorten", "health"];

static CUSTOM_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// Generates a random URL-safe short code of exactly `length` characters.
///
/// Enough random bytes are drawn to cover every emitted character with a full
/// 6-bit group, so each character is uniformly distributed over the alphabet.
/// Uniqueness is not checked here.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if `length` is zero or the system random
/// source fails. A failing random source is never replaced by a weaker one.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(6)?;
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
/// ```
pub fn generate_code(length: usize) -> Result<String, AppError> {
    if length == 0 {
        return Err(AppError::internal(
            "Short code length must be positive",
            json!({ "length": length }),
        ));
    }

    let mut buffer = vec![0u8; (length * 3).div_ceil(4)];

    getrandom::fill(&mut buffer).map_err(|e| {
        AppError::internal(
            "Failed to generate random bytes",
            json!({ "reason": e.to_string() }),
        )
    })?;

    let mut code = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(&buffer);
    code.truncate(length);
    Ok(code)
}

/// Validates a client-supplied custom short code.
///
/// # Rules
///
/// - Length: 1-64 characters
/// - Allowed characters: ASCII letters, digits, `-` and `_`
/// - Cannot be a reserved route segment
///
/// # Errors
///
/// Returns [`AppError::BadRequest`] if any rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if code.is_empty() || code.len() > MAX_CUSTOM_CODE_LENGTH {
        return Err(AppError::bad_request(
            "Custom code must be 1-64 characters",
            json!({ "provided_length": code.len() }),
        ));
    }

    if !is_url_safe(code) {
        return Err(AppError::bad_request(
            "Custom code can only contain letters, digits, hyphens and underscores",
            json!({ "code": code }),
        ));
    }

    if RESERVED_CODES.contains(&code) {
        return Err(AppError::bad_request(
            "This code is reserved",
            json!({ "code": code }),
        ));
    }

    Ok(())
}

/// Returns true if `code` is non-empty and every character is in the URL-safe
/// short code alphabet.
pub fn is_url_safe(code: &str) -> bool {
    CUSTOM_CODE_REGEX.is_match(code)
}
