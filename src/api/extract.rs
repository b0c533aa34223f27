//! Request extractors that report failures as [`AppError`].

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use serde_json::json;
use validator::Validate;

use crate::error::AppError;

/// JSON body extractor that runs `validator` rules after deserializing.
///
/// Malformed JSON, a wrong content type, missing fields and failed validation
/// all become `400 BAD_REQUEST` with the usual error body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| {
                AppError::bad_request(
                    "Invalid request body",
                    json!({ "error": rejection.body_text() }),
                )
            })?;

        value.validate()?;
        Ok(Self(value))
    }
}
