//! Repository trait for shorten record storage.

use crate::domain::entities::{NewShortenRecord, ShortenRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage interface for short code records.
///
/// Absence is reported as `Ok(None)` / `Ok(false)`. Errors are reserved for
/// store failures and duplicate keys.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortenRepository`] - PostgreSQL
/// - [`crate::infrastructure::memory::MemoryShortenRepository`] - in-process map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortenRepository: Send + Sync {
    /// Finds a record by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortenRecord>, AppError>;

    /// Finds a record by its surrogate id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<ShortenRecord>, AppError>;

    /// Inserts a new record.
    ///
    /// Uniqueness of `short_code` is enforced atomically by the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code already exists.
    /// Returns [`AppError::Internal`] on store errors.
    async fn create(&self, new_record: NewShortenRecord) -> Result<ShortenRecord, AppError>;

    /// Writes the mutable fields of `record` (`original_url`, `updated_at`,
    /// `expires_at`) to the row with the same short code.
    ///
    /// `click_count` is left to [`Self::increment_click_count`] so that
    /// concurrent clicks are not overwritten.
    ///
    /// Returns `Ok(None)` if no record has that code anymore.
    async fn update(&self, record: ShortenRecord) -> Result<Option<ShortenRecord>, AppError>;

    /// Permanently removes a record.
    ///
    /// Returns `Ok(true)` if a record was removed, `Ok(false)` if none matched.
    async fn delete(&self, code: &str) -> Result<bool, AppError>;

    /// Adds one to the click counter of a record.
    ///
    /// Returns `Ok(false)` if the code no longer exists.
    async fn increment_click_count(&self, code: &str) -> Result<bool, AppError>;

    /// Verifies the store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
