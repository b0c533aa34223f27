//! Short link creation, mutation and resolution.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, info, warn};

use crate::config::ConfigHandle;
use crate::domain::click_event::ClickEvent;
use crate::domain::entities::{NewShortenRecord, ShortenRecord};
use crate::domain::repositories::ShortenRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, validate_custom_code};
use crate::utils::url_sanitizer::sanitize_url;

/// Attempts at allocating a free random code before giving up.
const MAX_GENERATION_ATTEMPTS: usize = 10;

/// Service owning every write to shorten records and the redirect lookup.
///
/// Code uniqueness is checked here first and enforced again by the store at
/// insert time; a store-level duplicate is reported as [`AppError::Conflict`]
/// for custom codes and retried with a fresh code for generated ones.
pub struct ShortenService {
    repository: Arc<dyn ShortenRepository>,
    config: ConfigHandle,
    click_sender: mpsc::Sender<ClickEvent>,
}

impl ShortenService {
    /// Creates a new shorten service.
    ///
    /// Click events for resolved codes are pushed to `click_sender`; the
    /// receiving end is expected to run [`crate::domain::click_worker::run_click_worker`].
    pub fn new(
        repository: Arc<dyn ShortenRepository>,
        config: ConfigHandle,
        click_sender: mpsc::Sender<ClickEvent>,
    ) -> Self {
        Self {
            repository,
            config,
            click_sender,
        }
    }

    /// Creates a new short link.
    ///
    /// # Arguments
    ///
    /// - `original_url` - The URL to redirect to
    /// - `custom_code` - Optional caller-chosen code; empty is treated as absent
    /// - `expires_after_days` - Only strictly positive values set an expiry
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] if the URL, custom code or expiry is invalid.
    /// Returns [`AppError::Conflict`] if the custom code is already in use.
    /// Returns [`AppError::Internal`] on store or randomness failures.
    pub async fn create(
        &self,
        original_url: String,
        custom_code: Option<String>,
        expires_after_days: Option<i64>,
    ) -> Result<ShortenRecord, AppError> {
        let original_url = sanitize_url(&original_url)?;
        let now = Utc::now();
        let expires_at = expiry_from(now, expires_after_days)?;

        let record = match custom_code.filter(|code| !code.is_empty()) {
            Some(code) => {
                self.create_with_custom_code(code, original_url, now, expires_at)
                    .await?
            }
            None => {
                self.create_with_generated_code(original_url, now, expires_at)
                    .await?
            }
        };

        info!(code = %record.short_code, id = record.id, "Short link created");
        Ok(record)
    }

    async fn create_with_custom_code(
        &self,
        code: String,
        original_url: String,
        now: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<ShortenRecord, AppError> {
        validate_custom_code(&code)?;

        if self.short_code_exists(&code).await {
            return Err(custom_code_in_use(&code));
        }

        let new_record = NewShortenRecord {
            short_code: code.clone(),
            original_url,
            created_at: now,
            updated_at: now,
            expires_at,
        };

        self.repository
            .create(new_record)
            .await
            .map_err(|e| match e {
                AppError::Conflict { .. } => custom_code_in_use(&code),
                other => other,
            })
    }

    async fn create_with_generated_code(
        &self,
        original_url: String,
        now: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<ShortenRecord, AppError> {
        let length = self.config.load().short_code_length;

        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let code = generate_code(length)?;

            if self.short_code_exists(&code).await {
                debug!(%code, attempt, "Generated code already taken");
                continue;
            }

            let new_record = NewShortenRecord {
                short_code: code.clone(),
                original_url: original_url.clone(),
                created_at: now,
                updated_at: now,
                expires_at,
            };

            match self.repository.create(new_record).await {
                Ok(record) => return Ok(record),
                Err(AppError::Conflict { .. }) => {
                    warn!(%code, attempt, "Generated code claimed concurrently, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions", "length": length }),
        ))
    }

    /// Replaces the destination of an existing short link.
    ///
    /// The short code, id, creation time and click count are preserved. A
    /// positive `expires_after_days` recomputes the expiry from now; any other
    /// value leaves the current expiry untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] if the URL or expiry is invalid.
    /// Returns [`AppError::NotFound`] if no record has this code.
    pub async fn update(
        &self,
        code: &str,
        original_url: String,
        expires_after_days: Option<i64>,
    ) -> Result<ShortenRecord, AppError> {
        let original_url = sanitize_url(&original_url)?;
        let mut record = self
            .repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| short_url_not_found(code))?;

        let now = Utc::now();
        record.original_url = original_url;
        record.updated_at = now;
        if let Some(expires_at) = expiry_from(now, expires_after_days)? {
            record.expires_at = Some(expires_at);
        }

        let updated = self
            .repository
            .update(record)
            .await?
            .ok_or_else(|| short_url_not_found(code))?;

        info!(%code, "Short link updated");
        Ok(updated)
    }

    /// Permanently deletes a short link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this code.
    pub async fn delete(&self, code: &str) -> Result<(), AppError> {
        if self.repository.find_by_code(code).await?.is_none() {
            return Err(short_url_not_found(code));
        }

        if !self.repository.delete(code).await? {
            return Err(short_url_not_found(code));
        }

        info!(%code, "Short link deleted");
        Ok(())
    }

    /// Resolves a short code to its original URL and schedules a click count.
    ///
    /// The click increment is queued without waiting; a full or closed queue
    /// drops the click and the redirect still succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this code.
    /// Returns [`AppError::Expired`] if the record has expired.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        let record = self
            .repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| short_url_not_found(code))?;

        if record.is_expired_at(Utc::now()) {
            debug!(%code, expires_at = ?record.expires_at, "Resolved code has expired");
            return Err(AppError::expired(
                "Short URL has expired",
                json!({ "code": code }),
            ));
        }

        self.dispatch_click(&record.short_code);

        Ok(record.original_url)
    }

    fn dispatch_click(&self, code: &str) {
        match self.click_sender.try_send(ClickEvent::new(code)) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                warn!(code = %event.code, "Click queue full, dropping click");
            }
            Err(TrySendError::Closed(event)) => {
                warn!(code = %event.code, "Click queue closed, dropping click");
            }
        }
    }

    /// Looks up a record by surrogate id.
    ///
    /// Store errors are logged and reported as absent, so an unavailable store
    /// is indistinguishable from a missing record here.
    pub async fn get_by_id(&self, id: i64) -> Option<ShortenRecord> {
        match self.repository.find_by_id(id).await {
            Ok(record) => record,
            Err(e) => {
                warn!(id, error = %e, "Lookup by id failed, treating as not found");
                None
            }
        }
    }

    /// Returns whether a record with this code exists.
    ///
    /// Store errors are logged and reported as `false`. Callers that insert
    /// afterwards still rely on the store rejecting duplicates.
    pub async fn short_code_exists(&self, code: &str) -> bool {
        match self.repository.find_by_code(code).await {
            Ok(record) => record.is_some(),
            Err(e) => {
                warn!(%code, error = %e, "Code lookup failed, treating as free");
                false
            }
        }
    }

    /// Builds the public short URL for a code from the current base URL.
    pub fn short_url(&self, code: &str) -> String {
        let config = self.config.load();
        format!("{}/{}", config.base_url.trim_end_matches('/'), code)
    }

    /// Verifies the underlying store is reachable.
    pub async fn check_storage(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }

    /// Remaining click queue capacity, or `None` once the worker has gone away.
    pub fn click_queue_capacity(&self) -> Option<usize> {
        if self.click_sender.is_closed() {
            None
        } else {
            Some(self.click_sender.capacity())
        }
    }
}

/// Computes `now + days` for strictly positive `days`; anything else means no expiry.
fn expiry_from(
    now: DateTime<Utc>,
    expires_after_days: Option<i64>,
) -> Result<Option<DateTime<Utc>>, AppError> {
    match expires_after_days {
        Some(days) if days > 0 => Duration::try_days(days)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .map(Some)
            .ok_or_else(|| {
                AppError::bad_request(
                    "expiresAfter is out of range",
                    json!({ "expiresAfter": days }),
                )
            }),
        _ => Ok(None),
    }
}

fn short_url_not_found(code: &str) -> AppError {
    AppError::not_found("Short URL not found", json!({ "code": code }))
}

fn custom_code_in_use(code: &str) -> AppError {
    AppError::conflict("Custom code already in use", json!({ "code": code }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::domain::repositories::MockShortenRepository;
    use crate::utils::code_generator::is_url_safe;

    fn test_config() -> ConfigHandle {
        ConfigHandle::new(Config {
            base_url: "https://s.example.com".to_string(),
            ..Config::default()
        })
    }

    fn service_with(repo: MockShortenRepository) -> (ShortenService, mpsc::Receiver<ClickEvent>) {
        let (tx, rx) = mpsc::channel(8);
        (ShortenService::new(Arc::new(repo), test_config(), tx), rx)
    }

    fn stored_record(code: &str, url: &str) -> ShortenRecord {
        let created = Utc::now() - Duration::hours(1);
        ShortenRecord {
            id: 42,
            original_url: url.to_string(),
            short_code: code.to_string(),
            created_at: created,
            updated_at: created,
            click_count: 3,
            expires_at: None,
        }
    }

    fn db_error() -> AppError {
        AppError::internal("Database error", json!({ "reason": "connection refused" }))
    }

    #[tokio::test]
    async fn test_create_generates_code() {
        let mut repo = MockShortenRepository::new();
        repo.expect_find_by_code().times(1).returning(|_| Ok(None));
        repo.expect_create()
            .withf(|new| new.short_code.len() == 6 && is_url_safe(&new.short_code))
            .times(1)
            .returning(|new| Ok(new.into_record(1)));

        let (service, _rx) = service_with(repo);
        let record = service
            .create("https://example.com/a".to_string(), None, Some(0))
            .await
            .unwrap();

        assert_eq!(record.short_code.len(), 6);
        assert_eq!(record.original_url, "https://example.com/a");
        assert_eq!(record.click_count, 0);
        assert_eq!(record.created_at, record.updated_at);
        assert!(record.expires_at.is_none());
    }

    #[tokio::test]
    async fn test_create_sets_expiry_for_positive_days() {
        let mut repo = MockShortenRepository::new();
        repo.expect_find_by_code().returning(|_| Ok(None));
        repo.expect_create()
            .times(1)
            .returning(|new| Ok(new.into_record(1)));

        let (service, _rx) = service_with(repo);
        let record = service
            .create("https://example.com".to_string(), None, Some(7))
            .await
            .unwrap();

        let expires_at = record.expires_at.unwrap();
        assert_eq!(expires_at - record.created_at, Duration::days(7));
    }

    #[tokio::test]
    async fn test_create_ignores_non_positive_expiry() {
        let mut repo = MockShortenRepository::new();
        repo.expect_find_by_code().returning(|_| Ok(None));
        repo.expect_create()
            .withf(|new| new.expires_at.is_none())
            .times(2)
            .returning(|new| Ok(new.into_record(1)));

        let (service, _rx) = service_with(repo);
        for days in [0, -1] {
            let record = service
                .create("https://example.com".to_string(), None, Some(days))
                .await
                .unwrap();
            assert!(record.expires_at.is_none());
        }
    }

    #[tokio::test]
    async fn test_create_rejects_out_of_range_expiry() {
        let repo = MockShortenRepository::new();

        let (service, _rx) = service_with(repo);
        let result = service
            .create("https://example.com".to_string(), None, Some(i64::MAX))
            .await;

        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[tokio::test]
    async fn test_create_retries_taken_generated_code() {
        let mut repo = MockShortenRepository::new();
        let mut lookups = 0;
        repo.expect_find_by_code().times(2).returning(move |code| {
            lookups += 1;
            if lookups == 1 {
                Ok(Some(stored_record(code, "https://other.com")))
            } else {
                Ok(None)
            }
        });
        repo.expect_create()
            .times(1)
            .returning(|new| Ok(new.into_record(2)));

        let (service, _rx) = service_with(repo);
        let result = service
            .create("https://example.com".to_string(), None, None)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_retries_on_store_conflict() {
        let mut repo = MockShortenRepository::new();
        repo.expect_find_by_code().returning(|_| Ok(None));
        let mut inserts = 0;
        repo.expect_create().times(2).returning(move |new| {
            inserts += 1;
            if inserts == 1 {
                Err(AppError::conflict("Short code already in use", json!({})))
            } else {
                Ok(new.into_record(3))
            }
        });

        let (service, _rx) = service_with(repo);
        let record = service
            .create("https://example.com".to_string(), None, None)
            .await
            .unwrap();

        assert_eq!(record.id, 3);
    }

    #[tokio::test]
    async fn test_create_gives_up_after_max_attempts() {
        let mut repo = MockShortenRepository::new();
        repo.expect_find_by_code()
            .times(MAX_GENERATION_ATTEMPTS)
            .returning(|code| Ok(Some(stored_record(code, "https://other.com"))));
        repo.expect_create().times(0);

        let (service, _rx) = service_with(repo);
        let result = service
            .create("https://example.com".to_string(), None, None)
            .await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_create_with_custom_code() {
        let mut repo = MockShortenRepository::new();
        repo.expect_find_by_code()
            .withf(|code| code == "promo")
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_create()
            .withf(|new| new.short_code == "promo")
            .times(1)
            .returning(|new| Ok(new.into_record(5)));

        let (service, _rx) = service_with(repo);
        let record = service
            .create(
                "https://example.com".to_string(),
                Some("promo".to_string()),
                None,
            )
            .await
            .unwrap();

        assert_eq!(record.short_code, "promo");
    }

    #[tokio::test]
    async fn test_create_empty_custom_code_generates() {
        let mut repo = MockShortenRepository::new();
        repo.expect_find_by_code().returning(|_| Ok(None));
        repo.expect_create()
            .withf(|new| new.short_code.len() == 6)
            .times(1)
            .returning(|new| Ok(new.into_record(1)));

        let (service, _rx) = service_with(repo);
        let result = service
            .create("https://example.com".to_string(), Some(String::new()), None)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_custom_code_conflict() {
        let mut repo = MockShortenRepository::new();
        repo.expect_find_by_code()
            .withf(|code| code == "taken")
            .times(1)
            .returning(|code| Ok(Some(stored_record(code, "https://other.com"))));
        repo.expect_create().times(0);

        let (service, _rx) = service_with(repo);
        let result = service
            .create(
                "https://example.com".to_string(),
                Some("taken".to_string()),
                None,
            )
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));
        assert_eq!(err.to_string(), "Custom code already in use");
    }

    #[tokio::test]
    async fn test_create_custom_code_store_conflict() {
        let mut repo = MockShortenRepository::new();
        repo.expect_find_by_code().returning(|_| Ok(None));
        repo.expect_create()
            .times(1)
            .returning(|_| Err(AppError::conflict("Short code already in use", json!({}))));

        let (service, _rx) = service_with(repo);
        let err = service
            .create(
                "https://example.com".to_string(),
                Some("racy".to_string()),
                None,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));
        assert_eq!(err.to_string(), "Custom code already in use");
    }

    #[tokio::test]
    async fn test_create_invalid_custom_code() {
        let repo = MockShortenRepository::new();

        let (service, _rx) = service_with(repo);
        let result = service
            .create(
                "https://example.com".to_string(),
                Some("no spaces".to_string()),
                None,
            )
            .await;

        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[tokio::test]
    async fn test_create_rejects_url_with_newline() {
        let mut repo = MockShortenRepository::new();
        repo.expect_find_by_code().times(0);
        repo.expect_create().times(0);

        let (service, _rx) = service_with(repo);
        let result = service
            .create(
                "https://example.com/a\nb".to_string(),
                Some("nl".to_string()),
                None,
            )
            .await;

        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[tokio::test]
    async fn test_create_stores_trimmed_url() {
        let mut repo = MockShortenRepository::new();
        repo.expect_find_by_code().returning(|_| Ok(None));
        repo.expect_create()
            .withf(|new| new.original_url == "https://example.com/a")
            .times(1)
            .returning(|new| Ok(new.into_record(1)));

        let (service, _rx) = service_with(repo);
        let record = service
            .create(" https://example.com/a ".to_string(), None, None)
            .await
            .unwrap();

        assert_eq!(record.original_url, "https://example.com/a");
    }

    #[tokio::test]
    async fn test_create_propagates_store_failure() {
        let mut repo = MockShortenRepository::new();
        repo.expect_find_by_code().returning(|_| Err(db_error()));
        repo.expect_create().times(1).returning(|_| Err(db_error()));

        let (service, _rx) = service_with(repo);
        let result = service
            .create("https://example.com".to_string(), None, None)
            .await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_update_preserves_identity() {
        let original = stored_record("keep", "https://old.com");
        let created_at = original.created_at;

        let mut repo = MockShortenRepository::new();
        let found = original.clone();
        repo.expect_find_by_code()
            .times(1)
            .returning(move |_| Ok(Some(found.clone())));
        repo.expect_update()
            .withf(|record| record.short_code == "keep" && record.original_url == "https://new.com")
            .times(1)
            .returning(|record| Ok(Some(record)));

        let (service, _rx) = service_with(repo);
        let updated = service
            .update("keep", "https://new.com".to_string(), None)
            .await
            .unwrap();

        assert_eq!(updated.short_code, "keep");
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, created_at);
        assert!(updated.updated_at > created_at);
        assert!(updated.expires_at.is_none());
    }

    #[tokio::test]
    async fn test_update_keeps_expiry_without_positive_days() {
        let mut original = stored_record("exp", "https://old.com");
        let expiry = Utc::now() + Duration::days(2);
        original.expires_at = Some(expiry);

        let mut repo = MockShortenRepository::new();
        repo.expect_find_by_code()
            .returning(move |_| Ok(Some(original.clone())));
        repo.expect_update().returning(|record| Ok(Some(record)));

        let (service, _rx) = service_with(repo);
        let updated = service
            .update("exp", "https://new.com".to_string(), Some(0))
            .await
            .unwrap();

        assert_eq!(updated.expires_at, Some(expiry));
    }

    #[tokio::test]
    async fn test_update_recomputes_expiry() {
        let mut repo = MockShortenRepository::new();
        repo.expect_find_by_code()
            .returning(|code| Ok(Some(stored_record(code, "https://old.com"))));
        repo.expect_update().returning(|record| Ok(Some(record)));

        let (service, _rx) = service_with(repo);
        let updated = service
            .update("exp", "https://new.com".to_string(), Some(3))
            .await
            .unwrap();

        assert_eq!(
            updated.expires_at.unwrap() - updated.updated_at,
            Duration::days(3)
        );
    }

    #[tokio::test]
    async fn test_update_not_found() {
        let mut repo = MockShortenRepository::new();
        repo.expect_find_by_code().returning(|_| Ok(None));
        repo.expect_update().times(0);

        let (service, _rx) = service_with(repo);
        let result = service
            .update("missing", "https://new.com".to_string(), None)
            .await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_rejects_url_with_control_characters() {
        let mut repo = MockShortenRepository::new();
        repo.expect_find_by_code().times(0);
        repo.expect_update().times(0);

        let (service, _rx) = service_with(repo);
        let result = service
            .update("keep", "https://new.com/\tx".to_string(), None)
            .await;

        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[tokio::test]
    async fn test_update_deleted_concurrently() {
        let mut repo = MockShortenRepository::new();
        repo.expect_find_by_code()
            .returning(|code| Ok(Some(stored_record(code, "https://old.com"))));
        repo.expect_update().returning(|_| Ok(None));

        let (service, _rx) = service_with(repo);
        let result = service
            .update("gone", "https://new.com".to_string(), None)
            .await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_success() {
        let mut repo = MockShortenRepository::new();
        repo.expect_find_by_code()
            .returning(|code| Ok(Some(stored_record(code, "https://a.com"))));
        repo.expect_delete()
            .withf(|code| code == "bye")
            .times(1)
            .returning(|_| Ok(true));

        let (service, _rx) = service_with(repo);
        assert!(service.delete("bye").await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_not_found() {
        let mut repo = MockShortenRepository::new();
        repo.expect_find_by_code().returning(|_| Ok(None));
        repo.expect_delete().times(0);

        let (service, _rx) = service_with(repo);
        let result = service.delete("missing").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_resolve_dispatches_click() {
        let mut repo = MockShortenRepository::new();
        repo.expect_find_by_code()
            .returning(|code| Ok(Some(stored_record(code, "https://target.com"))));
        repo.expect_increment_click_count().times(0);

        let (service, mut rx) = service_with(repo);
        let url = service.resolve("hit").await.unwrap();

        assert_eq!(url, "https://target.com");
        assert_eq!(rx.try_recv().unwrap(), ClickEvent::new("hit"));
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut repo = MockShortenRepository::new();
        repo.expect_find_by_code().returning(|_| Ok(None));

        let (service, mut rx) = service_with(repo);
        let result = service.resolve("nope").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_resolve_expired() {
        let mut repo = MockShortenRepository::new();
        repo.expect_find_by_code().returning(|code| {
            let mut record = stored_record(code, "https://target.com");
            record.expires_at = Some(Utc::now() - Duration::minutes(1));
            Ok(Some(record))
        });

        let (service, mut rx) = service_with(repo);
        let result = service.resolve("old").await;

        assert!(matches!(result, Err(AppError::Expired { .. })));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_resolve_succeeds_when_click_queue_full() {
        let mut repo = MockShortenRepository::new();
        repo.expect_find_by_code()
            .returning(|code| Ok(Some(stored_record(code, "https://target.com"))));

        let (tx, _rx) = mpsc::channel(1);
        let service = ShortenService::new(Arc::new(repo), test_config(), tx);

        assert!(service.resolve("a").await.is_ok());
        assert!(service.resolve("a").await.is_ok());
        assert_eq!(service.click_queue_capacity(), Some(0));
    }

    #[tokio::test]
    async fn test_resolve_succeeds_when_click_queue_closed() {
        let mut repo = MockShortenRepository::new();
        repo.expect_find_by_code()
            .returning(|code| Ok(Some(stored_record(code, "https://target.com"))));

        let (service, rx) = service_with(repo);
        drop(rx);

        assert!(service.resolve("a").await.is_ok());
        assert_eq!(service.click_queue_capacity(), None);
    }

    #[tokio::test]
    async fn test_get_by_id_swallows_errors() {
        let mut repo = MockShortenRepository::new();
        repo.expect_find_by_id().returning(|_| Err(db_error()));

        let (service, _rx) = service_with(repo);
        assert!(service.get_by_id(1).await.is_none());
    }

    #[tokio::test]
    async fn test_get_by_id_found() {
        let mut repo = MockShortenRepository::new();
        repo.expect_find_by_id()
            .withf(|id| *id == 42)
            .returning(|_| Ok(Some(stored_record("byid", "https://a.com"))));

        let (service, _rx) = service_with(repo);
        let record = service.get_by_id(42).await.unwrap();
        assert_eq!(record.short_code, "byid");
    }

    #[tokio::test]
    async fn test_short_code_exists_swallows_errors() {
        let mut repo = MockShortenRepository::new();
        repo.expect_find_by_code().returning(|_| Err(db_error()));

        let (service, _rx) = service_with(repo);
        assert!(!service.short_code_exists("any").await);
    }

    #[tokio::test]
    async fn test_short_url_follows_config_reload() {
        let repo = MockShortenRepository::new();
        let config = test_config();
        let (tx, _rx) = mpsc::channel(1);
        let service = ShortenService::new(Arc::new(repo), config.clone(), tx);

        assert_eq!(service.short_url("abc"), "https://s.example.com/abc");

        config.replace(Config {
            base_url: "https://go.example.org/".to_string(),
            ..Config::default()
        });
        assert_eq!(service.short_url("abc"), "https://go.example.org/abc");
    }
}
