#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use portus::application::services::ShortenService;
use portus::config::{Config, ConfigHandle, StorageBackend};
use portus::domain::click_event::ClickEvent;
use portus::domain::entities::{NewShortenRecord, ShortenRecord};
use portus::domain::repositories::ShortenRepository;
use portus::infrastructure::memory::MemoryShortenRepository;
use portus::state::AppState;
use std::sync::Arc;
use tokio::sync::mpsc;

pub const TEST_BASE_URL: &str = "https://s.test";

pub fn test_config() -> Config {
    Config {
        storage_backend: StorageBackend::Memory,
        base_url: TEST_BASE_URL.to_string(),
        ..Config::default()
    }
}

/// Builds state over a fresh in-memory store.
///
/// The click receiver is returned unconsumed; tests that need counters to move
/// hand it to `run_click_worker` themselves.
pub fn create_test_state() -> (
    AppState,
    mpsc::Receiver<ClickEvent>,
    Arc<MemoryShortenRepository>,
) {
    let (tx, rx) = mpsc::channel(100);
    let repository = Arc::new(MemoryShortenRepository::new());

    let config = ConfigHandle::new(test_config());
    let shorten_service = Arc::new(ShortenService::new(repository.clone(), config.clone(), tx));

    (AppState::new(shorten_service, config), rx, repository)
}

pub async fn create_test_record(
    repository: &MemoryShortenRepository,
    code: &str,
    url: &str,
    expires_at: Option<DateTime<Utc>>,
) -> ShortenRecord {
    let now = Utc::now();
    repository
        .create(NewShortenRecord {
            short_code: code.to_string(),
            original_url: url.to_string(),
            created_at: now,
            updated_at: now,
            expires_at,
        })
        .await
        .unwrap()
}

pub async fn create_expired_record(
    repository: &MemoryShortenRepository,
    code: &str,
    url: &str,
) -> ShortenRecord {
    create_test_record(repository, code, url, Some(Utc::now() - Duration::hours(1))).await
}
