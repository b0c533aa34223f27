//! In-process implementation of the shorten repository.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::json;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{NewShortenRecord, ShortenRecord};
use crate::domain::repositories::ShortenRepository;
use crate::error::AppError;

/// Record store backed by a concurrent hash map keyed by short code.
///
/// Insertion goes through the map's entry API, so two concurrent creates of the
/// same code can never both succeed. Records live only as long as the process.
pub struct MemoryShortenRepository {
    records: DashMap<String, ShortenRecord>,
    next_id: AtomicI64,
}

impl MemoryShortenRepository {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryShortenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ShortenRepository for MemoryShortenRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortenRecord>, AppError> {
        Ok(self.records.get(code).map(|entry| entry.value().clone()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ShortenRecord>, AppError> {
        Ok(self
            .records
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.value().clone()))
    }

    async fn create(&self, new_record: NewShortenRecord) -> Result<ShortenRecord, AppError> {
        match self.records.entry(new_record.short_code.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(
                "Short code already in use",
                json!({ "code": new_record.short_code }),
            )),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                let record = new_record.into_record(id);
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }

    async fn update(&self, record: ShortenRecord) -> Result<Option<ShortenRecord>, AppError> {
        let Some(mut stored) = self.records.get_mut(&record.short_code) else {
            return Ok(None);
        };

        stored.original_url = record.original_url;
        stored.updated_at = record.updated_at;
        stored.expires_at = record.expires_at;

        Ok(Some(stored.value().clone()))
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.records.remove(code).is_some())
    }

    async fn increment_click_count(&self, code: &str) -> Result<bool, AppError> {
        match self.records.get_mut(code) {
            Some(mut stored) => {
                stored.click_count += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
