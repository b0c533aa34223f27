//! Shorten record entity: the mapping from a short code to its original URL.

use chrono::{DateTime, Utc};

/// A stored short code with its target URL and metadata.
///
/// `short_code` is the natural key and never changes once the record exists.
/// `id` is assigned by the store and only used for surrogate lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenRecord {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub click_count: i64,
    pub expires_at: Option<DateTime<Utc>>,
}

impl ShortenRecord {
    /// Returns true if the record has an expiry strictly before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at < now)
    }
}

/// Input data for inserting a new record.
///
/// The store assigns `id` and starts `click_count` at zero.
#[derive(Debug, Clone)]
pub struct NewShortenRecord {
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl NewShortenRecord {
    /// Materializes the stored record once the store has assigned an id.
    pub fn into_record(self, id: i64) -> ShortenRecord {
        ShortenRecord {
            id,
            original_url: self.original_url,
            short_code: self.short_code,
            created_at: self.created_at,
            updated_at: self.updated_at,
            click_count: 0,
            expires_at: self.expires_at,
        }
    }
}
