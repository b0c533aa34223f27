//! PostgreSQL implementation of the shorten repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortenRecord, ShortenRecord};
use crate::domain::repositories::ShortenRepository;
use crate::error::AppError;

/// Row shape of the `shortens` table.
#[derive(Debug, sqlx::FromRow)]
struct ShortenRow {
    id: i64,
    original_url: String,
    short_code: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    click_count: i64,
    expires_at: Option<DateTime<Utc>>,
}

impl From<ShortenRow> for ShortenRecord {
    fn from(row: ShortenRow) -> Self {
        Self {
            id: row.id,
            original_url: row.original_url,
            short_code: row.short_code,
            created_at: row.created_at,
            updated_at: row.updated_at,
            click_count: row.click_count,
            expires_at: row.expires_at,
        }
    }
}

/// PostgreSQL repository for shorten records.
///
/// Code uniqueness is enforced by the `shortens_short_code_key` constraint;
/// a violation surfaces as [`AppError::Conflict`].
pub struct PgShortenRepository {
    pool: Arc<PgPool>,
}

impl PgShortenRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShortenRepository for PgShortenRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortenRecord>, AppError> {
        let row = sqlx::query_as::<_, ShortenRow>(
            r#"
            SELECT id, original_url, short_code, created_at, updated_at, click_count, expires_at
            FROM shortens
            WHERE short_code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ShortenRecord::from))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ShortenRecord>, AppError> {
        let row = sqlx::query_as::<_, ShortenRow>(
            r#"
            SELECT id, original_url, short_code, created_at, updated_at, click_count, expires_at
            FROM shortens
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ShortenRecord::from))
    }

    async fn create(&self, new_record: NewShortenRecord) -> Result<ShortenRecord, AppError> {
        let row = sqlx::query_as::<_, ShortenRow>(
            r#"
            INSERT INTO shortens (original_url, short_code, created_at, updated_at, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, original_url, short_code, created_at, updated_at, click_count, expires_at
            "#,
        )
        .bind(&new_record.original_url)
        .bind(&new_record.short_code)
        .bind(new_record.created_at)
        .bind(new_record.updated_at)
        .bind(new_record.expires_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn update(&self, record: ShortenRecord) -> Result<Option<ShortenRecord>, AppError> {
        let row = sqlx::query_as::<_, ShortenRow>(
            r#"
            UPDATE shortens
            SET original_url = $2, updated_at = $3, expires_at = $4
            WHERE short_code = $1
            RETURNING id, original_url, short_code, created_at, updated_at, click_count, expires_at
            "#,
        )
        .bind(&record.short_code)
        .bind(&record.original_url)
        .bind(record.updated_at)
        .bind(record.expires_at)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ShortenRecord::from))
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM shortens WHERE short_code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn increment_click_count(&self, code: &str) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE shortens SET click_count = click_count + 1 WHERE short_code = $1")
                .bind(code)
                .execute(self.pool.as_ref())
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
