// src/training/store.rs
//! Pattern store: durable holding of training entries.
//! All reads and writes of `training_entries` go through [`PatternStore`].

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::types::{EntryId, NewEntry, Source, TrainingEntry};
use crate::error::{ChatError, ChatResult};
use crate::identity::UserId;

#[async_trait]
pub trait PatternStore: Send + Sync {
    /// Inserts a normalized entry with `uses = 0, rating = 0`.
    /// Returns `None` (and writes nothing) when the entry normalizes to empty.
    async fn add(&self, entry: NewEntry) -> ChatResult<Option<EntryId>>;

    /// Every entry, oldest first.
    async fn all(&self) -> ChatResult<Vec<TrainingEntry>>;

    /// Every entry, newest first.
    async fn list_recent(&self) -> ChatResult<Vec<TrainingEntry>>;

    async fn get(&self, id: EntryId) -> ChatResult<TrainingEntry>;

    /// `uses := uses + 1` for exactly one entry.
    async fn increment_uses(&self, id: EntryId) -> ChatResult<()>;

    /// `rating := (rating + new_rating) / 2`.
    async fn apply_rating(&self, id: EntryId, new_rating: f64) -> ChatResult<()>;
}

pub struct SqlitePatternStore {
    pub pool: SqlitePool,
}

impl SqlitePatternStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_entry(row: &SqliteRow) -> ChatResult<TrainingEntry> {
        let source: String = row.try_get("source")?;
        let source = Source::parse(&source).ok_or_else(|| {
            ChatError::Database(sqlx::Error::Decode(
                format!("unknown training source '{source}'").into(),
            ))
        })?;
        let owner: Option<String> = row.try_get("owner")?;
        let uses: i64 = row.try_get("uses")?;

        Ok(TrainingEntry {
            id: row.try_get("id")?,
            pattern: row.try_get("pattern")?,
            response: row.try_get("response")?,
            owner: owner.and_then(UserId::new),
            uses: u64::try_from(uses).unwrap_or(0),
            rating: row.try_get("rating")?,
            source,
            origin_url: row.try_get("origin_url")?,
            created_at: row.try_get("created_at")?,
        })
    }

    async fn fetch_ordered(&self, newest_first: bool) -> ChatResult<Vec<TrainingEntry>> {
        let sql = if newest_first {
            "SELECT id, pattern, response, owner, uses, rating, source, origin_url, created_at
             FROM training_entries ORDER BY id DESC"
        } else {
            "SELECT id, pattern, response, owner, uses, rating, source, origin_url, created_at
             FROM training_entries ORDER BY id ASC"
        };

        let rows = sqlx::query(sql).fetch_all(&self.pool).await?;
        rows.iter().map(Self::row_to_entry).collect()
    }
}

#[async_trait]
impl PatternStore for SqlitePatternStore {
    async fn add(&self, entry: NewEntry) -> ChatResult<Option<EntryId>> {
        let Some(entry) = entry.normalized() else {
            debug!("rejected empty training entry");
            return Ok(None);
        };

        let row = sqlx::query(
            r#"
            INSERT INTO training_entries (pattern, response, owner, uses, rating, source, origin_url, created_at)
            VALUES (?, ?, ?, 0, 0, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&entry.pattern)
        .bind(&entry.response)
        .bind(entry.owner.as_ref().map(|o| o.as_str()))
        .bind(entry.source.as_str())
        .bind(&entry.origin_url)
        .bind(Utc::now().timestamp_millis())
        .fetch_one(&self.pool)
        .await?;

        let id: EntryId = row.try_get("id")?;
        debug!("stored {} training entry {} ('{}')", entry.source.as_str(), id, entry.pattern);
        Ok(Some(id))
    }

    async fn all(&self) -> ChatResult<Vec<TrainingEntry>> {
        self.fetch_ordered(false).await
    }

    async fn list_recent(&self) -> ChatResult<Vec<TrainingEntry>> {
        self.fetch_ordered(true).await
    }

    async fn get(&self, id: EntryId) -> ChatResult<TrainingEntry> {
        let row = sqlx::query(
            r#"
            SELECT id, pattern, response, owner, uses, rating, source, origin_url, created_at
            FROM training_entries
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(ChatError::NotFound(id))?;

        Self::row_to_entry(&row)
    }

    async fn increment_uses(&self, id: EntryId) -> ChatResult<()> {
        let result = sqlx::query("UPDATE training_entries SET uses = uses + 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ChatError::NotFound(id));
        }
        Ok(())
    }

    async fn apply_rating(&self, id: EntryId, new_rating: f64) -> ChatResult<()> {
        let result = sqlx::query("UPDATE training_entries SET rating = (rating + ?) / 2.0 WHERE id = ?")
            .bind(new_rating)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ChatError::NotFound(id));
        }
        Ok(())
    }
}
