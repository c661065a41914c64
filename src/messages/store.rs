//! Implements the message log for SQLite.

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};

use crate::error::{ChatError, ChatResult};
use crate::identity::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            other => Err(anyhow!("unknown message role '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: i64,
    pub owner: UserId,
    pub content: String,
    pub role: Role,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

#[async_trait]
pub trait MessageLog: Send + Sync {
    async fn append(&self, owner: &UserId, role: Role, content: &str) -> ChatResult<ChatMessage>;

    /// The owner's messages, oldest first.
    async fn list(&self, owner: &UserId) -> ChatResult<Vec<ChatMessage>>;
}

pub struct SqliteMessageLog {
    pub pool: SqlitePool,
}

impl SqliteMessageLog {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageLog for SqliteMessageLog {
    async fn append(&self, owner: &UserId, role: Role, content: &str) -> ChatResult<ChatMessage> {
        let timestamp = Utc::now().timestamp_millis();

        let row = sqlx::query(
            r#"
            INSERT INTO messages (owner, content, role, timestamp)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(owner.as_str())
        .bind(content)
        .bind(role.as_str())
        .bind(timestamp)
        .fetch_one(&self.pool)
        .await?;

        Ok(ChatMessage {
            id: row.try_get("id")?,
            owner: owner.clone(),
            content: content.to_string(),
            role,
            timestamp,
        })
    }

    async fn list(&self, owner: &UserId) -> ChatResult<Vec<ChatMessage>> {
        let rows = sqlx::query(
            r#"
            SELECT id, content, role, timestamp
            FROM messages
            WHERE owner = ?
            ORDER BY id ASC
            "#,
        )
        .bind(owner.as_str())
        .fetch_all(&self.pool)
        .await?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in rows {
            let role: String = row.try_get("role")?;
            let role = role
                .parse::<Role>()
                .map_err(|e| ChatError::Database(sqlx::Error::Decode(e.into())))?;

            messages.push(ChatMessage {
                id: row.try_get("id")?,
                owner: owner.clone(),
                content: row.try_get("content")?,
                role,
                timestamp: row.try_get("timestamp")?,
            });
        }

        Ok(messages)
    }
}
