// src/db/migration.rs
//! Creates the patter schema. Safe to call at every startup (idempotent).

use sqlx::{Executor, SqlitePool};
use tracing::info;

use crate::error::{ChatError, ChatResult};

const CREATE_TRAINING_ENTRIES: &str = r#"
CREATE TABLE IF NOT EXISTS training_entries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    pattern TEXT NOT NULL,
    response TEXT NOT NULL,
    owner TEXT,
    uses INTEGER NOT NULL DEFAULT 0 CHECK (uses >= 0),
    rating REAL NOT NULL DEFAULT 0,
    source TEXT NOT NULL CHECK (source IN ('user', 'web')),
    origin_url TEXT,
    created_at INTEGER NOT NULL
);
"#;

const CREATE_MESSAGES: &str = r#"
CREATE TABLE IF NOT EXISTS messages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    owner TEXT NOT NULL,
    content TEXT NOT NULL,
    role TEXT NOT NULL CHECK (role IN ('user', 'assistant')),
    timestamp INTEGER NOT NULL
);
"#;

const CREATE_INDICES: &str = r#"
CREATE INDEX IF NOT EXISTS idx_training_entries_pattern ON training_entries(pattern);
CREATE INDEX IF NOT EXISTS idx_training_entries_rating ON training_entries(rating);
CREATE INDEX IF NOT EXISTS idx_messages_owner ON messages(owner);
"#;

pub async fn run_migrations(pool: &SqlitePool) -> ChatResult<()> {
    for (name, ddl) in [
        ("training_entries", CREATE_TRAINING_ENTRIES),
        ("messages", CREATE_MESSAGES),
        ("indices", CREATE_INDICES),
    ] {
        pool.execute(ddl)
            .await
            .map_err(|e| ChatError::Migration(format!("{name}: {e}")))?;
    }

    info!("Database schema ready");
    Ok(())
}
