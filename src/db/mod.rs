// src/db/mod.rs
// SQLite pool setup shared by the server, the CLI and the tests

pub mod migration;

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use tracing::info;

use crate::error::ChatResult;

pub use migration::run_migrations;

/// Opens (creating if needed) the database at `url` and brings the schema up to date.
pub async fn connect(url: &str, max_connections: u32) -> ChatResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect_with(options)
        .await?;

    info!("Connected to {}", url);
    run_migrations(&pool).await?;
    Ok(pool)
}

/// Single-connection in-memory database. The connection never expires, otherwise the
/// data would vanish with it.
pub async fn connect_in_memory() -> ChatResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;
    Ok(pool)
}
