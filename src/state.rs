// src/state.rs

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::{
    chat::ChatService,
    config::PatterConfig,
    learning::{HttpPageFetcher, PageFetcher, ScrapingService},
    messages::{MessageLog, SqliteMessageLog},
    training::{PatternStore, SqlitePatternStore},
};

#[derive(Clone)]
pub struct AppState {
    // -------- Storage --------
    pub pool: SqlitePool,
    pub patterns: Arc<dyn PatternStore>,
    pub messages: Arc<dyn MessageLog>,

    // -------- Services --------
    pub chat: Arc<ChatService>,
}

impl AppState {
    /// Wires the stores and the HTTP page fetcher described by `config`.
    pub fn new(pool: SqlitePool, config: &PatterConfig) -> Self {
        let scraping = config.scraping_api_key.clone().map(|api_key| ScrapingService {
            api_url: config.scraping_api_url.clone(),
            api_key,
        });
        let fetcher = Arc::new(HttpPageFetcher::new(scraping, config.fetch_timeout()));

        Self::with_fetcher(pool, fetcher, config.match_min_rating)
    }

    pub fn with_fetcher(
        pool: SqlitePool,
        fetcher: Arc<dyn PageFetcher>,
        match_min_rating: Option<f64>,
    ) -> Self {
        let patterns: Arc<dyn PatternStore> = Arc::new(SqlitePatternStore::new(pool.clone()));
        let messages: Arc<dyn MessageLog> = Arc::new(SqliteMessageLog::new(pool.clone()));
        let chat = Arc::new(ChatService::new(
            patterns.clone(),
            messages.clone(),
            fetcher,
            match_min_rating,
        ));

        Self {
            pool,
            patterns,
            messages,
            chat,
        }
    }
}
