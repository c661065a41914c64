// tests/test_helpers.rs
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Notify;

use patter::{
    AppState, ChatError, ChatResult, db,
    identity::Caller,
    learning::PageFetcher,
};

/// Serves canned pages; unknown URLs fail like an unreachable host.
#[derive(Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> ChatResult<String> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| ChatError::fetch(url, "connection refused"))
    }
}

/// Holds every fetch until `release` is notified.
pub struct GatedFetcher {
    pub html: String,
    pub release: Arc<Notify>,
}

#[async_trait]
impl PageFetcher for GatedFetcher {
    async fn fetch(&self, _url: &str) -> ChatResult<String> {
        self.release.notified().await;
        Ok(self.html.clone())
    }
}

/// AppState over a fresh in-memory database.
pub async fn create_test_app_state(fetcher: Arc<dyn PageFetcher>) -> Arc<AppState> {
    let pool = db::connect_in_memory()
        .await
        .expect("create in-memory sqlite");
    Arc::new(AppState::with_fetcher(pool, fetcher, None))
}

pub async fn create_default_test_app_state() -> Arc<AppState> {
    create_test_app_state(Arc::new(StaticFetcher::new())).await
}

pub fn user(name: &str) -> Caller {
    Caller::from_raw(Some(name))
}

pub async fn count_rows(state: &AppState, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(&state.pool)
        .await
        .expect("count rows")
}
