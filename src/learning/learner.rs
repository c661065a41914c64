// src/learning/learner.rs
// Web-learning ingestion: fetch -> extract blocks -> pair sentences -> store web entries

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::extract::extract_blocks;
use super::fetch::PageFetcher;
use super::pairing::pair_sentences;
use crate::error::ChatResult;
use crate::training::{NewEntry, PatternStore};

/// Outcome of one ingestion job. Failures are reported here, never raised.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestReport {
    pub url: String,
    pub success: bool,
    /// Readable blocks extracted from the page.
    pub patterns_found: usize,
    /// Blocks that produced a stored entry.
    pub entries_stored: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IngestReport {
    fn failed(url: &str, error: impl ToString) -> Self {
        Self {
            url: url.to_string(),
            success: false,
            patterns_found: 0,
            entries_stored: 0,
            error: Some(error.to_string()),
        }
    }
}

pub struct WebLearner {
    store: Arc<dyn PatternStore>,
    fetcher: Arc<dyn PageFetcher>,
}

impl WebLearner {
    pub fn new(store: Arc<dyn PatternStore>, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { store, fetcher }
    }

    /// Stores web entries derived from `text` (one candidate per call), returning
    /// whether an entry was written.
    pub async fn store_web_pattern(&self, text: &str, url: &str) -> ChatResult<bool> {
        let Some(pair) = pair_sentences(text) else {
            return Ok(false);
        };

        let id = self
            .store
            .add(NewEntry::web(pair.pattern, pair.response, url))
            .await?;
        Ok(id.is_some())
    }

    /// Runs the full ingestion for `url`.
    pub async fn learn(&self, url: &str) -> IngestReport {
        info!("Learning from {}", url);

        let html = match self.fetcher.fetch(url).await {
            Ok(html) => html,
            Err(e) => {
                warn!("Web learning failed for {}: {}", url, e);
                return IngestReport::failed(url, e);
            }
        };

        let blocks = extract_blocks(&html);
        let mut entries_stored = 0;

        for block in &blocks {
            match self.store_web_pattern(&block.text, url).await {
                Ok(true) => entries_stored += 1,
                Ok(false) => {}
                Err(e) => {
                    warn!("Web learning failed storing patterns from {}: {}", url, e);
                    return IngestReport {
                        patterns_found: blocks.len(),
                        entries_stored,
                        ..IngestReport::failed(url, e)
                    };
                }
            }
        }

        info!(
            "Learned from {}: {} blocks found, {} entries stored",
            url,
            blocks.len(),
            entries_stored
        );

        IngestReport {
            url: url.to_string(),
            success: true,
            patterns_found: blocks.len(),
            entries_stored,
            error: None,
        }
    }
}
