//! Page fetching for web learning.
//!
//! Pages are fetched either through a scraping service (when an API key is configured)
//! or directly. Only the raw body is returned; extraction happens in [`super::extract`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::error::{ChatError, ChatResult};

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Raw HTML of the page at `url`.
    async fn fetch(&self, url: &str) -> ChatResult<String>;
}

/// Credentials for an HTML scraping API that takes `api_key` and `url` query parameters.
#[derive(Debug, Clone)]
pub struct ScrapingService {
    pub api_url: String,
    pub api_key: String,
}

pub struct HttpPageFetcher {
    client: Client,
    scraping: Option<ScrapingService>,
    timeout: Duration,
}

impl HttpPageFetcher {
    pub fn new(scraping: Option<ScrapingService>, timeout: Duration) -> Self {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (compatible; patter/0.1)")
            .build()
            .unwrap_or_default();

        Self {
            client,
            scraping,
            timeout,
        }
    }

    pub fn uses_scraping_service(&self) -> bool {
        self.scraping.is_some()
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> ChatResult<String> {
        let parsed = url::Url::parse(url).map_err(|e| ChatError::fetch(url, e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ChatError::fetch(
                url,
                format!("unsupported scheme '{}'", parsed.scheme()),
            ));
        }

        let request = match &self.scraping {
            Some(service) => {
                debug!("Fetching {} through scraping service", url);
                self.client.get(&service.api_url).query(&[
                    ("api_key", service.api_key.as_str()),
                    ("url", url),
                    ("render_js", "false"),
                ])
            }
            None => {
                debug!("Fetching {} directly", url);
                self.client.get(parsed.as_str())
            }
        };

        let response = request
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ChatError::fetch(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::fetch(url, format!("HTTP {}", status.as_u16())));
        }

        response
            .text()
            .await
            .map_err(|e| ChatError::fetch(url, e.to_string()))
    }
}
