// src/config/mod.rs
// Central configuration for patter - loaded from .env / environment with defaults

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

pub static CONFIG: Lazy<PatterConfig> = Lazy::new(PatterConfig::from_env);

#[derive(Debug, Clone, Deserialize)]
pub struct PatterConfig {
    // ── Database
    pub database_url: String,
    pub sqlite_max_connections: u32,

    // ── Server
    pub host: String,
    pub port: u16,

    // ── Logging
    pub log_level: String,

    // ── CLI identity
    pub cli_user: String,

    // ── Web learning
    pub scraping_api_url: String,
    pub scraping_api_key: Option<String>,
    pub fetch_timeout_secs: u64,

    // ── Matcher
    pub match_min_rating: Option<f64>,
}

/// Strips a trailing `# comment` and surrounding whitespace from a raw env value.
fn clean_value(raw: &str) -> &str {
    raw.split('#').next().unwrap_or("").trim()
}

fn env_var_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    match std::env::var(key) {
        Ok(val) => match clean_value(&val).parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!("Config: {} = '{}' (parse failed, using default)", key, val);
                default
            }
        },
        Err(_) => default,
    }
}

fn env_opt<T>(key: &str) -> Option<T>
where
    T: FromStr,
{
    let val = std::env::var(key).ok()?;
    let clean = clean_value(&val);
    if clean.is_empty() {
        return None;
    }
    match clean.parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!("Config: {} = '{}' (parse failed, ignoring)", key, val);
            None
        }
    }
}

impl PatterConfig {
    pub fn from_env() -> Self {
        // Missing .env is fine in production
        let _ = dotenvy::dotenv();

        Self {
            database_url: env_var_or("DATABASE_URL", "sqlite://patter.db?mode=rwc".to_string()),
            sqlite_max_connections: env_var_or("PATTER_SQLITE_MAX_CONNECTIONS", 5),
            host: env_var_or("PATTER_HOST", "127.0.0.1".to_string()),
            port: env_var_or("PATTER_PORT", 3000),
            log_level: env_var_or("PATTER_LOG_LEVEL", "info".to_string()),
            cli_user: env_var_or("PATTER_CLI_USER", "local".to_string()),
            scraping_api_url: env_var_or(
                "SCRAPING_API_URL",
                "https://app.scrapingbee.com/api/v1".to_string(),
            ),
            scraping_api_key: env_opt("SCRAPING_API_KEY"),
            fetch_timeout_secs: env_var_or("PATTER_FETCH_TIMEOUT_SECS", 30),
            match_min_rating: env_opt("PATTER_MATCH_MIN_RATING"),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}
