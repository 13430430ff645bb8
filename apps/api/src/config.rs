use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Content generation provider. `None` disables `/ai/generate`.
    pub openai_api_key: Option<String>,
    /// Ranking and skill-gap provider. `None` routes ranking through the fallback scorer.
    pub gemini_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub app_env: String,
    pub ai_timeout: Duration,
    pub rank_batch_size: usize,
    pub rank_batch_delay: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let rank_batch_size = parse_env("RANK_BATCH_SIZE", 3usize)?;
        if rank_batch_size == 0 {
            anyhow::bail!("RANK_BATCH_SIZE must be at least 1");
        }

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            openai_api_key: optional_key("OPENAI_API_KEY"),
            gemini_api_key: optional_key("GEMINI_API_KEY"),
            port: parse_env("PORT", 4000u16)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            app_env: std::env::var("APP_ENV").unwrap_or_else(|_| "production".to_string()),
            ai_timeout: Duration::from_secs(parse_env("AI_TIMEOUT_SECS", 30u64)?),
            rank_batch_size,
            rank_batch_delay: Duration::from_millis(parse_env("RANK_BATCH_DELAY_MS", 2000u64)?),
        })
    }

    /// Error envelopes carry a `details` field only in development.
    pub fn expose_error_details(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("development")
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_key(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    pub(crate) fn for_tests(app_env: &str) -> Self {
        Config {
            database_url: "postgres://localhost/jobpilot".to_string(),
            openai_api_key: None,
            gemini_api_key: None,
            port: 4000,
            rust_log: "info".to_string(),
            app_env: app_env.to_string(),
            ai_timeout: Duration::from_secs(30),
            rank_batch_size: 3,
            rank_batch_delay: Duration::from_millis(2000),
        }
    }
}
