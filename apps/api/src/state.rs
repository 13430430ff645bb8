use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::errors::AppError;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// OpenAI-backed generator for resume text and keyword suggestions.
    /// `None` when OPENAI_API_KEY is unset.
    pub content_generator: Option<Arc<dyn TextGenerator>>,
    /// Gemini-backed generator for candidate ranking and skill-gap analysis.
    /// `None` when GEMINI_API_KEY is unset; ranking then falls back to skills overlap.
    pub scoring_generator: Option<Arc<dyn TextGenerator>>,
}

impl AppState {
    /// The content generator, or `AppError::AiUnavailable` for use cases with no fallback.
    pub fn require_content_generator(&self) -> Result<&dyn TextGenerator, AppError> {
        self.content_generator
            .as_deref()
            .ok_or(AppError::AiUnavailable)
    }

    pub fn require_scoring_generator(&self) -> Result<&dyn TextGenerator, AppError> {
        self.scoring_generator
            .as_deref()
            .ok_or(AppError::AiUnavailable)
    }
}

#[cfg(test)]
impl AppState {
    /// State backed by a lazy pool that never connects, for routes that do not touch the database.
    pub(crate) fn for_tests(
        content_generator: Option<Arc<dyn TextGenerator>>,
        scoring_generator: Option<Arc<dyn TextGenerator>>,
    ) -> Self {
        let config = Config::for_tests("development");
        let db = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .expect("lazy pool");
        AppState {
            db,
            config,
            content_generator,
            scoring_generator,
        }
    }
}
