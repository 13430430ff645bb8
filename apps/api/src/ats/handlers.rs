//! Axum route handlers for ATS scoring and keyword suggestions.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use sqlx::types::Json as SqlJson;
use uuid::Uuid;

use crate::ats::scorer::{AtsReport, AtsScorer};
use crate::ats::suggest::{suggest_keywords, KeywordSuggestions};
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::models::resume::ResumeData;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsScoreRequest {
    pub resume: Option<ResumeData>,
    pub resume_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct AtsScoreResponse {
    pub success: bool,
    #[serde(flatten)]
    pub report: AtsReport,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordsRequest {
    #[serde(default)]
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct KeywordsResponse {
    pub success: bool,
    #[serde(flatten)]
    pub suggestions: KeywordSuggestions,
}

/// POST /api/v1/ai/ats-score
///
/// Scores an inline resume, or a stored one when only `resumeId` is given.
pub async fn handle_ats_score(
    State(state): State<AppState>,
    AppJson(request): AppJson<AtsScoreRequest>,
) -> Result<Json<AtsScoreResponse>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "jobDescription cannot be empty".to_string(),
        ));
    }

    let resume = match (request.resume, request.resume_id) {
        (Some(resume), _) => resume,
        (None, Some(resume_id)) => load_resume(&state, resume_id, request.user_id).await?,
        (None, None) => {
            return Err(AppError::Validation(
                "Either resume or resumeId is required".to_string(),
            ))
        }
    };

    let report = AtsScorer::default().calculate_score(&resume, &request.job_description);

    Ok(Json(AtsScoreResponse {
        success: true,
        report,
    }))
}

/// POST /api/v1/ai/generate-keywords
///
/// Always succeeds for a non-blank JD; `source` tells the client whether the model answered.
pub async fn handle_generate_keywords(
    State(state): State<AppState>,
    AppJson(request): AppJson<KeywordsRequest>,
) -> Result<Json<KeywordsResponse>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "jobDescription cannot be empty".to_string(),
        ));
    }

    let suggestions = suggest_keywords(
        state.content_generator.as_deref(),
        &request.job_description,
        state.config.ai_timeout,
    )
    .await;

    Ok(Json(KeywordsResponse {
        success: true,
        suggestions,
    }))
}

async fn load_resume(
    state: &AppState,
    resume_id: Uuid,
    user_id: Option<Uuid>,
) -> Result<ResumeData, AppError> {
    let data = sqlx::query_scalar::<_, SqlJson<ResumeData>>(
        "SELECT data FROM resumes WHERE id = $1 AND ($2::uuid IS NULL OR user_id = $2)",
    )
    .bind(resume_id)
    .bind(user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;

    Ok(data.0)
}
