//! Axum route handlers for the skill-craft tool.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::extract::AppJson;
use crate::skill_craft::analysis::{analyze_resume_text, recommend_courses, SkillGapReport};
use crate::skill_craft::pdf::{extract_pdf_text, read_pdf_upload};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AnalyzeResumeResponse {
    pub success: bool,
    #[serde(flatten)]
    pub report: SkillGapReport,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SkillList {
    Many(Vec<String>),
    Csv(String),
}

impl SkillList {
    fn into_skills(self) -> Vec<String> {
        let items = match self {
            SkillList::Many(items) => items,
            SkillList::Csv(text) => text.split(',').map(str::to_string).collect(),
        };
        items
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct CoursesRequest {
    pub list: Option<SkillList>,
}

#[derive(Debug, Serialize)]
pub struct CoursesResponse {
    #[serde(rename = "Courses")]
    pub courses: Value,
}

/// POST /api/v1/skill-craft/upload-pdf
///
/// Multipart upload (`pdfFile`) → bare skill-gap report.
pub async fn handle_upload_pdf(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<SkillGapReport>, AppError> {
    analyze_upload(&state, multipart).await.map(Json)
}

/// POST /api/v1/skill-craft/analyze-resume
///
/// Same analysis as upload-pdf, wrapped in the `success` envelope.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResumeResponse>, AppError> {
    let report = analyze_upload(&state, multipart).await?;
    Ok(Json(AnalyzeResumeResponse {
        success: true,
        report,
    }))
}

/// POST /api/v1/skill-craft/courses
pub async fn handle_courses(
    State(state): State<AppState>,
    AppJson(request): AppJson<CoursesRequest>,
) -> Result<Json<CoursesResponse>, AppError> {
    let skills = request
        .list
        .map(SkillList::into_skills)
        .unwrap_or_default();
    if skills.is_empty() {
        return Err(AppError::Validation("list must name at least one skill".to_string()));
    }

    let generator = state.require_scoring_generator()?;
    let courses = recommend_courses(generator, &skills, state.config.ai_timeout)
        .await
        .map_err(|e| {
            AppError::ai(
                "Error processing the request.",
                e,
                state.config.expose_error_details(),
            )
        })?;

    Ok(Json(CoursesResponse { courses }))
}

async fn analyze_upload(state: &AppState, multipart: Multipart) -> Result<SkillGapReport, AppError> {
    let generator = state.require_scoring_generator()?;

    let data = read_pdf_upload(multipart).await?;
    let text = extract_pdf_text(data).await?;
    info!("Extracted {} characters from uploaded resume", text.len());

    analyze_resume_text(generator, &text, state.config.ai_timeout)
        .await
        .map_err(|e| {
            AppError::ai(
                "Error processing the file.",
                e,
                state.config.expose_error_details(),
            )
        })
}
