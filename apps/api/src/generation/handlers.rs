//! Axum route handlers for AI resume content generation.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::extract::AppJson;
use crate::generation::generator::{generate_content, GeneratedContent};
use crate::generation::request::GenerationRequest;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub field: String,
    #[serde(default)]
    pub context: Value,
    pub current_value: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateContentResponse {
    pub success: bool,
    #[serde(flatten)]
    pub generated: GeneratedContent,
}

#[derive(Debug, Serialize)]
pub struct AiStatusResponse {
    pub success: bool,
    pub configured: bool,
    pub message: &'static str,
}

/// POST /api/v1/ai/generate
///
/// Fills one resume field. 503 when no provider key is set, 500 when the provider fails.
pub async fn handle_generate_content(
    State(state): State<AppState>,
    AppJson(request): AppJson<GenerateContentRequest>,
) -> Result<Json<GenerateContentResponse>, AppError> {
    let generator = state.require_content_generator()?;

    let generation = GenerationRequest::from_parts(&request.field, request.context)
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let generated = generate_content(
        generator,
        &generation,
        request.current_value.as_deref(),
        state.config.ai_timeout,
    )
    .await
    .map_err(|e| {
        AppError::ai(
            "Failed to generate content",
            e,
            state.config.expose_error_details(),
        )
    })?;

    Ok(Json(GenerateContentResponse {
        success: true,
        generated,
    }))
}

/// GET /api/v1/ai/status
pub async fn handle_ai_status(State(state): State<AppState>) -> Json<AiStatusResponse> {
    let configured = state.content_generator.is_some();
    Json(AiStatusResponse {
        success: true,
        configured,
        message: if configured {
            "AI service is ready"
        } else {
            "AI service is not configured"
        },
    })
}
