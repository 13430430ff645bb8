use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::AppPath;
use crate::models::user::ResumeBlobRow;
use crate::state::AppState;

const DEFAULT_CONTENT_TYPE: &str = "application/pdf";

/// GET /api/v1/auth/resume/:userId/view
/// Returns the stored PDF resume inline.
pub async fn handle_view_resume(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<Uuid>,
) -> Result<Response, AppError> {
    let row = sqlx::query_as::<_, ResumeBlobRow>(
        "SELECT resume_pdf, resume_content_type FROM users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;

    let (data, content_type) = blob_parts(row)
        .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (
                header::CONTENT_DISPOSITION,
                "inline; filename=resume.pdf".to_string(),
            ),
        ],
        data,
    )
        .into_response())
}

fn blob_parts(row: ResumeBlobRow) -> Option<(Vec<u8>, String)> {
    let data = row.resume_pdf.filter(|d| !d.is_empty())?;
    let content_type = row
        .resume_content_type
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
    Some((data, content_type))
}
