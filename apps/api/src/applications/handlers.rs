//! Axum route handlers for application tracking reads.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{AppPath, AppQuery};
use crate::models::application::{timeline_is_consistent, ApplicationRow, PipelineStatus};
use crate::models::job_application::{JobApplicationRow, JobApplicationStatus};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplicationsQuery {
    pub user_id: Uuid,
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct JobApplicationsResponse {
    pub success: bool,
    pub applications: Vec<JobApplicationRow>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    pub success: bool,
    pub application: ApplicationRow,
    /// False when the newest timeline entry disagrees with `status`.
    pub timeline_consistent: bool,
}

/// GET /api/v1/job-applications?userId=..&status=..
///
/// A user's self-tracked applications, newest first, optionally narrowed to one status.
pub async fn handle_list_job_applications(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<JobApplicationsQuery>,
) -> Result<Json<JobApplicationsResponse>, AppError> {
    let status = parse_status_filter(query.status.as_deref())?;

    let applications = sqlx::query_as::<_, JobApplicationRow>(
        r#"
        SELECT id, user_id, company_name, job_title, location, salary, status,
               deadline, notes, application_date
        FROM job_applications
        WHERE user_id = $1 AND ($2::text IS NULL OR status = $2)
        ORDER BY application_date DESC
        "#,
    )
    .bind(query.user_id)
    .bind(status.map(|s| s.as_str()))
    .fetch_all(&state.db)
    .await?;

    Ok(Json(JobApplicationsResponse {
        success: true,
        applications,
    }))
}

/// GET /api/v1/applications/:id
pub async fn handle_get_application(
    State(state): State<AppState>,
    AppPath(application_id): AppPath<Uuid>,
) -> Result<Json<ApplicationResponse>, AppError> {
    let application = sqlx::query_as::<_, ApplicationRow>(
        r#"
        SELECT id, user_id, job_id, resume_id, status, timeline, notes, next_steps,
               match_score, created_at, updated_at
        FROM applications
        WHERE id = $1
        "#,
    )
    .bind(application_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Application {application_id} not found")))?;

    // An unrecognised stored status can never agree with the timeline.
    let timeline_consistent = application
        .status
        .parse::<PipelineStatus>()
        .map(|status| timeline_is_consistent(status, &application.timeline))
        .unwrap_or(false);

    Ok(Json(ApplicationResponse {
        success: true,
        application,
        timeline_consistent,
    }))
}

/// Blank and "all" mean no filter; anything else must be a known status.
fn parse_status_filter(status: Option<&str>) -> Result<Option<JobApplicationStatus>, AppError> {
    match status.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("all") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(AppError::Validation),
    }
}
