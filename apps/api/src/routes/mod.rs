pub mod health;
pub mod resume_view;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::applications::handlers as applications;
use crate::ats::handlers as ats;
use crate::generation::handlers as generation;
use crate::recruiter::handlers as recruiter;
use crate::skill_craft::handlers as skill_craft;
use crate::skill_craft::pdf::MAX_PDF_BYTES;
use crate::state::AppState;

/// Room for multipart framing around the largest accepted PDF.
const UPLOAD_BODY_LIMIT: usize = MAX_PDF_BYTES + 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // AI: content generation, ATS scoring, keywords
        .route("/api/v1/ai/status", get(generation::handle_ai_status))
        .route("/api/v1/ai/generate", post(generation::handle_generate_content))
        .route("/api/v1/ai/ats-score", post(ats::handle_ats_score))
        .route(
            "/api/v1/ai/generate-keywords",
            post(ats::handle_generate_keywords),
        )
        // Recruiter
        .route(
            "/api/v1/auth/recruiter/candidates",
            get(recruiter::handle_list_candidates),
        )
        .route(
            "/api/v1/recruiter/dashboard-stats",
            get(recruiter::handle_dashboard_stats),
        )
        .route(
            "/api/v1/recruiter/rankings",
            post(recruiter::handle_rank_candidates),
        )
        // Resume blob
        .route(
            "/api/v1/auth/resume/:user_id/view",
            get(resume_view::handle_view_resume),
        )
        // Application tracking
        .route(
            "/api/v1/job-applications",
            get(applications::handle_list_job_applications),
        )
        .route(
            "/api/v1/applications/:id",
            get(applications::handle_get_application),
        )
        // Skill craft
        .route(
            "/api/v1/skill-craft/upload-pdf",
            post(skill_craft::handle_upload_pdf).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route(
            "/api/v1/skill-craft/analyze-resume",
            post(skill_craft::handle_analyze_resume)
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/api/v1/skill-craft/courses", post(skill_craft::handle_courses))
        .with_state(state)
}
