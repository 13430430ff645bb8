//! Axum route handlers for the recruiter API.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::extract::{AppJson, AppQuery};
use crate::models::user::CandidateProfile;
use crate::ranking::batch::{rank_candidates, BatchPolicy, RankedCandidate};
use crate::ranking::scoring::JobRequirements;
use crate::recruiter::candidates::{
    dashboard_stats, load_candidates, score_candidates, DashboardStats, ScoredCandidate,
};
use crate::recruiter::match_score::{calculate_match_score, CandidateFilter};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CandidatesResponse {
    pub success: bool,
    pub candidates: Vec<ScoredCandidate>,
}

#[derive(Debug, Serialize)]
pub struct DashboardStatsResponse {
    pub success: bool,
    pub stats: DashboardStats,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingRequest {
    pub filters: Option<CandidateFilter>,
    pub job_requirements: JobRequirements,
}

#[derive(Debug, Serialize)]
pub struct RankingResponse {
    pub success: bool,
    pub rankings: Vec<RankedCandidate>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/auth/recruiter/candidates
///
/// Every candidate scored against the query filters, best match first.
pub async fn handle_list_candidates(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<CandidateFilter>,
) -> Result<Json<CandidatesResponse>, AppError> {
    let candidates = load_candidates(&state.db).await?;
    let candidates = score_candidates(candidates, &filter);

    Ok(Json(CandidatesResponse {
        success: true,
        candidates,
    }))
}

/// GET /api/v1/recruiter/dashboard-stats
pub async fn handle_dashboard_stats(
    State(state): State<AppState>,
) -> Result<Json<DashboardStatsResponse>, AppError> {
    let stats = dashboard_stats(&state.db).await?;
    Ok(Json(DashboardStatsResponse {
        success: true,
        stats,
    }))
}

/// POST /api/v1/recruiter/rankings
///
/// Ranks the (optionally filtered) candidate pool with the AI scorer.
/// Never fails on AI errors; affected candidates carry fallback scores.
pub async fn handle_rank_candidates(
    State(state): State<AppState>,
    AppJson(request): AppJson<RankingRequest>,
) -> Result<Json<RankingResponse>, AppError> {
    let candidates = load_candidates(&state.db).await?;
    let candidates = match &request.filters {
        Some(filter) => shortlist(candidates, filter),
        None => candidates,
    };
    info!("Ranking {} candidates", candidates.len());

    let rankings = rank_candidates(
        state.scoring_generator.clone(),
        candidates,
        Arc::new(request.job_requirements),
        BatchPolicy::from_config(&state.config),
    )
    .await;

    Ok(Json(RankingResponse {
        success: true,
        rankings,
    }))
}

/// Keeps candidates meeting the filter. Without `minScore` only full matches survive,
/// since each one costs an AI call.
fn shortlist(candidates: Vec<CandidateProfile>, filter: &CandidateFilter) -> Vec<CandidateProfile> {
    let min_score = filter.min_score.unwrap_or(100);
    candidates
        .into_iter()
        .filter(|c| calculate_match_score(c, filter) >= min_score)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str, location: &str) -> CandidateProfile {
        CandidateProfile {
            name: name.to_string(),
            location: Some(location.to_string()),
            ..CandidateProfile::default()
        }
    }

    #[test]
    fn test_shortlist_defaults_to_full_matches() {
        let filter = CandidateFilter {
            location: Some("berlin".to_string()),
            ..CandidateFilter::default()
        };
        let kept = shortlist(vec![profile("a", "Berlin"), profile("b", "Paris")], &filter);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "a");
    }

    #[test]
    fn test_shortlist_honours_min_score() {
        let filter = CandidateFilter {
            location: Some("berlin".to_string()),
            min_score: Some(0),
            ..CandidateFilter::default()
        };
        let kept = shortlist(vec![profile("a", "Berlin"), profile("b", "Paris")], &filter);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_ranking_request_accepts_missing_filters() {
        let request: RankingRequest = serde_json::from_str(
            r#"{"jobRequirements": {"skills": ["Rust"], "title": "Engineer", "minYears": 3}}"#,
        )
        .unwrap();
        assert!(request.filters.is_none());
        assert_eq!(request.job_requirements.min_years, Some(3));
    }
}
