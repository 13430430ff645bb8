use serde::Serialize;
use sqlx::PgPool;

use crate::models::application::PipelineStatus;
use crate::models::user::{CandidateProfile, CandidateRow, Role};
use crate::recruiter::match_score::{calculate_match_score, CandidateFilter};

/// A candidate in the recruiter search result.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredCandidate {
    #[serde(flatten)]
    pub profile: CandidateProfile,
    pub match_score: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub active_jobs: i64,
    pub total_candidates: i64,
    pub scheduled_interviews: i64,
}

/// Every job-seeker account as a candidate profile, most recently updated first.
pub async fn load_candidates(db: &PgPool) -> Result<Vec<CandidateProfile>, sqlx::Error> {
    let rows = sqlx::query_as::<_, CandidateRow>(
        r#"
        SELECT id, name, email, job_role, location, years_of_experience, skills,
               resume_data, resume_last_updated
        FROM users
        WHERE role = $1
        ORDER BY resume_last_updated DESC NULLS LAST, created_at DESC
        "#,
    )
    .bind(Role::User.as_str())
    .fetch_all(db)
    .await?;

    Ok(rows.into_iter().map(CandidateProfile::from).collect())
}

/// Scores each candidate, drops those under `minScore` and sorts by score, highest first.
/// The sort is stable, so equal scores keep their load order.
pub fn score_candidates(
    candidates: Vec<CandidateProfile>,
    filter: &CandidateFilter,
) -> Vec<ScoredCandidate> {
    let min_score = filter.min_score.unwrap_or(0);

    let mut scored: Vec<ScoredCandidate> = candidates
        .into_iter()
        .map(|profile| ScoredCandidate {
            match_score: calculate_match_score(&profile, filter),
            profile,
        })
        .filter(|c| c.match_score >= min_score)
        .collect();

    scored.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    scored
}

pub async fn dashboard_stats(db: &PgPool) -> Result<DashboardStats, sqlx::Error> {
    let total_candidates: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = $1")
        .bind(Role::User.as_str())
        .fetch_one(db)
        .await?;

    let scheduled_interviews: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM applications WHERE status = $1")
            .bind(PipelineStatus::Interview.as_str())
            .fetch_one(db)
            .await?;

    let active_jobs: i64 = sqlx::query_scalar(
        "SELECT COUNT(DISTINCT job_id) FROM applications WHERE status NOT IN ($1, $2)",
    )
    .bind(PipelineStatus::Rejected.as_str())
    .bind(PipelineStatus::Accepted.as_str())
    .fetch_one(db)
    .await?;

    Ok(DashboardStats {
        active_jobs,
        total_candidates,
        scheduled_interviews,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str, role: &str) -> CandidateProfile {
        CandidateProfile {
            name: name.to_string(),
            job_role: Some(role.to_string()),
            ..CandidateProfile::default()
        }
    }

    #[test]
    fn test_scored_candidates_sorted_descending_and_filtered() {
        let filter = CandidateFilter {
            job_role: Some("Designer".to_string()),
            ..CandidateFilter::default()
        };
        let result = score_candidates(
            vec![
                profile("a", "Engineer"),
                profile("b", "Designer"),
                profile("c", "Designer"),
            ],
            &filter,
        );

        let names: Vec<&str> = result.iter().map(|c| c.profile.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
        assert_eq!(result[0].match_score, 100);
        assert_eq!(result[2].match_score, 0);
    }

    #[test]
    fn test_min_score_drops_low_matches() {
        let filter = CandidateFilter {
            job_role: Some("Designer".to_string()),
            min_score: Some(50),
            ..CandidateFilter::default()
        };
        let result = score_candidates(
            vec![profile("a", "Engineer"), profile("b", "Designer")],
            &filter,
        );
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].profile.name, "b");
    }

    #[test]
    fn test_scored_candidate_serializes_flat() {
        let result = score_candidates(vec![profile("a", "Engineer")], &CandidateFilter::default());
        let json = serde_json::to_value(&result[0]).unwrap();
        assert_eq!(json["matchScore"], 100);
        assert_eq!(json["jobRole"], "Engineer");
    }
}
