use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Recruiter pipeline stage: applied → screening → interview → offer → {rejected | accepted}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    Applied,
    Screening,
    Interview,
    Offer,
    Rejected,
    Accepted,
}

impl PipelineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStatus::Applied => "applied",
            PipelineStatus::Screening => "screening",
            PipelineStatus::Interview => "interview",
            PipelineStatus::Offer => "offer",
            PipelineStatus::Rejected => "rejected",
            PipelineStatus::Accepted => "accepted",
        }
    }
}

impl FromStr for PipelineStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "applied" => Ok(PipelineStatus::Applied),
            "screening" => Ok(PipelineStatus::Screening),
            "interview" => Ok(PipelineStatus::Interview),
            "offer" => Ok(PipelineStatus::Offer),
            "rejected" => Ok(PipelineStatus::Rejected),
            "accepted" => Ok(PipelineStatus::Accepted),
            other => Err(format!("Unknown pipeline status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub status: PipelineStatus,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationNote {
    pub content: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_id: Uuid,
    pub resume_id: Uuid,
    pub status: String,
    pub timeline: Json<Vec<TimelineEvent>>,
    pub notes: Json<Vec<ApplicationNote>>,
    pub next_steps: String,
    pub match_score: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Whether the most recent timeline entry records the current status.
///
/// Status changes and timeline appends are separate writes, so the two can drift.
/// This only reports the drift; nothing here repairs it.
pub fn timeline_is_consistent(status: PipelineStatus, timeline: &[TimelineEvent]) -> bool {
    match timeline.iter().max_by_key(|e| e.date) {
        Some(latest) => latest.status == status,
        // A fresh application may not have logged its initial stage yet.
        None => status == PipelineStatus::Applied,
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn event(status: PipelineStatus, day: u32) -> TimelineEvent {
        TimelineEvent {
            status,
            date: Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap(),
            notes: None,
        }
    }

    #[test]
    fn test_latest_event_matches_status() {
        let timeline = vec![
            event(PipelineStatus::Applied, 1),
            event(PipelineStatus::Screening, 4),
            event(PipelineStatus::Interview, 9),
        ];
        assert!(timeline_is_consistent(PipelineStatus::Interview, &timeline));
    }

    #[test]
    fn test_status_ahead_of_timeline_is_flagged() {
        let timeline = vec![event(PipelineStatus::Applied, 1)];
        assert!(!timeline_is_consistent(PipelineStatus::Offer, &timeline));
    }

    #[test]
    fn test_out_of_order_timeline_uses_latest_date() {
        let timeline = vec![
            event(PipelineStatus::Screening, 5),
            event(PipelineStatus::Applied, 1),
        ];
        assert!(timeline_is_consistent(PipelineStatus::Screening, &timeline));
    }

    #[test]
    fn test_empty_timeline() {
        assert!(timeline_is_consistent(PipelineStatus::Applied, &[]));
        assert!(!timeline_is_consistent(PipelineStatus::Rejected, &[]));
    }

    #[test]
    fn test_status_parses_stored_strings() {
        assert_eq!("offer".parse::<PipelineStatus>(), Ok(PipelineStatus::Offer));
        assert_eq!(PipelineStatus::Screening.as_str(), "screening");
        assert!("Offer Received".parse::<PipelineStatus>().is_err());
    }
}
