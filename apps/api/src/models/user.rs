use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::resume::{present, ResumeData};

/// Account role, fixed at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Recruiter,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Recruiter => "recruiter",
        }
    }
}

/// Columns read when a user is considered as a recruiting candidate.
/// The PDF blob is deliberately not selected here.
#[derive(Debug, Clone, FromRow)]
pub struct CandidateRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub job_role: Option<String>,
    pub location: Option<String>,
    pub years_of_experience: Option<i32>,
    pub skills: Vec<String>,
    pub resume_data: Option<Json<ResumeData>>,
    pub resume_last_updated: Option<DateTime<Utc>>,
}

/// Stored PDF resume for passthrough download.
#[derive(Debug, Clone, FromRow)]
pub struct ResumeBlobRow {
    pub resume_pdf: Option<Vec<u8>>,
    pub resume_content_type: Option<String>,
}

/// The candidate view used by match scoring and AI ranking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub job_role: Option<String>,
    pub location: Option<String>,
    pub years_of_experience: Option<i32>,
    pub summary: Option<String>,
    pub skills: Vec<String>,
    pub last_updated: Option<DateTime<Utc>>,
    /// Full resume snapshot, forwarded to the AI scorer but not echoed to clients.
    #[serde(skip_serializing, default)]
    pub resume: Option<ResumeData>,
}

impl From<CandidateRow> for CandidateProfile {
    /// Profile columns win; the resume snapshot fills whatever the profile leaves blank.
    fn from(row: CandidateRow) -> Self {
        let resume = row.resume_data.map(|Json(data)| data);
        let basics = resume.as_ref().map(|r| &r.basics);

        let job_role = present(&row.job_role)
            .or_else(|| basics.and_then(|b| present(&b.title)))
            .map(str::to_string);
        let location = present(&row.location)
            .or_else(|| basics.and_then(|b| present(&b.location)))
            .map(str::to_string);
        let summary = basics.and_then(|b| present(&b.summary)).map(str::to_string);

        let skills = if row.skills.is_empty() {
            resume.as_ref().map(|r| r.skills.clone()).unwrap_or_default()
        } else {
            row.skills
        };

        CandidateProfile {
            id: row.id,
            name: row.name,
            email: row.email,
            job_role,
            location,
            years_of_experience: row.years_of_experience,
            summary,
            skills,
            last_updated: row.resume_last_updated,
            resume,
        }
    }
}
