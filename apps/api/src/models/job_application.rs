use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Status of a self-tracked job application. Stored as its display string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobApplicationStatus {
    Applied,
    #[serde(rename = "Interview Scheduled")]
    InterviewScheduled,
    #[serde(rename = "Offer Received")]
    OfferReceived,
    Rejected,
    Pending,
}

impl JobApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobApplicationStatus::Applied => "Applied",
            JobApplicationStatus::InterviewScheduled => "Interview Scheduled",
            JobApplicationStatus::OfferReceived => "Offer Received",
            JobApplicationStatus::Rejected => "Rejected",
            JobApplicationStatus::Pending => "Pending",
        }
    }
}

impl fmt::Display for JobApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Applied" => Ok(JobApplicationStatus::Applied),
            "Interview Scheduled" => Ok(JobApplicationStatus::InterviewScheduled),
            "Offer Received" => Ok(JobApplicationStatus::OfferReceived),
            "Rejected" => Ok(JobApplicationStatus::Rejected),
            "Pending" => Ok(JobApplicationStatus::Pending),
            other => Err(format!("Unknown job application status '{other}'")),
        }
    }
}

/// A tracking record. Not linked to any resume or job posting.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobApplicationRow {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub company_name: String,
    pub job_title: String,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub status: String,
    pub deadline: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub application_date: DateTime<Utc>,
}
