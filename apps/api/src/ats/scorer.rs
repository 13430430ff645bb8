//! ATS scoring: estimates how an applicant tracking system would rate a resume against a JD.
//!
//! Four components, each on a 0–100 scale:
//! - keyword match: share of JD keywords appearing verbatim in the resume's values
//! - format: 100 minus fixed penalties for missing contact/summary/experience sections
//! - experience match: resume years against the years the JD asks for
//! - skills match: share of listed resume skills the JD mentions
//!
//! The total is their weighted sum (0.4 / 0.2 / 0.2 / 0.2).

use std::sync::OnceLock;

use chrono::{Datelike, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ats::keywords::extract_keywords;
use crate::models::resume::{present, ExperienceItem, ResumeData};

const PENALTY_NO_EMAIL: f64 = 10.0;
const PENALTY_NO_PHONE: f64 = 5.0;
const PENALTY_NO_LOCATION: f64 = 5.0;
const PENALTY_NO_SUMMARY: f64 = 10.0;
const PENALTY_NO_EXPERIENCE: f64 = 15.0;

const KEYWORD_SUGGESTION_THRESHOLD: f64 = 70.0;
const FORMAT_SUGGESTION_THRESHOLD: f64 = 80.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtsWeights {
    pub keyword_match: f64,
    pub format_score: f64,
    pub experience_match: f64,
    pub skills_match: f64,
}

impl Default for AtsWeights {
    fn default() -> Self {
        Self {
            keyword_match: 0.4,
            format_score: 0.2,
            experience_match: 0.2,
            skills_match: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub keyword_match: f64,
    pub format_score: f64,
    pub experience_match: f64,
    pub skills_match: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Keyword,
    Format,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub message: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsReport {
    pub total_score: f64,
    pub breakdown: ScoreBreakdown,
    pub suggestions: Vec<Suggestion>,
}

/// Stateless apart from its weights.
#[derive(Debug, Clone, Default)]
pub struct AtsScorer {
    pub weights: AtsWeights,
}

impl AtsScorer {
    /// Scores a resume against a job description as of today's date.
    pub fn calculate_score(&self, resume: &ResumeData, job_description: &str) -> AtsReport {
        self.calculate_score_at(resume, job_description, Utc::now().year())
    }

    pub fn calculate_score_at(
        &self,
        resume: &ResumeData,
        job_description: &str,
        current_year: i32,
    ) -> AtsReport {
        let breakdown = ScoreBreakdown {
            keyword_match: keyword_match(resume, job_description),
            format_score: format_score(resume),
            experience_match: experience_match(resume, job_description, current_year),
            skills_match: skills_match(resume, job_description),
        };

        AtsReport {
            total_score: total_score(&breakdown, &self.weights),
            suggestions: generate_suggestions(&breakdown),
            breakdown,
        }
    }
}

/// Percentage of JD keywords found as substrings of the lower-cased resume values.
/// A JD with no keywords scores 0.
pub fn keyword_match(resume: &ResumeData, job_description: &str) -> f64 {
    let keywords = extract_keywords(job_description);
    if keywords.is_empty() {
        return 0.0;
    }

    let content = resume_text(resume);
    let matches = keywords.iter().filter(|k| content.contains(k.as_str())).count();

    matches as f64 / keywords.len() as f64 * 100.0
}

/// Every string and number in the serialized resume, lower-cased and space-joined.
/// Field names, nulls and booleans are left out so schema keys never count as matches.
fn resume_text(resume: &ResumeData) -> String {
    fn collect(value: &Value, out: &mut Vec<String>) {
        match value {
            Value::String(s) => out.push(s.to_lowercase()),
            Value::Number(n) => out.push(n.to_string()),
            Value::Array(items) => items.iter().for_each(|item| collect(item, out)),
            Value::Object(fields) => fields.values().for_each(|field| collect(field, out)),
            Value::Null | Value::Bool(_) => {}
        }
    }

    let mut parts = Vec::new();
    collect(&serde_json::to_value(resume).unwrap_or_default(), &mut parts);
    parts.join(" ")
}

/// 100 minus a fixed penalty per missing section, floored at 0.
pub fn format_score(resume: &ResumeData) -> f64 {
    let basics = &resume.basics;
    let mut score = 100.0;

    if present(&basics.email).is_none() {
        score -= PENALTY_NO_EMAIL;
    }
    if present(&basics.phone).is_none() {
        score -= PENALTY_NO_PHONE;
    }
    if present(&basics.location).is_none() {
        score -= PENALTY_NO_LOCATION;
    }
    if present(&basics.summary).is_none() {
        score -= PENALTY_NO_SUMMARY;
    }
    if resume.experience.is_empty() {
        score -= PENALTY_NO_EXPERIENCE;
    }

    f64::max(0.0, score)
}

/// Resume years relative to the years the JD asks for.
///
/// With a stated requirement of N years the score is `min(1, years / N) × 100`.
/// Without one, any listed experience earns 100 and none earns 0.
pub fn experience_match(resume: &ResumeData, job_description: &str, current_year: i32) -> f64 {
    let Some(required) = required_years(job_description) else {
        return if resume.experience.is_empty() { 0.0 } else { 100.0 };
    };

    let years: i32 = resume
        .experience
        .iter()
        .map(|item| item_years(item, current_year))
        .sum();

    (years as f64 / required as f64).min(1.0) * 100.0
}

/// Percentage of the resume's listed skills that the JD mentions (case-insensitive).
/// A resume with no skills scores 0.
pub fn skills_match(resume: &ResumeData, job_description: &str) -> f64 {
    let skills: Vec<String> = resume
        .skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();
    if skills.is_empty() {
        return 0.0;
    }

    let jd = job_description.to_lowercase();
    let mentioned = skills.iter().filter(|s| jd.contains(s.as_str())).count();

    mentioned as f64 / skills.len() as f64 * 100.0
}

/// Weighted sum of the four components.
pub fn total_score(breakdown: &ScoreBreakdown, weights: &AtsWeights) -> f64 {
    breakdown.keyword_match * weights.keyword_match
        + breakdown.format_score * weights.format_score
        + breakdown.experience_match * weights.experience_match
        + breakdown.skills_match * weights.skills_match
}

fn generate_suggestions(breakdown: &ScoreBreakdown) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    if breakdown.keyword_match < KEYWORD_SUGGESTION_THRESHOLD {
        suggestions.push(Suggestion {
            kind: SuggestionKind::Keyword,
            message: "Consider adding more relevant keywords from the job description".to_string(),
            priority: Priority::High,
        });
    }

    if breakdown.format_score < FORMAT_SUGGESTION_THRESHOLD {
        suggestions.push(Suggestion {
            kind: SuggestionKind::Format,
            message: "Improve resume format by adding missing sections".to_string(),
            priority: Priority::Medium,
        });
    }

    suggestions
}

/// Largest "N years" / "N+ yrs" figure mentioned in the text.
fn required_years(text: &str) -> Option<u32> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| {
        Regex::new(r"(?i)\b(\d{1,2})\s*\+?\s*(?:years?|yrs?)\b").expect("valid years pattern")
    });

    pattern
        .captures_iter(text)
        .filter_map(|c| c[1].parse::<u32>().ok())
        .filter(|&n| n > 0)
        .max()
}

/// Whole years spanned by one experience entry. Missing or current end dates run to `current_year`.
fn item_years(item: &ExperienceItem, current_year: i32) -> i32 {
    let Some(start) = item.start_date.as_deref().and_then(year_in) else {
        return 0;
    };
    let end = if item.current {
        current_year
    } else {
        item.end_date
            .as_deref()
            .and_then(year_in)
            .unwrap_or(current_year)
    };
    (end - start).max(0)
}

fn year_in(date: &str) -> Option<i32> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern =
        PATTERN.get_or_init(|| Regex::new(r"\b(19|20)\d{2}\b").expect("valid year pattern"));
    pattern.find(date).and_then(|m| m.as_str().parse().ok())
}
