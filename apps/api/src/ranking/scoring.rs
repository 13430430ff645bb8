use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::llm_client::{generate_json, AiCallError, TextGenerator};
use crate::models::user::CandidateProfile;
use crate::ranking::prompts::{candidate_scoring_prompt, CANDIDATE_SCORING_SYSTEM};

const FALLBACK_EDUCATION: f64 = 70.0;
const FALLBACK_EXPERIENCE: f64 = 75.0;
const FALLBACK_PROJECT: f64 = 65.0;
const FALLBACK_STRENGTHS: usize = 3;

const NO_RECOMMENDATION: &str = "No recommendation available";

/// What the recruiter is hiring for.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRequirements {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_years: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringSource {
    Ai,
    Fallback,
}

/// Per-candidate scoring. Every field is always populated, whichever path produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiScoring {
    pub education_score: u32,
    pub experience_score: u32,
    pub skills_score: u32,
    pub project_score: u32,
    pub overall_match: u32,
    pub key_strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub recommendation: String,
    pub source: ScoringSource,
}

/// Model output before normalization. Models routinely omit fields or return floats.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawAiScoring {
    education_score: Option<f64>,
    experience_score: Option<f64>,
    skills_score: Option<f64>,
    project_score: Option<f64>,
    overall_match: Option<f64>,
    key_strengths: Option<Vec<String>>,
    areas_for_improvement: Option<Vec<String>>,
    recommendation: Option<String>,
}

impl From<RawAiScoring> for AiScoring {
    fn from(raw: RawAiScoring) -> Self {
        AiScoring {
            education_score: clamp_score(raw.education_score),
            experience_score: clamp_score(raw.experience_score),
            skills_score: clamp_score(raw.skills_score),
            project_score: clamp_score(raw.project_score),
            overall_match: clamp_score(raw.overall_match),
            key_strengths: raw.key_strengths.unwrap_or_default(),
            areas_for_improvement: raw.areas_for_improvement.unwrap_or_default(),
            recommendation: raw
                .recommendation
                .filter(|r| !r.trim().is_empty())
                .unwrap_or_else(|| NO_RECOMMENDATION.to_string()),
            source: ScoringSource::Ai,
        }
    }
}

fn clamp_score(value: Option<f64>) -> u32 {
    match value {
        Some(v) if v.is_finite() => v.clamp(0.0, 100.0).round() as u32,
        _ => 0,
    }
}

/// Deterministic skills-overlap scoring used whenever the AI path fails.
pub fn fallback_scoring(candidate: &CandidateProfile, requirements: &JobRequirements) -> AiScoring {
    let skills_score = if requirements.skills.is_empty() {
        100.0
    } else {
        let matched = candidate
            .skills
            .iter()
            .filter(|skill| {
                requirements
                    .skills
                    .iter()
                    .any(|required| required.trim().eq_ignore_ascii_case(skill.trim()))
            })
            .count();
        (matched as f64 / requirements.skills.len() as f64 * 100.0).min(100.0)
    };

    let overall =
        (FALLBACK_EDUCATION + FALLBACK_EXPERIENCE + skills_score + FALLBACK_PROJECT) / 4.0;

    AiScoring {
        education_score: FALLBACK_EDUCATION as u32,
        experience_score: FALLBACK_EXPERIENCE as u32,
        skills_score: skills_score.round() as u32,
        project_score: FALLBACK_PROJECT as u32,
        overall_match: overall.round() as u32,
        key_strengths: candidate
            .skills
            .iter()
            .take(FALLBACK_STRENGTHS)
            .cloned()
            .collect(),
        areas_for_improvement: vec!["Unable to perform detailed analysis".to_string()],
        recommendation: "Basic match based on skills overlap".to_string(),
        source: ScoringSource::Fallback,
    }
}

/// One AI scoring call. Errors are returned, not swallowed; the ranker decides on the fallback.
pub async fn score_candidate(
    generator: Option<&dyn TextGenerator>,
    candidate: &CandidateProfile,
    requirements: &JobRequirements,
    timeout: Duration,
) -> Result<AiScoring, AiCallError> {
    let generator = generator.ok_or(AiCallError::NotConfigured("Gemini"))?;

    let raw: RawAiScoring = generate_json(
        generator,
        &build_scoring_prompt(candidate, requirements)?,
        CANDIDATE_SCORING_SYSTEM,
        timeout,
    )
    .await?;

    Ok(raw.into())
}

fn build_scoring_prompt(
    candidate: &CandidateProfile,
    requirements: &JobRequirements,
) -> Result<String, AiCallError> {
    let candidate_json = serde_json::to_string_pretty(&json!({
        "profile": candidate,
        "resume": candidate.resume,
    }))?;
    let requirements_json = serde_json::to_string_pretty(requirements)?;

    Ok(candidate_scoring_prompt(&requirements_json, &candidate_json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedGenerator;

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn candidate(skills: &[&str]) -> CandidateProfile {
        CandidateProfile {
            name: "Linus".to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            ..CandidateProfile::default()
        }
    }

    fn requirements(skills: &[&str]) -> JobRequirements {
        JobRequirements {
            skills: skills.iter().map(|s| s.to_string()).collect(),
            title: Some("Platform Engineer".to_string()),
            ..JobRequirements::default()
        }
    }

    #[test]
    fn test_fallback_skills_overlap_is_case_insensitive() {
        let scoring = fallback_scoring(
            &candidate(&["rust", "Go", "Kafka", "SQL"]),
            &requirements(&["Rust", "Kafka", "Terraform", "AWS"]),
        );
        assert_eq!(scoring.skills_score, 50);
        // (70 + 75 + 50 + 65) / 4 = 65
        assert_eq!(scoring.overall_match, 65);
        assert_eq!(scoring.key_strengths, vec!["rust", "Go", "Kafka"]);
        assert_eq!(scoring.source, ScoringSource::Fallback);
    }

    #[test]
    fn test_fallback_without_required_skills() {
        let scoring = fallback_scoring(&candidate(&[]), &requirements(&[]));
        assert_eq!(scoring.skills_score, 100);
        assert_eq!(scoring.overall_match, 78);
        assert!(scoring.key_strengths.is_empty());
        assert_eq!(
            scoring.areas_for_improvement,
            vec!["Unable to perform detailed analysis"]
        );
    }

    #[test]
    fn test_fallback_overall_uses_unrounded_skills() {
        // skills 1/3 = 33.33.., overall (70 + 75 + 33.33 + 65) / 4 = 60.83 -> 61
        let scoring = fallback_scoring(&candidate(&["Rust"]), &requirements(&["Rust", "Go", "C"]));
        assert_eq!(scoring.skills_score, 33);
        assert_eq!(scoring.overall_match, 61);
    }

    #[tokio::test]
    async fn test_ai_scores_are_clamped_and_defaulted() {
        let generator = ScriptedGenerator::ok(
            r#"```json
{"educationScore": 120, "experienceScore": -5, "skillsScore": 88.6, "overallMatch": 81, "keyStrengths": ["Rust"]}
```"#,
        );
        let scoring = score_candidate(
            Some(&generator as &dyn TextGenerator),
            &candidate(&["Rust"]),
            &requirements(&["Rust"]),
            TIMEOUT,
        )
        .await
        .unwrap();

        assert_eq!(scoring.education_score, 100);
        assert_eq!(scoring.experience_score, 0);
        assert_eq!(scoring.skills_score, 89);
        assert_eq!(scoring.project_score, 0);
        assert_eq!(scoring.overall_match, 81);
        assert!(scoring.areas_for_improvement.is_empty());
        assert_eq!(scoring.recommendation, NO_RECOMMENDATION);
        assert_eq!(scoring.source, ScoringSource::Ai);
    }

    #[tokio::test]
    async fn test_prompt_carries_requirements_and_candidate() {
        let generator = ScriptedGenerator::ok(r#"{"overallMatch": 50}"#);
        score_candidate(
            Some(&generator as &dyn TextGenerator),
            &candidate(&["Kubernetes"]),
            &requirements(&["Rust"]),
            TIMEOUT,
        )
        .await
        .unwrap();

        let prompts = generator.prompts.lock().unwrap();
        assert!(prompts[0].contains("Platform Engineer"));
        assert!(prompts[0].contains("Kubernetes"));
    }

    #[test]
    fn test_placeholder_text_in_requirements_is_left_alone() {
        let mut reqs = requirements(&["Rust"]);
        reqs.description = Some("Paste {candidate} notes here".to_string());

        let prompt = build_scoring_prompt(&candidate(&["Kubernetes"]), &reqs).unwrap();
        assert!(prompt.contains("Paste {candidate} notes here"));
        assert_eq!(prompt.matches("Kubernetes").count(), 1);
    }

    #[tokio::test]
    async fn test_missing_generator_is_an_error() {
        let result = score_candidate(None, &candidate(&[]), &requirements(&[]), TIMEOUT).await;
        assert!(matches!(result, Err(AiCallError::NotConfigured(_))));
    }
}
