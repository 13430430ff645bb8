//! AI skill-gap analysis of resume text, plus course lookups for the recommended skills.
//!
//! Neither call has a deterministic fallback. Model output is parsed leniently since
//! percentages come back as numbers, numeric strings or "72%".

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{generate_json, AiCallError, TextGenerator};
use crate::skill_craft::prompts::{
    COURSES_PROMPT_TEMPLATE, SKILL_GAP_PROMPT_TEMPLATE, SKILL_GAP_SYSTEM,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecommendedSkill {
    Detailed {
        #[serde(alias = "name")]
        skill: String,
        #[serde(
            default,
            alias = "scoreIncrease",
            alias = "estimated_score_increase",
            deserialize_with = "lenient_percent"
        )]
        score_increase: f64,
    },
    Name(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGapReport {
    #[serde(default)]
    pub recommended_skills: Vec<RecommendedSkill>,
    #[serde(default, deserialize_with = "lenient_percent")]
    pub score: f64,
    #[serde(default, deserialize_with = "lenient_percent")]
    pub total_possible_score: f64,
}

pub async fn analyze_resume_text(
    generator: &dyn TextGenerator,
    resume_text: &str,
    timeout: Duration,
) -> Result<SkillGapReport, AiCallError> {
    let prompt = SKILL_GAP_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
    generate_json(generator, &prompt, SKILL_GAP_SYSTEM, timeout).await
}

/// Returns the model's course listing as-is; its shape is not fixed.
pub async fn recommend_courses(
    generator: &dyn TextGenerator,
    skills: &[String],
    timeout: Duration,
) -> Result<Value, AiCallError> {
    let prompt = COURSES_PROMPT_TEMPLATE.replace("{skills}", &skills.join(", "));
    generate_json(generator, &prompt, JSON_ONLY_SYSTEM, timeout).await
}

fn lenient_percent<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let number = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().trim_end_matches('%').trim().parse().ok(),
        _ => None,
    };
    Ok(number.filter(|n| n.is_finite()).unwrap_or(0.0))
}
