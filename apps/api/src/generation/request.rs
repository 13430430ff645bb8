//! Typed resume-generation requests.
//!
//! The client sends a dotted field name plus a loose JSON context. Both are validated here,
//! once, so prompt building never deals with unknown fields or untyped context.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationRequestError {
    #[error("Unsupported field '{0}'")]
    UnknownField(String),

    #[error("Invalid context for '{field}': {source}")]
    InvalidContext {
        field: &'static str,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SummaryContext {
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExperienceContext {
    pub position: Option<String>,
    pub company: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EducationContext {
    pub degree: Option<String>,
    pub school: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SkillsContext {
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectContext {
    pub title: Option<String>,
    #[serde(deserialize_with = "list_or_csv")]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AchievementContext {
    pub title: Option<String>,
    pub organization: Option<String>,
}

/// One generation request per resume field the builder can fill.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationRequest {
    Summary(SummaryContext),
    ExperienceDescription(ExperienceContext),
    EducationDescription(EducationContext),
    SkillSuggestions(SkillsContext),
    ProjectDescription(ProjectContext),
    AchievementDescription(AchievementContext),
}

impl GenerationRequest {
    /// Validates the wire pair `(field, context)`. A `null` context is an empty one.
    pub fn from_parts(field: &str, context: Value) -> Result<Self, GenerationRequestError> {
        let context = if context.is_null() {
            Value::Object(Default::default())
        } else {
            context
        };

        let request = match field.trim() {
            "basics.summary" => Self::Summary(parse_context("basics.summary", context)?),
            "experience.description" => {
                Self::ExperienceDescription(parse_context("experience.description", context)?)
            }
            "education.description" => {
                Self::EducationDescription(parse_context("education.description", context)?)
            }
            "skills.suggestions" => {
                Self::SkillSuggestions(parse_context("skills.suggestions", context)?)
            }
            "projects.description" => {
                Self::ProjectDescription(parse_context("projects.description", context)?)
            }
            "achievements.description" => {
                Self::AchievementDescription(parse_context("achievements.description", context)?)
            }
            other => return Err(GenerationRequestError::UnknownField(other.to_string())),
        };
        Ok(request)
    }

    pub fn field(&self) -> &'static str {
        match self {
            Self::Summary(_) => "basics.summary",
            Self::ExperienceDescription(_) => "experience.description",
            Self::EducationDescription(_) => "education.description",
            Self::SkillSuggestions(_) => "skills.suggestions",
            Self::ProjectDescription(_) => "projects.description",
            Self::AchievementDescription(_) => "achievements.description",
        }
    }
}

fn parse_context<T: for<'de> Deserialize<'de>>(
    field: &'static str,
    context: Value,
) -> Result<T, GenerationRequestError> {
    serde_json::from_value(context)
        .map_err(|source| GenerationRequestError::InvalidContext { field, source })
}

/// Technologies arrive either as an array or as one comma-separated string.
fn list_or_csv<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListOrCsv {
        List(Vec<String>),
        Csv(String),
    }

    let items = match Option::<ListOrCsv>::deserialize(deserializer)? {
        Some(ListOrCsv::List(items)) => items,
        Some(ListOrCsv::Csv(text)) => text.split(',').map(str::to_string).collect(),
        None => Vec::new(),
    };

    Ok(items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_known_fields_parse_their_context() {
        let request = GenerationRequest::from_parts(
            "experience.description",
            json!({"position": "SRE", "company": "Acme", "ignored": 1}),
        )
        .unwrap();
        assert_eq!(
            request,
            GenerationRequest::ExperienceDescription(ExperienceContext {
                position: Some("SRE".to_string()),
                company: Some("Acme".to_string()),
            })
        );
        assert_eq!(request.field(), "experience.description");
    }

    #[test]
    fn test_null_context_is_empty() {
        let request = GenerationRequest::from_parts("basics.summary", Value::Null).unwrap();
        assert_eq!(request, GenerationRequest::Summary(SummaryContext::default()));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = GenerationRequest::from_parts("basics.hobbies", json!({})).unwrap_err();
        assert!(matches!(err, GenerationRequestError::UnknownField(f) if f == "basics.hobbies"));
    }

    #[test]
    fn test_malformed_context_is_rejected() {
        let err = GenerationRequest::from_parts("basics.summary", json!({"title": 42})).unwrap_err();
        assert!(matches!(
            err,
            GenerationRequestError::InvalidContext { field: "basics.summary", .. }
        ));
    }

    #[test]
    fn test_technologies_accept_array_or_csv() {
        let from_list = GenerationRequest::from_parts(
            "projects.description",
            json!({"title": "Crawler", "technologies": ["Rust", " Tokio "]}),
        )
        .unwrap();
        let from_csv = GenerationRequest::from_parts(
            "projects.description",
            json!({"title": "Crawler", "technologies": "Rust, Tokio,"}),
        )
        .unwrap();
        assert_eq!(from_list, from_csv);
    }
}
