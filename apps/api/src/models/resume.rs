use serde::{Deserialize, Serialize};

/// Resume content as produced by the builder UI.
/// Every field is optional on the wire; absent fields deserialize to empty values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeData {
    pub basics: Basics,
    pub experience: Vec<ExperienceItem>,
    pub education: Vec<EducationItem>,
    pub skills: Vec<String>,
    pub projects: Vec<ProjectItem>,
    pub achievements: Vec<AchievementItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Basics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExperienceItem {
    pub company: Option<String>,
    pub position: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub current: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationItem {
    pub school: Option<String>,
    pub degree: Option<String>,
    pub field: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub current: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectItem {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub url: Option<String>,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AchievementItem {
    pub title: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
}

/// Returns the value only if it holds something other than whitespace.
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_resume_deserializes_with_defaults() {
        let resume: ResumeData =
            serde_json::from_str(r#"{"basics": {"email": "a@b.com"}}"#).unwrap();
        assert_eq!(resume.basics.email.as_deref(), Some("a@b.com"));
        assert!(resume.basics.phone.is_none());
        assert!(resume.experience.is_empty());
        assert!(resume.skills.is_empty());
    }

    #[test]
    fn test_camel_case_dates() {
        let json = r#"{"experience": [{"company": "Acme", "startDate": "2019-04", "current": true}]}"#;
        let resume: ResumeData = serde_json::from_str(json).unwrap();
        assert_eq!(resume.experience[0].start_date.as_deref(), Some("2019-04"));
        assert!(resume.experience[0].current);
    }

    #[test]
    fn test_present_ignores_blank_strings() {
        assert_eq!(present(&Some("  Berlin ".to_string())), Some("Berlin"));
        assert_eq!(present(&Some("   ".to_string())), None);
        assert_eq!(present(&None), None);
    }
}
