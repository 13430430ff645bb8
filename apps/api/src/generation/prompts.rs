// Prompt templates for resume content generation, one per builder field.
// The system prompt lives in llm_client::prompts::RESUME_WRITER_SYSTEM.

use crate::generation::request::GenerationRequest;
use crate::models::resume::present;

/// Renders the user prompt for a request.
pub fn build_prompt(request: &GenerationRequest) -> String {
    match request {
        GenerationRequest::Summary(ctx) => format!(
            "Generate a professional summary{}.\n\
             Include key professional qualities and core competencies.\n\
             Keep it concise and impactful, around 25-30 words.\n\
             Focus on career highlights and value proposition.",
            phrase(" for a ", &ctx.title, " position"),
        ),
        GenerationRequest::ExperienceDescription(ctx) => format!(
            "Generate a detailed but concise description of about 25 words{}{}.\n\
             Focus on:\n\
             - Key responsibilities\n\
             - Achievements and impact\n\
             - Technologies or skills used\n\
             - Quantifiable results where possible\n\
             Use bullet points and action verbs.",
            phrase(" for the role of ", &ctx.position, ""),
            phrase(" at ", &ctx.company, ""),
        ),
        GenerationRequest::EducationDescription(ctx) => format!(
            "Generate a description{}{}.\n\
             Include:\n\
             - Relevant coursework\n\
             - Academic achievements\n\
             - Projects or research\n\
             - Extra-curricular activities\n\
             Keep it concise and relevant to career goals.",
            phrase(" for ", &ctx.degree, ""),
            phrase(" at ", &ctx.school, ""),
        ),
        GenerationRequest::SkillSuggestions(ctx) => format!(
            "Generate a list of relevant technical and soft skills{}.\n\
             Include:\n\
             - Technical skills specific to the role\n\
             - Industry-standard tools and technologies\n\
             - Relevant soft skills\n\
             Return only a comma-separated list of 10 skills.",
            phrase(" for a ", &ctx.title, " position"),
        ),
        GenerationRequest::ProjectDescription(ctx) => {
            let technologies = if ctx.technologies.is_empty() {
                String::new()
            } else {
                format!(" using {}", ctx.technologies.join(", "))
            };
            format!(
                "Generate a detailed but concise project description of about 25 words{}{}.",
                phrase(" for ", &ctx.title, ""),
                technologies,
            )
        }
        GenerationRequest::AchievementDescription(ctx) => format!(
            "Generate an achievement description{}{}.\n\
             Focus on:\n\
             - Specific accomplishment\n\
             - Impact and results\n\
             - Metrics where applicable\n\
             - Recognition received\n\
             Keep it concise and results-focused. Return only the description.",
            phrase(" for ", &ctx.title, ""),
            phrase(" at ", &ctx.organization, ""),
        ),
    }
}

/// Appends the user's existing text so the model can refine rather than start over.
pub fn with_current_value(prompt: String, current_value: Option<&str>) -> String {
    match current_value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(current) => format!("{prompt}\nCurrent content: {current}"),
        None => prompt,
    }
}

fn phrase(prefix: &str, value: &Option<String>, suffix: &str) -> String {
    present(value)
        .map(|v| format!("{prefix}{v}{suffix}"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::request::{AchievementContext, ProjectContext, SummaryContext};

    #[test]
    fn test_summary_mentions_title_when_given() {
        let prompt = build_prompt(&GenerationRequest::Summary(SummaryContext {
            title: Some("Staff Engineer".to_string()),
        }));
        assert!(prompt.starts_with("Generate a professional summary for a Staff Engineer position."));
    }

    #[test]
    fn test_blank_context_is_omitted() {
        let prompt = build_prompt(&GenerationRequest::Summary(SummaryContext {
            title: Some("  ".to_string()),
        }));
        assert!(prompt.starts_with("Generate a professional summary.\n"));
    }

    #[test]
    fn test_project_lists_technologies() {
        let prompt = build_prompt(&GenerationRequest::ProjectDescription(ProjectContext {
            title: Some("Crawler".to_string()),
            technologies: vec!["Rust".to_string(), "Tokio".to_string()],
        }));
        assert!(prompt.contains("for Crawler using Rust, Tokio."));
    }

    #[test]
    fn test_achievement_uses_organization() {
        let prompt = build_prompt(&GenerationRequest::AchievementDescription(AchievementContext {
            title: None,
            organization: Some("ACM".to_string()),
        }));
        assert!(prompt.contains("achievement description at ACM."));
    }

    #[test]
    fn test_current_value_is_appended() {
        let prompt = with_current_value("Base".to_string(), Some(" Led migrations "));
        assert_eq!(prompt, "Base\nCurrent content: Led migrations");
        assert_eq!(with_current_value("Base".to_string(), Some("   ")), "Base");
        assert_eq!(with_current_value("Base".to_string(), None), "Base");
    }
}
