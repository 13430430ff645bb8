//! Resume content generation.
//!
//! Unlike scoring, generation has no deterministic fallback: any provider failure is
//! returned to the caller, and an empty completion counts as a failure.

use std::time::Duration;

use serde::Serialize;
use tracing::info;

use crate::generation::prompts::{build_prompt, with_current_value};
use crate::generation::request::GenerationRequest;
use crate::llm_client::prompts::RESUME_WRITER_SYSTEM;
use crate::llm_client::{generate_text, AiCallError, TextGenerator};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedContent {
    pub content: String,
    /// Individual skills for `skills.suggestions`; empty for every other field.
    pub suggestions: Vec<String>,
}

pub async fn generate_content(
    generator: &dyn TextGenerator,
    request: &GenerationRequest,
    current_value: Option<&str>,
    timeout: Duration,
) -> Result<GeneratedContent, AiCallError> {
    let prompt = with_current_value(build_prompt(request), current_value);

    info!(
        field = request.field(),
        provider = generator.provider(),
        "Generating resume content"
    );
    let content = generate_text(generator, &prompt, RESUME_WRITER_SYSTEM, timeout).await?;
    info!(field = request.field(), "Generated {} characters", content.len());

    let suggestions = match request {
        GenerationRequest::SkillSuggestions(_) => split_skill_list(&content),
        _ => Vec::new(),
    };

    Ok(GeneratedContent {
        content,
        suggestions,
    })
}

/// Splits a comma- or line-separated skill list, dropping list markers and numbering.
fn split_skill_list(text: &str) -> Vec<String> {
    text.split([',', '\n'])
        .map(|item| {
            let item = item
                .trim()
                .trim_start_matches(|c: char| c == '-' || c == '*' || c == '•');
            strip_numbering(item.trim())
                .trim()
                .trim_end_matches('.')
                .to_string()
        })
        .filter(|item| !item.is_empty())
        .collect()
}

/// "1. Rust" and "2) Go" lose their numbering; "3D modeling" and ".NET" are left alone.
fn strip_numbering(item: &str) -> &str {
    let rest = item.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() < item.len() {
        if let Some(stripped) = rest.strip_prefix(['.', ')']) {
            return stripped;
        }
    }
    item
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::request::{SkillsContext, SummaryContext};
    use crate::llm_client::testing::ScriptedGenerator;

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn test_summary_returns_trimmed_content() {
        let generator = ScriptedGenerator::ok("\n Results-driven engineer. \n");
        let request = GenerationRequest::Summary(SummaryContext::default());

        let generated = generate_content(&generator, &request, Some("Old summary"), TIMEOUT)
            .await
            .unwrap();

        assert_eq!(generated.content, "Results-driven engineer.");
        assert!(generated.suggestions.is_empty());
        let prompts = generator.prompts.lock().unwrap();
        assert!(prompts[0].ends_with("Current content: Old summary"));
    }

    #[tokio::test]
    async fn test_skill_suggestions_are_split() {
        let generator = ScriptedGenerator::ok("Rust, Tokio,  PostgreSQL ,\n- Communication.");
        let request = GenerationRequest::SkillSuggestions(SkillsContext {
            title: Some("Backend Engineer".to_string()),
        });

        let generated = generate_content(&generator, &request, None, TIMEOUT)
            .await
            .unwrap();

        assert_eq!(
            generated.suggestions,
            vec!["Rust", "Tokio", "PostgreSQL", "Communication"]
        );
    }

    #[tokio::test]
    async fn test_provider_failure_is_an_error_not_empty_content() {
        let generator = ScriptedGenerator::failing("invalid api key");
        let request = GenerationRequest::Summary(SummaryContext::default());

        let result = generate_content(&generator, &request, None, TIMEOUT).await;
        assert!(matches!(result, Err(AiCallError::Api { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_blank_completion_is_an_error() {
        let generator = ScriptedGenerator::ok("  ");
        let request = GenerationRequest::Summary(SummaryContext::default());

        let result = generate_content(&generator, &request, None, TIMEOUT).await;
        assert!(matches!(result, Err(AiCallError::EmptyContent)));
    }

    #[test]
    fn test_split_skill_list_handles_numbering() {
        assert_eq!(
            split_skill_list("1. Rust\n2) Go\n\n* Kubernetes"),
            vec!["Rust", "Go", "Kubernetes"]
        );
        assert_eq!(split_skill_list(".NET, 3D modeling"), vec![".NET", "3D modeling"]);
    }
}
