use std::time::Duration;

use serde::Serialize;
use tracing::warn;

use crate::ats::keywords::extract_keywords;
use crate::ats::prompts::{keyword_extraction_prompt, KEYWORD_EXTRACTION_SYSTEM};
use crate::llm_client::{generate_json, AiCallError, TextGenerator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordSource {
    Ai,
    Heuristic,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordSuggestions {
    pub keywords: Vec<String>,
    pub source: KeywordSource,
}

/// Asks the model for resume keywords, falling back to the tokenizer on any failure.
/// Never fails: a missing generator, a provider error or unparsable output all yield heuristic keywords.
pub async fn suggest_keywords(
    generator: Option<&dyn TextGenerator>,
    job_description: &str,
    timeout: Duration,
) -> KeywordSuggestions {
    let Some(generator) = generator else {
        return heuristic(job_description);
    };

    match ai_keywords(generator, job_description, timeout).await {
        Ok(keywords) => KeywordSuggestions {
            keywords,
            source: KeywordSource::Ai,
        },
        Err(e) => {
            warn!(
                provider = generator.provider(),
                "AI keyword extraction failed, using heuristic: {e}"
            );
            heuristic(job_description)
        }
    }
}

async fn ai_keywords(
    generator: &dyn TextGenerator,
    job_description: &str,
    timeout: Duration,
) -> Result<Vec<String>, AiCallError> {
    let raw: Vec<String> = generate_json(
        generator,
        &keyword_extraction_prompt(job_description),
        KEYWORD_EXTRACTION_SYSTEM,
        timeout,
    )
    .await?;

    let mut keywords: Vec<String> = Vec::with_capacity(raw.len());
    for keyword in raw {
        let keyword = keyword.trim();
        if keyword.is_empty() || keywords.iter().any(|k| k.eq_ignore_ascii_case(keyword)) {
            continue;
        }
        keywords.push(keyword.to_string());
    }

    if keywords.is_empty() {
        return Err(AiCallError::EmptyContent);
    }
    Ok(keywords)
}

fn heuristic(job_description: &str) -> KeywordSuggestions {
    KeywordSuggestions {
        keywords: extract_keywords(job_description),
        source: KeywordSource::Heuristic,
    }
}
