/// LLM client: the single point of entry for all generative-model calls.
///
/// No other module may call a provider API directly. Handlers receive a
/// `TextGenerator` trait object constructed once at startup and carried in `AppState`,
/// so tests can substitute an in-memory double.
///
/// Every call returns `Result<_, AiCallError>`; the caller decides between the
/// deterministic fallback and surfacing the error.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

pub mod gemini;
pub mod openai;
pub mod prompts;

pub use gemini::GeminiClient;
pub use openai::OpenAiClient;

const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum AiCallError {
    #[error("{0} API key is not configured")]
    NotConfigured(&'static str),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("AI call timed out after {0:?}")]
    Timeout(Duration),

    #[error("AI returned empty content")]
    EmptyContent,

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A generative text endpoint: prompt in, text out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Short provider label used in logs ("openai", "gemini").
    fn provider(&self) -> &'static str;

    /// Sends one prompt and returns the raw text of the first completion.
    async fn complete(&self, prompt: &str, system: &str) -> Result<String, AiCallError>;
}

/// Calls the generator under a bounded timeout and returns trimmed, non-empty text.
/// Timer expiry is reported as `AiCallError::Timeout`.
pub async fn generate_text(
    generator: &dyn TextGenerator,
    prompt: &str,
    system: &str,
    timeout: Duration,
) -> Result<String, AiCallError> {
    let text = tokio::time::timeout(timeout, generator.complete(prompt, system))
        .await
        .map_err(|_| AiCallError::Timeout(timeout))??;

    let text = text.trim();
    if text.is_empty() {
        return Err(AiCallError::EmptyContent);
    }
    Ok(text.to_string())
}

/// Convenience wrapper that deserializes the generated text as JSON.
/// The prompt must instruct the model to return valid JSON.
pub async fn generate_json<T: DeserializeOwned>(
    generator: &dyn TextGenerator,
    prompt: &str,
    system: &str,
    timeout: Duration,
) -> Result<T, AiCallError> {
    let text = generate_text(generator, prompt, system, timeout).await?;

    // Strip markdown code fences if the model wraps JSON in them
    let text = strip_json_fences(&text);

    serde_json::from_str(text).map_err(AiCallError::Parse)
}

/// Sends a request built by `build`, retrying on 429 and 5xx with exponential backoff.
/// Other non-success statuses fail immediately with the provider's error body.
/// A 429 on the last attempt is reported as `AiCallError::RateLimited`.
pub(crate) async fn send_with_retry<F>(provider: &str, build: F) -> Result<Response, AiCallError>
where
    F: Fn() -> RequestBuilder,
{
    let mut attempt = 0;

    loop {
        let error = match build().send().await {
            Err(e) => AiCallError::Http(e),
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    return Ok(response);
                }

                let body = response.text().await.unwrap_or_default();
                if status.as_u16() != 429 && !status.is_server_error() {
                    return Err(AiCallError::Api {
                        status: status.as_u16(),
                        message: extract_error_message(&body),
                    });
                }

                warn!("{provider} API returned {}: {}", status, body);
                retryable_error(status.as_u16(), body, attempt + 1 == MAX_RETRIES)
            }
        };

        attempt += 1;
        if attempt >= MAX_RETRIES {
            return Err(error);
        }

        // Exponential backoff: 1s, 2s
        let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
        warn!(
            "{provider} call attempt {} failed, retrying after {}ms...",
            attempt,
            delay.as_millis()
        );
        tokio::time::sleep(delay).await;
    }
}

/// Error for a 429 or 5xx response. Rate limiting that outlasts every retry gets its own variant.
fn retryable_error(status: u16, body: String, last_attempt: bool) -> AiCallError {
    if status == 429 && last_attempt {
        AiCallError::RateLimited {
            retries: MAX_RETRIES,
        }
    } else {
        AiCallError::Api {
            status,
            message: extract_error_message(&body),
        }
    }
}

/// Both providers report failures as `{"error": {"message": ...}}`.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Replays a fixed sequence of responses; the last one repeats once the script runs out.
    pub struct ScriptedGenerator {
        responses: Mutex<Vec<Result<String, String>>>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        pub fn new(responses: Vec<Result<&str, &str>>) -> Self {
            Self {
                responses: Mutex::new(
                    responses
                        .into_iter()
                        .map(|r| r.map(str::to_string).map_err(str::to_string))
                        .collect(),
                ),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn ok(text: &str) -> Self {
            Self::new(vec![Ok(text)])
        }

        pub fn failing(message: &str) -> Self {
            Self::new(vec![Err(message)])
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        fn provider(&self) -> &'static str {
            "scripted"
        }

        async fn complete(&self, prompt: &str, _system: &str) -> Result<String, AiCallError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            let mut responses = self.responses.lock().unwrap();
            let next = if responses.len() > 1 {
                responses.remove(0)
            } else {
                responses[0].clone()
            };
            next.map_err(|message| AiCallError::Api {
                status: 500,
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::ScriptedGenerator;
    use super::*;

    struct SlowGenerator;

    #[async_trait]
    impl TextGenerator for SlowGenerator {
        fn provider(&self) -> &'static str {
            "slow"
        }

        async fn complete(&self, _prompt: &str, _system: &str) -> Result<String, AiCallError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("too late".to_string())
        }
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_extract_error_message_prefers_provider_message() {
        let body = r#"{"error": {"message": "Incorrect API key provided", "code": 401}}"#;
        assert_eq!(extract_error_message(body), "Incorrect API key provided");
        assert_eq!(extract_error_message("gateway down"), "gateway down");
    }

    #[test]
    fn test_final_429_is_rate_limited() {
        let error = retryable_error(429, "slow down".to_string(), true);
        assert!(matches!(error, AiCallError::RateLimited { retries: MAX_RETRIES }));
        assert_eq!(error.to_string(), "Rate limited after 3 retries");
    }

    #[test]
    fn test_retryable_errors_before_last_attempt_keep_status() {
        let error = retryable_error(429, "slow down".to_string(), false);
        assert!(matches!(error, AiCallError::Api { status: 429, .. }));

        let body = r#"{"error": {"message": "overloaded"}}"#.to_string();
        let error = retryable_error(503, body, true);
        assert!(matches!(error, AiCallError::Api { status: 503, ref message } if message == "overloaded"));
    }

    #[tokio::test]
    async fn test_generate_text_trims_output() {
        let generator = ScriptedGenerator::ok("  A concise summary.\n");
        let text = generate_text(&generator, "p", "s", Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(text, "A concise summary.");
    }

    #[tokio::test]
    async fn test_generate_text_rejects_blank_output() {
        let generator = ScriptedGenerator::ok("   ");
        let result = generate_text(&generator, "p", "s", Duration::from_secs(5)).await;
        assert!(matches!(result, Err(AiCallError::EmptyContent)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_generate_text_times_out() {
        let result = generate_text(&SlowGenerator, "p", "s", Duration::from_secs(5)).await;
        assert!(matches!(result, Err(AiCallError::Timeout(d)) if d == Duration::from_secs(5)));
    }

    #[tokio::test]
    async fn test_generate_json_strips_fences() {
        let generator = ScriptedGenerator::ok("```json\n{\"score\": 72}\n```");
        let value: serde_json::Value =
            generate_json(&generator, "p", "s", Duration::from_secs(5))
                .await
                .unwrap();
        assert_eq!(value["score"], 72);
    }

    #[tokio::test]
    async fn test_generate_json_reports_parse_failure() {
        let generator = ScriptedGenerator::ok("Sure! Here is your analysis.");
        let result: Result<serde_json::Value, _> =
            generate_json(&generator, "p", "s", Duration::from_secs(5)).await;
        assert!(matches!(result, Err(AiCallError::Parse(_))));
    }
}
