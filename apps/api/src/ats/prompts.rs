// Prompt constants for AI keyword extraction.

/// System prompt for keyword extraction: JSON array output only.
pub const KEYWORD_EXTRACTION_SYSTEM: &str =
    "You are an expert at analyzing job descriptions and identifying key requirements. \
    You MUST respond with a JSON array of strings only. \
    Do NOT use markdown code fences. \
    Do NOT include explanations.";

/// Keyword extraction prompt. Replace `{job_description}` before sending.
pub const KEYWORD_EXTRACTION_PROMPT_TEMPLATE: &str = r#"Extract the most important keywords and skills from this job description that should be included in a resume. Focus on:
1. Technical skills
2. Soft skills
3. Industry-specific terminology
4. Required qualifications

Return a JSON array of short keyword strings, most important first, for example:
["Rust", "PostgreSQL", "distributed systems", "mentoring"]

Job Description:
{job_description}"#;

pub fn keyword_extraction_prompt(job_description: &str) -> String {
    KEYWORD_EXTRACTION_PROMPT_TEMPLATE.replace("{job_description}", job_description)
}
