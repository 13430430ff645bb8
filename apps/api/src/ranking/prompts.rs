// Prompt constants for AI candidate scoring.

/// System prompt for candidate scoring: enforces JSON-only output.
pub const CANDIDATE_SCORING_SYSTEM: &str =
    "You are an expert AI recruiter. \
    Analyze the candidate's profile against the job requirements and score the fit. \
    You MUST respond with valid JSON only. \
    Do NOT use markdown code fences. \
    Do NOT include explanations outside the JSON object.";

/// Scoring instructions and output schema; the job and candidate sections follow.
pub const CANDIDATE_SCORING_INSTRUCTIONS: &str = r#"Provide a detailed scoring analysis of this candidate.

Return a JSON object with this EXACT schema (all scores are integers from 0 to 100):
{
  "educationScore": 80,
  "experienceScore": 70,
  "skillsScore": 90,
  "projectScore": 60,
  "overallMatch": 78,
  "keyStrengths": ["..."],
  "areasForImprovement": ["..."],
  "recommendation": "One or two sentences."
}"#;

/// Both sections are inserted verbatim, so placeholder-like text in either is left alone.
pub fn candidate_scoring_prompt(job_requirements: &str, candidate: &str) -> String {
    format!(
        "{CANDIDATE_SCORING_INSTRUCTIONS}\n\nJob Requirements:\n{job_requirements}\n\nCandidate Profile:\n{candidate}"
    )
}
