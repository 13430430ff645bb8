// Prompt constants for skill-gap analysis and course recommendations.
// Course lookups use llm_client::prompts::JSON_ONLY_SYSTEM.

pub const SKILL_GAP_SYSTEM: &str = "You are a career coach and technical recruiter. \
    You MUST respond with valid JSON only. \
    Do NOT use markdown code fences. \
    Do NOT include any explanation or job description.";

/// Skill-gap prompt. Replace `{resume_text}` before sending.
pub const SKILL_GAP_PROMPT_TEMPLATE: &str = r#"Take the provided resume data, identify the most relevant job title, and generate a job description based on that title. Compare the skills and experience in the resume against the generated job description.

Return a JSON object with this EXACT schema:
{
  "recommended_skills": [
    {"skill": "Kubernetes", "score_increase": 8}
  ],
  "score": 64,
  "total_possible_score": 88
}

- recommended_skills: market-trending skills that would significantly improve the candidate's score, each with the estimated score increase if the candidate learns it
- score: overall percentage reflecting how well the resume matches the job description
- total_possible_score: the estimated score if all recommended skills are learned

Resume Data:
{resume_text}"#;

/// Course prompt. Replace `{skills}` before sending.
pub const COURSES_PROMPT_TEMPLATE: &str = r#"Given the following list of skills, provide a JSON object containing a list of relevant courses for each skill. Each entry should include the course name, provider, and URL. Only include courses you are confident exist. Do not include any additional explanations or information.

List of skills: {skills}"#;
