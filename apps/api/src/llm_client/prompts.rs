// Shared prompt constants used by more than one feature module.
// Each feature that calls the LLM keeps its own prompts.rs alongside it.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt for resume writing tasks.
pub const RESUME_WRITER_SYSTEM: &str =
    "You are a professional resume writer helping to create compelling resume content.";
