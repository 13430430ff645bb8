// Skill-craft: skill-gap scoring of an uploaded PDF resume and course lookups.
// Backed by the scoring provider; there is no deterministic fallback.

pub mod analysis;
pub mod handlers;
pub mod pdf;
pub mod prompts;
