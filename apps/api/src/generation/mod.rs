// Resume content generation: typed per-field requests, prompt templates
// and the OpenAI-backed generator. Failures surface as errors, never as empty content.

pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod request;
