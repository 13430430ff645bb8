// ATS scoring: heuristic keyword extraction, the four-component resume score,
// and AI keyword suggestions with a tokenizer fallback.

pub mod handlers;
pub mod keywords;
pub mod prompts;
pub mod scorer;
pub mod suggest;
