// AI candidate ranking: per-candidate scoring with a skills-overlap fallback,
// run in rate-limited batches.

pub mod batch;
pub mod prompts;
pub mod scoring;
