//! Batched AI ranking of candidates.
//!
//! Candidates are scored in fixed-size batches. Batches run one after another with a pause
//! between them; members of a batch run concurrently. This caps outbound calls at the batch
//! size. A failed call only costs that candidate its AI score: it gets the skills-overlap
//! fallback and the rest of the batch is unaffected.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::models::user::CandidateProfile;
use crate::ranking::scoring::{fallback_scoring, score_candidate, AiScoring, JobRequirements};

#[derive(Debug, Clone, Copy)]
pub struct BatchPolicy {
    pub batch_size: usize,
    pub delay: Duration,
    /// Per-call timeout. Expiry counts as a failed call.
    pub timeout: Duration,
}

impl BatchPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            batch_size: config.rank_batch_size.max(1),
            delay: config.rank_batch_delay,
            timeout: config.ai_timeout,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCandidate {
    #[serde(flatten)]
    pub candidate: CandidateProfile,
    pub ai_scoring: AiScoring,
}

/// Scores every candidate and returns them ordered by `overallMatch`, best first.
/// Ties keep their input order. Without a generator every candidate gets the fallback.
pub async fn rank_candidates(
    generator: Option<Arc<dyn TextGenerator>>,
    candidates: Vec<CandidateProfile>,
    requirements: Arc<JobRequirements>,
    policy: BatchPolicy,
) -> Vec<RankedCandidate> {
    let Some(generator) = generator else {
        warn!(
            "Scoring provider not configured, ranking {} candidates by skills overlap",
            candidates.len()
        );
        let mut ranked: Vec<RankedCandidate> = candidates
            .into_iter()
            .map(|candidate| RankedCandidate {
                ai_scoring: fallback_scoring(&candidate, &requirements),
                candidate,
            })
            .collect();
        sort_by_overall_match(&mut ranked);
        return ranked;
    };

    let batch_size = policy.batch_size.max(1);
    let batch_count = candidates.len().div_ceil(batch_size);
    let mut ranked = Vec::with_capacity(candidates.len());

    for (index, batch) in candidates.chunks(batch_size).enumerate() {
        if index > 0 {
            tokio::time::sleep(policy.delay).await;
        }
        info!(
            "Scoring batch {}/{} ({} candidates)",
            index + 1,
            batch_count,
            batch.len()
        );

        let scores = score_batch(&generator, batch, &requirements, policy.timeout).await;
        ranked.extend(
            batch
                .iter()
                .cloned()
                .zip(scores)
                .map(|(candidate, ai_scoring)| RankedCandidate {
                    candidate,
                    ai_scoring,
                }),
        );
    }

    sort_by_overall_match(&mut ranked);
    ranked
}

/// Scores one batch concurrently. The output is aligned with `batch`.
async fn score_batch(
    generator: &Arc<dyn TextGenerator>,
    batch: &[CandidateProfile],
    requirements: &Arc<JobRequirements>,
    timeout: Duration,
) -> Vec<AiScoring> {
    let mut tasks = JoinSet::new();
    for (slot, candidate) in batch.iter().enumerate() {
        let generator = Arc::clone(generator);
        let requirements = Arc::clone(requirements);
        let candidate = candidate.clone();
        tasks.spawn(async move {
            let result =
                score_candidate(Some(generator.as_ref()), &candidate, &requirements, timeout).await;
            (slot, result)
        });
    }

    let mut scores: Vec<Option<AiScoring>> = vec![None; batch.len()];
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((slot, Ok(scoring))) => scores[slot] = Some(scoring),
            Ok((slot, Err(e))) => {
                warn!(
                    candidate_id = %batch[slot].id,
                    "AI scoring failed, using fallback: {e}"
                );
            }
            // A panicked task leaves its slot empty and is filled with the fallback below.
            Err(e) => warn!("AI scoring task failed: {e}"),
        }
    }

    scores
        .into_iter()
        .zip(batch)
        .map(|(scoring, candidate)| {
            scoring.unwrap_or_else(|| fallback_scoring(candidate, requirements))
        })
        .collect()
}

fn sort_by_overall_match(ranked: &mut [RankedCandidate]) {
    ranked.sort_by(|a, b| b.ai_scoring.overall_match.cmp(&a.ai_scoring.overall_match));
}
