//! Scoring Orchestrator: ranks candidates against a job description.
//!
//! Flow per batch: build prompt → complete → parse, walking the strategy list
//! until one response parses. A batch where every strategy fails contributes
//! nothing. Batches run strictly in order, one model call at a time.
//!
//! After the last batch: drop entries without a numeric score, sort by score
//! (descending, stable), keep the top N.

use tracing::{debug, info, warn};

use crate::config::{Config, DEFAULT_BATCH_SIZE, DEFAULT_TOP_N};
use crate::errors::RankerError;
use crate::llm_client::CompletionClient;
use crate::models::candidate::{CandidateRecord, ScoredCandidate};
use crate::ranking::batcher::batch_candidates;
use crate::ranking::prompt_builder::PromptStyle;
use crate::ranking::response_parser::{parse_response, ScoreEntry};

#[derive(Debug, Clone)]
pub struct RankingOptions {
    pub batch_size: usize,
    pub top_n: usize,
    /// Tried in order for each batch until one yields a parseable response.
    pub strategies: Vec<PromptStyle>,
}

impl Default for RankingOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            top_n: DEFAULT_TOP_N,
            strategies: PromptStyle::DEFAULT_ORDER.to_vec(),
        }
    }
}

impl From<&Config> for RankingOptions {
    fn from(config: &Config) -> Self {
        Self {
            batch_size: config.batch_size,
            top_n: config.top_n,
            ..Self::default()
        }
    }
}

/// What happened to one batch.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    Parsed {
        style: PromptStyle,
        entries: Vec<ScoreEntry>,
    },
    Failed,
}

/// Scores every candidate and returns the top `options.top_n` by score.
pub async fn rank_candidates(
    client: &dyn CompletionClient,
    job_description: &str,
    candidates: &[CandidateRecord],
    options: &RankingOptions,
) -> Result<Vec<ScoredCandidate>, RankerError> {
    let batches = batch_candidates(candidates, options.batch_size)?;
    info!("Total batches to process: {}", batches.len());

    let mut accumulated: Vec<ScoreEntry> = Vec::new();
    let mut failed_batches = 0usize;

    for (idx, batch) in batches.iter().enumerate() {
        info!(
            "Processing batch {}/{} with {} candidates",
            idx + 1,
            batches.len(),
            batch.len()
        );

        match score_batch(client, job_description, batch, &options.strategies).await {
            BatchOutcome::Parsed { style, entries } => {
                info!(
                    "Batch {} scored {} candidates with the {} prompt",
                    idx + 1,
                    entries.len(),
                    style
                );
                accumulated.extend(entries);
            }
            BatchOutcome::Failed => {
                failed_batches += 1;
                warn!(
                    "Batch {} produced no parseable response; skipping its {} candidates",
                    idx + 1,
                    batch.len()
                );
            }
        }
    }

    let ranked = rank_entries(accumulated, options.top_n);
    info!(
        "Ranking complete: {} results returned, {} of {} batches failed",
        ranked.len(),
        failed_batches,
        batches.len()
    );
    Ok(ranked)
}

/// Runs one batch through the strategy list.
pub async fn score_batch(
    client: &dyn CompletionClient,
    job_description: &str,
    batch: &[CandidateRecord],
    strategies: &[PromptStyle],
) -> BatchOutcome {
    for (attempt, &style) in strategies.iter().enumerate() {
        if attempt > 0 {
            info!("Previous response failed to parse. Retrying with the {style} prompt");
        }

        let prompt = style.build(job_description, batch);
        debug!("System message ({style}):\n{}", prompt.system);
        debug!("User prompt ({style}):\n{}", prompt.user);

        let response = client.complete(&prompt.system, &prompt.user).await;
        let entries = parse_response(&response);
        if !entries.is_empty() {
            return BatchOutcome::Parsed { style, entries };
        }
    }
    BatchOutcome::Failed
}

/// Drops entries lacking a numeric score, sorts descending, keeps `top_n`.
pub fn rank_entries(entries: Vec<ScoreEntry>, top_n: usize) -> Vec<ScoredCandidate> {
    let total = entries.len();
    let mut scored: Vec<ScoredCandidate> = entries
        .iter()
        .filter_map(ScoredCandidate::from_entry)
        .collect();

    if scored.len() < total {
        debug!(
            "Dropped {} entries without a numeric score",
            total - scored.len()
        );
    }

    scored.sort_by(|a, b| b.score_value().total_cmp(&a.score_value()));
    scored.truncate(top_n);
    scored
}
