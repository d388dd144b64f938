//! Celebrity aggregation pipeline
//!
//! Candidate discovery → bounded concurrent enrichment → tier grouping.
//!
//! # Error Handling
//! - Discovery failure aborts the run with [`PipelineError::SourceUnavailable`]
//! - Enrichment never fails; degraded candidates are still returned
//!
//! # Ordering
//! Records are grouped `Elite, Aspiring, Casual, Minimalist`. Within a group
//! they keep enrichment completion order, which varies between runs.

use crate::enricher::Enricher;
use crate::error::PipelineError;
use crate::tier::Tier;
use crate::types::{CandidateSource, EnrichedRecord};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// Orchestrates discovery and enrichment
pub struct Aggregator {
    candidates: Arc<dyn CandidateSource>,
    enricher: Enricher,
    max_candidates: usize,
    max_concurrency: usize,
}

impl Aggregator {
    pub fn new(
        candidates: Arc<dyn CandidateSource>,
        enricher: Enricher,
        max_candidates: usize,
        max_concurrency: usize,
    ) -> Self {
        Self {
            candidates,
            enricher,
            max_candidates: max_candidates.max(1),
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// Requested limit clamped to `1..=max_candidates`
    pub fn effective_limit(&self, limit: usize) -> usize {
        limit.clamp(1, self.max_candidates)
    }

    /// Discover, enrich and tier-order up to `limit` figures
    pub async fn aggregate(&self, limit: usize) -> Result<Vec<EnrichedRecord>, PipelineError> {
        let limit = self.effective_limit(limit);
        let started = Instant::now();

        let mut candidates = self.candidates.discover(limit).await.map_err(|e| {
            error!(
                source = self.candidates.name(),
                error = %e,
                "Candidate discovery failed"
            );
            PipelineError::SourceUnavailable(e.to_string())
        })?;
        candidates.truncate(limit);

        debug!(
            candidates = candidates.len(),
            max_concurrency = self.max_concurrency,
            "Enriching candidates"
        );

        let enriched: Vec<EnrichedRecord> = stream::iter(candidates)
            .map(|candidate| self.enricher.enrich(candidate))
            .buffer_unordered(self.max_concurrency)
            .collect()
            .await;

        let degraded = enriched.iter().filter(|r| r.is_degraded()).count();
        let ordered = group_by_tier(enriched);
        let [elite, aspiring, casual, minimalist] = tier_counts(&ordered);

        info!(
            total = ordered.len(),
            elite,
            aspiring,
            casual,
            minimalist,
            degraded,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Aggregation complete"
        );

        Ok(ordered)
    }
}

/// Stable grouping by tier priority
pub fn group_by_tier(records: Vec<EnrichedRecord>) -> Vec<EnrichedRecord> {
    let mut buckets: [Vec<EnrichedRecord>; 4] = Default::default();
    for record in records {
        buckets[record.tier.priority_index()].push(record);
    }
    buckets.into_iter().flatten().collect()
}

/// Record count per tier, in [`Tier::PRIORITY`] order
pub fn tier_counts(records: &[EnrichedRecord]) -> [usize; 4] {
    let mut counts = [0usize; 4];
    for record in records {
        counts[record.tier.priority_index()] += 1;
    }
    counts
}

/// True if no record is preceded by a lower-priority one
pub fn is_tier_ordered(records: &[EnrichedRecord]) -> bool {
    records
        .windows(2)
        .all(|pair| pair[0].tier.priority_index() <= pair[1].tier.priority_index())
}

/// Tiers present, highest first
pub fn tiers_present(records: &[EnrichedRecord]) -> Vec<Tier> {
    let counts = tier_counts(records);
    Tier::PRIORITY
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(tier, _)| *tier)
        .collect()
}
