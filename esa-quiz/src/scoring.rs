//! Quiz score → tier resolution and representative selection

use crate::error::PipelineError;
use crate::tier::Tier;
use crate::types::EnrichedRecord;
use tracing::warn;

/// Minimum score for `Elite`
pub const ELITE_MIN_SCORE: i64 = 55;
/// Minimum score for `Aspiring`
pub const ASPIRING_MIN_SCORE: i64 = 40;
/// Minimum score for `Casual`
pub const CASUAL_MIN_SCORE: i64 = 26;

/// Map a summed quiz score onto the tier scale
pub fn resolve_tier(score: i64) -> Tier {
    if score >= ELITE_MIN_SCORE {
        Tier::Elite
    } else if score >= ASPIRING_MIN_SCORE {
        Tier::Aspiring
    } else if score >= CASUAL_MIN_SCORE {
        Tier::Casual
    } else {
        Tier::Minimalist
    }
}

/// Record chosen to represent a tier
#[derive(Debug, Clone, Copy)]
pub struct Representative<'a> {
    pub record: &'a EnrichedRecord,
    /// False when no record had the requested tier and the first record was used
    pub matched: bool,
}

/// First record with `tier`, else the first record overall
///
/// The fallback may hand a `Minimalist` user an `Elite` figure; it is logged
/// so such mismatches are visible.
pub fn select_representative(
    tier: Tier,
    results: &[EnrichedRecord],
) -> Result<Representative<'_>, PipelineError> {
    if let Some(record) = results.iter().find(|r| r.tier == tier) {
        return Ok(Representative {
            record,
            matched: true,
        });
    }

    let record = results.first().ok_or(PipelineError::NoCandidates)?;

    warn!(
        requested = %tier,
        fallback = %record.tier,
        name = %record.name,
        "No candidate in requested tier, falling back to first candidate"
    );

    Ok(Representative {
        record,
        matched: false,
    })
}
