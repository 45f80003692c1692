//! Heuristic split of the aggregated total into unique and duplicate problems.
//!
//! No cross-source problem identity is available, so the split is a fixed
//! ratio rather than a measurement.

use serde::Serialize;

/// Share of the total assumed to be distinct problems, in percent.
pub const UNIQUE_RATIO_PERCENT: u64 = 70;

/// Reported overlap, the complement of [`UNIQUE_RATIO_PERCENT`].
pub const OVERLAP_PERCENTAGE: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlapEstimate {
    pub total_problems: u64,
    pub estimated_unique_problems: u64,
    pub estimated_duplicates: u64,
    pub overlap_percentage: f64,
}

/// `estimated_unique_problems = floor(0.70 * total)`, computed in integers so
/// the floor is exact; duplicates take the remainder.
#[must_use]
pub fn estimate(total: u64) -> OverlapEstimate {
    let unique = u64::try_from(u128::from(total) * u128::from(UNIQUE_RATIO_PERCENT) / 100)
        .unwrap_or(total);
    OverlapEstimate {
        total_problems: total,
        estimated_unique_problems: unique,
        estimated_duplicates: total - unique,
        overlap_percentage: OVERLAP_PERCENTAGE,
    }
}
