//! The analysis result returned to callers and stored in history.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use codetally_core::{DifficultyCounts, SourceResult};
use serde::Serialize;

use crate::insights::InsightBundle;
use crate::overlap::OverlapEstimate;

/// Aggregated counts over successful accounts plus the global unique estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OverallCounts {
    pub easy: u64,
    pub medium: u64,
    pub hard: u64,
    pub total: u64,
    pub unique: u64,
}

impl OverallCounts {
    #[must_use]
    pub fn from_sum(sum: DifficultyCounts, unique: u64) -> Self {
        Self {
            easy: sum.easy,
            medium: sum.medium,
            hard: sum.hard,
            total: sum.total,
            unique,
        }
    }

    #[must_use]
    pub fn difficulty(&self) -> DifficultyCounts {
        DifficultyCounts::new(self.easy, self.medium, self.hard, self.total)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    pub stats: OverallCounts,
    pub unique_problems: u64,
    pub duplicates: u64,
    /// Distinct sources with at least one requested account.
    pub platforms_analyzed: usize,
    /// Accounts requested, successes and failures alike.
    pub total_accounts: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Account key to per-account result.
    pub platforms: BTreeMap<String, SourceResult>,
    pub overall: OverallStats,
    pub duplicate_analysis: OverlapEstimate,
    /// `None` (serialized as `null`) when insight derivation failed.
    pub ai_insights: Option<InsightBundle>,
    pub timestamp: DateTime<Utc>,
}

impl AnalysisReport {
    /// Number of accounts whose fetch succeeded.
    #[must_use]
    pub fn successful_accounts(&self) -> usize {
        self.platforms.values().filter(|r| r.is_success()).count()
    }
}
