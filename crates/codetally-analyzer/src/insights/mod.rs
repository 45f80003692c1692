//! Rule-based insight engine.
//!
//! [`derive_insights`] is a pure function of the aggregated stats and the
//! per-account results. Every rule is a fixed threshold table; percentages
//! over a zero total evaluate to 0.

mod comparison;
mod findings;
mod guidance;
mod level;
mod progression;
mod score;

use std::collections::BTreeMap;

use codetally_core::{DifficultyCounts, SourceResult};
use serde::Serialize;

use crate::error::InsightError;
use crate::report::OverallStats;

pub use comparison::{ComparisonEntry, PlatformComparison};
pub use findings::{Impact, Priority, Recommendation, Strength, Weakness};
pub use guidance::NextStep;
pub use level::{SkillLevel, Summary};
pub use progression::{
    BucketShare, DifficultyProgression, Distribution, DistributionLevel, IdealDistribution,
};
pub use score::{Grade, PerformanceScore, ScoreBreakdown};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightBundle {
    pub summary: Summary,
    pub strengths: Vec<Strength>,
    pub weaknesses: Vec<Weakness>,
    pub recommendations: Vec<Recommendation>,
    pub platform_comparison: PlatformComparison,
    pub difficulty_progression: DifficultyProgression,
    pub performance_score: PerformanceScore,
    pub next_steps: Vec<NextStep>,
    pub motivational_message: &'static str,
}

/// `part / total * 100`, or 0 when `total` is 0.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Difficulty shares of one set of counts, in percent of `total`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Shares {
    pub easy: f64,
    pub medium: f64,
    pub hard: f64,
}

impl Shares {
    pub fn of(counts: &DifficultyCounts) -> Self {
        Self {
            easy: percent(counts.easy, counts.total),
            medium: percent(counts.medium, counts.total),
            hard: percent(counts.hard, counts.total),
        }
    }
}

/// Everything the individual rules read, computed once.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Facts {
    pub counts: DifficultyCounts,
    pub unique: u64,
    pub shares: Shares,
    pub platforms: usize,
    pub accounts: usize,
}

fn validate(
    overall: &OverallStats,
    platforms: &BTreeMap<String, SourceResult>,
) -> Result<(), InsightError> {
    let stats = &overall.stats;
    if stats.unique > stats.total {
        return Err(InsightError::UniqueExceedsTotal {
            unique: stats.unique,
            total: stats.total,
        });
    }

    let summed = platforms
        .values()
        .filter_map(SourceResult::counts)
        .fold(DifficultyCounts::default(), |acc, c| acc.merge(*c));
    let checks = [
        ("easy", stats.easy, summed.easy),
        ("medium", stats.medium, summed.medium),
        ("hard", stats.hard, summed.hard),
        ("total", stats.total, summed.total),
    ];
    for (field, overall, accounts) in checks {
        if overall != accounts {
            return Err(InsightError::InconsistentBuckets {
                field,
                overall,
                accounts,
            });
        }
    }
    Ok(())
}

/// Derives the full insight bundle.
///
/// # Errors
///
/// Returns [`InsightError`] when `overall` is not the aggregate of the
/// successful entries in `platforms`, or claims more unique problems than
/// total problems.
pub fn derive_insights(
    overall: &OverallStats,
    platforms: &BTreeMap<String, SourceResult>,
) -> Result<InsightBundle, InsightError> {
    validate(overall, platforms)?;

    let counts = overall.stats.difficulty();
    let facts = Facts {
        counts,
        unique: overall.stats.unique,
        shares: Shares::of(&counts),
        platforms: overall.platforms_analyzed,
        accounts: overall.total_accounts,
    };
    let level = SkillLevel::for_total(counts.total);

    Ok(InsightBundle {
        summary: Summary::new(&facts, level),
        strengths: findings::strengths(&facts),
        weaknesses: findings::weaknesses(&facts),
        recommendations: findings::recommendations(&facts),
        platform_comparison: comparison::compare(platforms),
        difficulty_progression: progression::analyze(&counts),
        performance_score: score::calculate(&facts),
        next_steps: guidance::next_steps(counts.total),
        motivational_message: guidance::motivational_message(counts.total),
    })
}
