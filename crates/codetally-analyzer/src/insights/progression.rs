use codetally_core::DifficultyCounts;
use serde::Serialize;

use super::Shares;

/// Level used only for picking the ideal distribution. It has four bands
/// and is independent of [`super::SkillLevel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl DistributionLevel {
    #[must_use]
    pub fn for_total(total: u64) -> Self {
        match total {
            300.. => Self::Expert,
            150..=299 => Self::Advanced,
            50..=149 => Self::Intermediate,
            _ => Self::Beginner,
        }
    }

    /// Target easy/medium/hard split in percent.
    #[must_use]
    pub fn ideal(self) -> IdealDistribution {
        let (easy, medium, hard) = match self {
            Self::Beginner => (60, 30, 10),
            Self::Intermediate => (40, 45, 15),
            Self::Advanced => (25, 50, 25),
            Self::Expert => (15, 50, 35),
        };
        IdealDistribution { easy, medium, hard }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IdealDistribution {
    pub easy: u8,
    pub medium: u8,
    pub hard: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketShare {
    pub count: u64,
    /// One decimal place.
    pub percentage: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Distribution {
    pub easy: BucketShare,
    pub medium: BucketShare,
    pub hard: BucketShare,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DifficultyProgression {
    pub current: Distribution,
    pub ideal: IdealDistribution,
    pub level: DistributionLevel,
}

pub(crate) fn analyze(counts: &DifficultyCounts) -> DifficultyProgression {
    let shares = Shares::of(counts);
    let share = |count: u64, pct: f64| BucketShare {
        count,
        percentage: format!("{pct:.1}"),
    };
    let level = DistributionLevel::for_total(counts.total);

    DifficultyProgression {
        current: Distribution {
            easy: share(counts.easy, shares.easy),
            medium: share(counts.medium, shares.medium),
            hard: share(counts.hard, shares.hard),
        },
        ideal: level.ideal(),
        level,
    }
}
