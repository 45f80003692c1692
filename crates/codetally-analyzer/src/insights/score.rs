//! Composite 0-100 performance score and letter grade.

use serde::Serialize;

use super::{percent, Facts};

const MAX_SCORE: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Grade {
    C,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "B-")]
    BMinus,
    B,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "A-")]
    AMinus,
    A,
    #[serde(rename = "A+")]
    APlus,
}

impl Grade {
    #[must_use]
    pub fn for_score(score: u8) -> Self {
        match score {
            90.. => Self::APlus,
            85..=89 => Self::A,
            80..=84 => Self::AMinus,
            75..=79 => Self::BPlus,
            70..=74 => Self::B,
            65..=69 => Self::BMinus,
            60..=64 => Self::CPlus,
            _ => Self::C,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub volume: u8,
    pub difficulty: u8,
    pub diversity: u8,
    pub uniqueness: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PerformanceScore {
    pub score: u8,
    pub grade: Grade,
    pub breakdown: ScoreBreakdown,
}

/// Max 30. Below 50 problems, one point per five solved, up to 10.
fn volume_points(total: u64) -> u8 {
    match total {
        500.. => 30,
        300..=499 => 25,
        150..=299 => 20,
        50..=149 => 15,
        _ => u8::try_from((total / 5).min(10)).unwrap_or(10),
    }
}

/// Max 35: hard tier (0-15) plus medium tier (10-20).
fn difficulty_points(hard_pct: f64, medium_pct: f64) -> u8 {
    let hard = if hard_pct > 25.0 {
        15
    } else if hard_pct > 15.0 {
        10
    } else if hard_pct > 5.0 {
        5
    } else {
        0
    };
    let medium = if medium_pct > 40.0 && medium_pct < 60.0 {
        20
    } else if medium_pct > 30.0 {
        15
    } else {
        10
    };
    hard + medium
}

/// Max 20, seven points per platform.
fn diversity_points(platforms: usize) -> u8 {
    u8::try_from(platforms.saturating_mul(7).min(20)).unwrap_or(20)
}

/// Max 15.
fn uniqueness_points(unique_pct: f64) -> u8 {
    if unique_pct > 85.0 {
        15
    } else if unique_pct > 70.0 {
        10
    } else {
        5
    }
}

pub(crate) fn calculate(facts: &Facts) -> PerformanceScore {
    let total = facts.counts.total;
    let breakdown = ScoreBreakdown {
        volume: volume_points(total),
        difficulty: difficulty_points(facts.shares.hard, facts.shares.medium),
        diversity: diversity_points(facts.platforms),
        uniqueness: uniqueness_points(percent(facts.unique, total)),
    };
    let sum = u64::from(breakdown.volume)
        + u64::from(breakdown.difficulty)
        + u64::from(breakdown.diversity)
        + u64::from(breakdown.uniqueness);
    let score = u8::try_from(sum.min(MAX_SCORE)).unwrap_or(100);

    PerformanceScore {
        score,
        grade: Grade::for_score(score),
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::Shares;
    use codetally_core::DifficultyCounts;

    fn facts(counts: DifficultyCounts, unique: u64, platforms: usize) -> Facts {
        Facts {
            counts,
            unique,
            shares: Shares::of(&counts),
            platforms,
            accounts: platforms,
        }
    }

    #[test]
    fn volume_bands() {
        assert_eq!(volume_points(0), 0);
        assert_eq!(volume_points(4), 0);
        assert_eq!(volume_points(7), 1);
        assert_eq!(volume_points(49), 9);
        assert_eq!(volume_points(50), 15);
        assert_eq!(volume_points(150), 20);
        assert_eq!(volume_points(300), 25);
        assert_eq!(volume_points(500), 30);
    }

    #[test]
    fn difficulty_tiers() {
        assert_eq!(difficulty_points(0.0, 0.0), 10);
        assert_eq!(difficulty_points(30.0, 50.0), 35);
        assert_eq!(difficulty_points(16.0, 65.0), 25);
        assert_eq!(difficulty_points(6.0, 40.0), 20);
        // 40 and 60 are excluded from the top medium tier
        assert_eq!(difficulty_points(0.0, 60.0), 15);
    }

    #[test]
    fn diversity_caps_at_twenty() {
        assert_eq!(diversity_points(0), 0);
        assert_eq!(diversity_points(1), 7);
        assert_eq!(diversity_points(2), 14);
        assert_eq!(diversity_points(3), 20);
        assert_eq!(diversity_points(usize::MAX), 20);
    }

    #[test]
    fn uniqueness_tiers() {
        assert_eq!(uniqueness_points(90.0), 15);
        assert_eq!(uniqueness_points(70.0), 5);
        assert_eq!(uniqueness_points(70.5), 10);
    }

    #[test]
    fn six_hundred_with_thirty_percent_hard() {
        let f = facts(DifficultyCounts::new(120, 300, 180, 600), 420, 2);
        let s = calculate(&f);
        assert_eq!(
            s.breakdown,
            ScoreBreakdown {
                volume: 30,
                difficulty: 35,
                diversity: 14,
                uniqueness: 5
            }
        );
        assert_eq!(s.score, 84);
        assert_eq!(s.grade, Grade::AMinus);
    }

    #[test]
    fn score_is_clamped_to_hundred() {
        for total in [0_u64, 1, 49, 50, 150, 300, 500, 10_000] {
            for platforms in 0..5 {
                let counts = DifficultyCounts::new(total / 4, total / 2, total / 4, total);
                let s = calculate(&facts(counts, total, platforms));
                assert!(s.score <= 100);
            }
        }
    }

    #[test]
    fn grade_is_monotone_in_score() {
        let mut previous = Grade::for_score(0);
        for score in 0..=100u8 {
            let grade = Grade::for_score(score);
            assert!(grade >= previous, "grade dropped at score {score}");
            previous = grade;
        }
        assert_eq!(Grade::for_score(100), Grade::APlus);
        assert_eq!(Grade::for_score(59), Grade::C);
    }

    #[test]
    fn grade_serializes_with_symbols() {
        assert_eq!(serde_json::to_value(Grade::APlus).unwrap(), "A+");
        assert_eq!(serde_json::to_value(Grade::BMinus).unwrap(), "B-");
        assert_eq!(serde_json::to_value(Grade::C).unwrap(), "C");
    }
}
