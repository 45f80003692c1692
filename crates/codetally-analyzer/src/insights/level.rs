use std::fmt;

use serde::Serialize;

use super::Facts;

/// Skill level on the five-band scale used by the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum SkillLevel {
    Beginner,
    Developing,
    Intermediate,
    Advanced,
    Expert,
}

impl SkillLevel {
    #[must_use]
    pub fn for_total(total: u64) -> Self {
        match total {
            500.. => Self::Expert,
            300..=499 => Self::Advanced,
            150..=299 => Self::Intermediate,
            50..=149 => Self::Developing,
            _ => Self::Beginner,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Developing => "Developing",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::Expert => "Expert",
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub level: SkillLevel,
    pub message: String,
    pub total_problems: u64,
    pub unique_problems: u64,
    pub platforms: usize,
    pub accounts: usize,
}

impl Summary {
    pub(crate) fn new(facts: &Facts, level: SkillLevel) -> Self {
        let total = facts.counts.total;
        let accounts = facts.accounts;
        let account_text = if accounts > 1 {
            format!("across {accounts} accounts ")
        } else {
            String::new()
        };
        let message = format!(
            "You've solved {total} problems {account_text}on {} platform(s), with {} unique problems. You're at a {level} level!",
            facts.platforms, facts.unique
        );
        Self {
            level,
            message,
            total_problems: total,
            unique_problems: facts.unique,
            platforms: facts.platforms,
            accounts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::Shares;
    use codetally_core::DifficultyCounts;

    fn facts(total: u64, platforms: usize, accounts: usize) -> Facts {
        let counts = DifficultyCounts::new(0, 0, 0, total);
        Facts {
            counts,
            unique: total * 7 / 10,
            shares: Shares::of(&counts),
            platforms,
            accounts,
        }
    }

    #[test]
    fn level_thresholds() {
        assert_eq!(SkillLevel::for_total(0), SkillLevel::Beginner);
        assert_eq!(SkillLevel::for_total(49), SkillLevel::Beginner);
        assert_eq!(SkillLevel::for_total(50), SkillLevel::Developing);
        assert_eq!(SkillLevel::for_total(150), SkillLevel::Intermediate);
        assert_eq!(SkillLevel::for_total(299), SkillLevel::Intermediate);
        assert_eq!(SkillLevel::for_total(300), SkillLevel::Advanced);
        assert_eq!(SkillLevel::for_total(500), SkillLevel::Expert);
        assert_eq!(SkillLevel::for_total(u64::MAX), SkillLevel::Expert);
    }

    #[test]
    fn summary_message_single_account() {
        let s = Summary::new(&facts(100, 1, 1), SkillLevel::Developing);
        assert_eq!(
            s.message,
            "You've solved 100 problems on 1 platform(s), with 70 unique problems. You're at a Developing level!"
        );
    }

    #[test]
    fn summary_message_mentions_multiple_accounts() {
        let s = Summary::new(&facts(600, 2, 3), SkillLevel::Expert);
        assert_eq!(
            s.message,
            "You've solved 600 problems across 3 accounts on 2 platform(s), with 420 unique problems. You're at a Expert level!"
        );
        assert_eq!(s.accounts, 3);
    }

    #[test]
    fn level_serializes_as_title_case() {
        assert_eq!(
            serde_json::to_value(SkillLevel::Intermediate).unwrap(),
            "Intermediate"
        );
    }
}
