//! Strengths, weaknesses, and recommendations.
//!
//! Each rule fires independently and appends in table order; the first
//! recommendation pair is the only mutually exclusive one.

use serde::Serialize;

use super::Facts;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Strength {
    pub area: &'static str,
    pub description: String,
    pub icon: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Weakness {
    pub area: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub priority: Priority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Impact {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub action: &'static str,
    pub reason: &'static str,
    pub impact: Impact,
    pub icon: &'static str,
}

pub(crate) fn strengths(facts: &Facts) -> Vec<Strength> {
    let total = facts.counts.total;
    let shares = facts.shares;
    let mut out = Vec::new();

    if shares.hard > 20.0 {
        out.push(Strength {
            area: "Problem Complexity",
            description: format!(
                "Strong at tackling hard problems ({:.1}% of your solutions)",
                shares.hard
            ),
            icon: "🏆",
        });
    }
    if shares.medium > 50.0 {
        out.push(Strength {
            area: "Intermediate Skills",
            description: format!(
                "Excellent grasp of medium-level problems ({:.1}%)",
                shares.medium
            ),
            icon: "💪",
        });
    }
    if facts.platforms >= 2 {
        out.push(Strength {
            area: "Platform Diversity",
            description: format!("Active on {} platforms - great exposure!", facts.platforms),
            icon: "🌐",
        });
    }
    if total >= 200 {
        out.push(Strength {
            area: "Consistency",
            description: format!("Impressive volume with {total}+ problems solved"),
            icon: "🔥",
        });
    }

    if out.is_empty() {
        out.push(Strength {
            area: "Getting Started",
            description: "You're building your coding foundation - keep going!".to_owned(),
            icon: "🌱",
        });
    }
    out
}

pub(crate) fn weaknesses(facts: &Facts) -> Vec<Weakness> {
    let total = facts.counts.total;
    let shares = facts.shares;
    let mut out = Vec::new();

    if shares.hard < 5.0 && total > 50 {
        out.push(Weakness {
            area: "Hard Problems",
            description: "Limited exposure to hard-level problems. Try challenging yourself!",
            icon: "🎯",
            priority: Priority::High,
        });
    }
    if shares.medium < 30.0 && total > 30 {
        out.push(Weakness {
            area: "Medium Problems",
            description: "Focus on medium-difficulty problems to level up",
            icon: "📈",
            priority: Priority::Medium,
        });
    }
    if facts.platforms == 1 {
        out.push(Weakness {
            area: "Platform Diversity",
            description: "Consider solving problems on multiple platforms for broader exposure",
            icon: "🌍",
            priority: Priority::Low,
        });
    }
    if total < 50 {
        out.push(Weakness {
            area: "Problem Volume",
            description: "Build consistency by solving more problems regularly",
            icon: "📊",
            priority: Priority::High,
        });
    }

    if out.is_empty() {
        out.push(Weakness {
            area: "Keep Improving",
            description: "You're doing well! Keep challenging yourself with harder problems",
            icon: "✨",
            priority: Priority::Low,
        });
    }
    out
}

pub(crate) fn recommendations(facts: &Facts) -> Vec<Recommendation> {
    let counts = facts.counts;
    let total = counts.total;
    let shares = facts.shares;
    let mut out = Vec::new();

    if shares.medium > 60.0 && shares.hard < 15.0 {
        out.push(Recommendation {
            kind: "Difficulty Progression",
            action: "Start tackling hard problems",
            reason: "You're comfortable with medium problems - time to level up!",
            impact: Impact::High,
            icon: "🚀",
        });
    } else if counts.easy > counts.medium.saturating_add(counts.hard) {
        out.push(Recommendation {
            kind: "Challenge Yourself",
            action: "Shift focus to medium and hard problems",
            reason: "You've mastered easy problems - increase the difficulty",
            impact: Impact::High,
            icon: "⬆️",
        });
    }

    if total < 100 {
        out.push(Recommendation {
            kind: "Build Consistency",
            action: "Solve at least 3-5 problems daily",
            reason: "Regular practice is key to improvement",
            impact: Impact::High,
            icon: "📅",
        });
    }
    if total > 200 {
        out.push(Recommendation {
            kind: "Specialize",
            action: "Focus on specific problem types (DP, Graphs, etc.)",
            reason: "You have a strong foundation - time to master specific domains",
            impact: Impact::Medium,
            icon: "🎓",
        });
    }
    if total > 150 {
        out.push(Recommendation {
            kind: "Interview Ready",
            action: "Practice mock interviews and timed contests",
            reason: "You have sufficient problem-solving experience",
            impact: Impact::High,
            icon: "💼",
        });
    }
    out
}
