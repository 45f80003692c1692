use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NextStep {
    pub step: u8,
    pub action: &'static str,
    pub goal: &'static str,
    pub timeframe: &'static str,
    pub icon: &'static str,
}

const fn step(
    step: u8,
    action: &'static str,
    goal: &'static str,
    timeframe: &'static str,
    icon: &'static str,
) -> NextStep {
    NextStep {
        step,
        action,
        goal,
        timeframe,
        icon,
    }
}

const FOUNDATION: [NextStep; 2] = [
    step(1, "Solve 50 easy problems", "Build strong fundamentals", "2-3 weeks", "🎯"),
    step(2, "Learn basic data structures", "Arrays, Strings, Hash Tables", "1 week", "📚"),
];

const INTERMEDIATE: [NextStep; 2] = [
    step(1, "Solve 100 medium problems", "Master intermediate concepts", "4-6 weeks", "📈"),
    step(2, "Practice patterns", "Two Pointers, Sliding Window, Binary Search", "2 weeks", "🧩"),
];

const ADVANCED: [NextStep; 2] = [
    step(1, "Tackle 50 hard problems", "Advanced problem-solving", "6-8 weeks", "🚀"),
    step(2, "Join contests regularly", "Build speed and accuracy", "Weekly", "🏆"),
];

const MASTERY: [NextStep; 2] = [
    step(1, "Specialize in weak areas", "Master DP, Graphs, Trees", "4-6 weeks", "🎓"),
    step(2, "Mock interviews", "Prepare for tech interviews", "Ongoing", "💼"),
];

/// Two steps chosen by total: below 50, below 150, below 300, or beyond.
pub(crate) fn next_steps(total: u64) -> Vec<NextStep> {
    let steps = match total {
        0..=49 => &FOUNDATION,
        50..=149 => &INTERMEDIATE,
        150..=299 => &ADVANCED,
        _ => &MASTERY,
    };
    steps.to_vec()
}

pub(crate) fn motivational_message(total: u64) -> &'static str {
    match total {
        500.. => "🌟 Phenomenal! You're in the top tier of problem solvers. Keep pushing boundaries!",
        300..=499 => "🔥 Impressive progress! You're well on your way to mastery. Stay consistent!",
        150..=299 => "💪 Great momentum! You're building solid skills. Keep the streak going!",
        50..=149 => "🌱 You're growing fast! Every problem solved makes you stronger. Don't stop now!",
        _ => "🚀 Every expert was once a beginner. You've started your journey - keep coding!",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_step_bands() {
        assert_eq!(next_steps(0)[0].action, "Solve 50 easy problems");
        assert_eq!(next_steps(49)[1].action, "Learn basic data structures");
        assert_eq!(next_steps(50)[0].action, "Solve 100 medium problems");
        assert_eq!(next_steps(150)[0].action, "Tackle 50 hard problems");
        assert_eq!(next_steps(300)[0].action, "Specialize in weak areas");
        assert_eq!(next_steps(10_000)[1].timeframe, "Ongoing");
    }

    #[test]
    fn steps_are_numbered() {
        for total in [0, 60, 200, 900] {
            let steps = next_steps(total);
            assert_eq!(steps.len(), 2);
            assert_eq!(steps[0].step, 1);
            assert_eq!(steps[1].step, 2);
        }
    }

    #[test]
    fn motivational_bands_use_five_thresholds() {
        assert!(motivational_message(0).starts_with("🚀"));
        assert!(motivational_message(50).starts_with("🌱"));
        assert!(motivational_message(150).starts_with("💪"));
        assert!(motivational_message(300).starts_with("🔥"));
        assert!(motivational_message(500).starts_with("🌟"));
    }
}
