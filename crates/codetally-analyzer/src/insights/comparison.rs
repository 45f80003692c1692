use std::collections::BTreeMap;

use codetally_core::{DifficultyCounts, Source, SourceResult};
use serde::Serialize;

use super::percent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonEntry {
    pub platform: Source,
    pub account_key: String,
    pub total: u64,
    pub easy: u64,
    pub medium: u64,
    pub hard: u64,
    /// One decimal place, e.g. `"23.5"`.
    pub hard_percentage: String,
    /// 1 to 5.
    pub rating: u8,
    pub stars: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformComparison {
    pub platforms: Vec<ComparisonEntry>,
    pub top_platform: Option<Source>,
    pub insights: Vec<String>,
}

fn star_rating(counts: &DifficultyCounts) -> u8 {
    let total = counts.total;
    let hard_pct = percent(counts.hard, total);
    if total >= 200 && hard_pct > 20.0 {
        5
    } else if total >= 150 && hard_pct > 15.0 {
        4
    } else if total >= 100 && hard_pct > 10.0 {
        3
    } else if total >= 50 {
        2
    } else {
        1
    }
}

/// Ranks successful accounts with a non-zero total by total, descending.
/// Ties keep account-key order.
pub(crate) fn compare(platforms: &BTreeMap<String, SourceResult>) -> PlatformComparison {
    let mut entries: Vec<ComparisonEntry> = platforms
        .iter()
        .filter_map(|(key, result)| match result {
            SourceResult::Success(stats) if stats.counts.total > 0 => Some((key, stats)),
            _ => None,
        })
        .map(|(key, stats)| {
            let counts = stats.counts;
            let rating = star_rating(&counts);
            ComparisonEntry {
                platform: stats.source,
                account_key: key.clone(),
                total: counts.total,
                easy: counts.easy,
                medium: counts.medium,
                hard: counts.hard,
                hard_percentage: format!("{:.1}", percent(counts.hard, counts.total)),
                rating,
                stars: "⭐".repeat(usize::from(rating)),
            }
        })
        .collect();

    entries.sort_by(|a, b| b.total.cmp(&a.total));

    let top_platform = entries.first().map(|e| e.platform);
    let mut insights = Vec::new();
    if entries.len() > 1 {
        let top = &entries[0];
        insights.push(format!(
            "{} is your strongest platform with {} problems",
            top.platform.as_str().to_uppercase(),
            top.total
        ));
    }

    PlatformComparison {
        platforms: entries,
        top_platform,
        insights,
    }
}
