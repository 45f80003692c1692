//! Best-effort extraction of a solved-problem count from a rendered
//! GeeksforGeeks profile page.

use std::sync::LazyLock;

use codetally_core::DifficultyCounts;
use regex::Regex;

/// `div`/`span` elements whose class mentions problems, score, or solved.
/// Captures the inner markup up to the first closing tag.
static COUNTER_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?is)<(?:div|span)\b[^>]*\bclass\s*=\s*["'][^"']*(?:problem|score|solved)[^"']*["'][^>]*>(.*?)</(?:div|span)>"#,
    )
    .expect("valid regex")
});

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

/// Percent of the estimated total assigned to easy, medium, and hard.
pub const FALLBACK_SPLIT_PERCENT: [u64; 3] = [45, 40, 15];

/// Largest leading number across all matching counter elements, or 0.
pub(crate) fn extract_solved_total(html: &str) -> u64 {
    COUNTER_ELEMENT
        .captures_iter(html)
        .filter_map(|caps| {
            let inner = caps.get(1)?.as_str();
            let text = TAG.replace_all(inner, " ");
            NUMBER.find(&text)?.as_str().parse::<u64>().ok()
        })
        .max()
        .unwrap_or(0)
}

/// Splits `total` across the three buckets, truncating each share.
/// The buckets may sum to less than `total`.
pub(crate) fn estimate_split(total: u64) -> DifficultyCounts {
    let [easy, medium, hard] = FALLBACK_SPLIT_PERCENT.map(|pct| total.saturating_mul(pct) / 100);
    DifficultyCounts::new(easy, medium, hard, total)
}
