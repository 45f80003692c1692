//! Identifier normalization: profile URL or bare handle to canonical handle.
//!
//! Never fails. Input that does not look like a known profile URL is
//! returned trimmed and otherwise untouched; validity is the adapter's
//! concern.

use std::sync::LazyLock;

use regex::Regex;

use crate::source::Source;

static LEETCODE_PROFILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"leetcode\.com/(?:u/)?([^/?]+)").expect("valid leetcode regex"));

static CODEFORCES_PROFILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"codeforces\.com/profile/([^/?]+)").expect("valid codeforces regex")
});

static GFG_PROFILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"geeksforgeeks\.org/user/([^/?]+)").expect("valid gfg regex"));

fn profile_pattern(source: Source) -> &'static Regex {
    match source {
        Source::Leetcode => &LEETCODE_PROFILE,
        Source::Codeforces => &CODEFORCES_PROFILE,
        Source::Gfg => &GFG_PROFILE,
    }
}

/// Extracts the canonical handle for `source` from `raw`.
///
/// Idempotent: normalizing an already-canonical handle returns it unchanged.
#[must_use]
pub fn normalize_handle(source: Source, raw: &str) -> String {
    let trimmed = raw.trim();
    profile_pattern(source)
        .captures(trimmed)
        .and_then(|cap| cap.get(1))
        .map_or_else(|| trimmed.to_owned(), |m| m.as_str().to_owned())
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
