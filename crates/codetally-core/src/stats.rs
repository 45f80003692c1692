//! Normalized per-account statistics.
//!
//! Every source adapter produces exactly one [`SourceResult`] per requested
//! account. The wire shape (`platform`, `username`, `success`, then either
//! `name`/`avatar`/`stats` plus source extras or `error`) is what the HTTP
//! layer returns and what history persistence stores.

use serde::{Deserialize, Serialize, Serializer};

use crate::source::Source;

/// Solved-problem counts for one account or for an aggregate.
///
/// `total` is the source's own grand total and is not required to equal
/// `easy + medium + hard`: some sources classify problems outside the three
/// buckets. Volume arithmetic uses `total`; the buckets only feed
/// distribution arithmetic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyCounts {
    pub easy: u64,
    pub medium: u64,
    pub hard: u64,
    pub total: u64,
}

impl DifficultyCounts {
    #[must_use]
    pub fn new(easy: u64, medium: u64, hard: u64, total: u64) -> Self {
        Self {
            easy,
            medium,
            hard,
            total,
        }
    }

    /// Field-wise saturating sum. Commutative and associative, so fold order
    /// never changes the result.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            easy: self.easy.saturating_add(other.easy),
            medium: self.medium.saturating_add(other.medium),
            hard: self.hard.saturating_add(other.hard),
            total: self.total.saturating_add(other.total),
        }
    }
}

/// Source-specific metadata carried alongside the counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SourceExtra {
    Leetcode {
        reputation: i64,
    },
    Codeforces {
        rating: i64,
        rank: String,
    },
    Gfg {
        score: i64,
        institution: String,
    },
}

/// A successful fetch for one account.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceStats {
    pub source: Source,
    pub handle: String,
    pub display_name: String,
    pub avatar: String,
    pub counts: DifficultyCounts,
    pub extra: Option<SourceExtra>,
    /// Set when the counts were estimated from a rendered page rather than
    /// read from a structured endpoint.
    pub approximate: bool,
}

/// A fetch that exhausted its retries and fallbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFailure {
    pub source: Source,
    pub handle: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SourceResult {
    Success(SourceStats),
    Failure(SourceFailure),
}

impl SourceResult {
    pub fn failure(source: Source, handle: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Failure(SourceFailure {
            source,
            handle: handle.into(),
            reason: reason.into(),
        })
    }

    #[must_use]
    pub fn source(&self) -> Source {
        match self {
            Self::Success(s) => s.source,
            Self::Failure(f) => f.source,
        }
    }

    #[must_use]
    pub fn handle(&self) -> &str {
        match self {
            Self::Success(s) => &s.handle,
            Self::Failure(f) => &f.handle,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Counts of a successful result; `None` for failures.
    #[must_use]
    pub fn counts(&self) -> Option<&DifficultyCounts> {
        match self {
            Self::Success(s) => Some(&s.counts),
            Self::Failure(_) => None,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireResult<'a> {
    platform: Source,
    username: &'a str,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    avatar: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<&'a DifficultyCounts>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    approximate: bool,
    #[serde(flatten)]
    extra: Option<&'a SourceExtra>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl Serialize for SourceResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let wire = match self {
            Self::Success(s) => WireResult {
                platform: s.source,
                username: &s.handle,
                success: true,
                name: Some(&s.display_name),
                avatar: Some(&s.avatar),
                stats: Some(&s.counts),
                approximate: s.approximate,
                extra: s.extra.as_ref(),
                error: None,
            },
            Self::Failure(f) => WireResult {
                platform: f.source,
                username: &f.handle,
                success: false,
                name: None,
                avatar: None,
                stats: None,
                approximate: false,
                extra: None,
                error: Some(&f.reason),
            },
        };
        wire.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codeforces_success() -> SourceResult {
        SourceResult::Success(SourceStats {
            source: Source::Codeforces,
            handle: "tourist".to_owned(),
            display_name: "Gennady Korotkevich".to_owned(),
            avatar: "https://userpic.codeforces.org/tourist.jpg".to_owned(),
            counts: DifficultyCounts::new(10, 20, 30, 60),
            extra: Some(SourceExtra::Codeforces {
                rating: 3800,
                rank: "legendary grandmaster".to_owned(),
            }),
            approximate: false,
        })
    }

    #[test]
    fn merge_is_field_wise() {
        let a = DifficultyCounts::new(1, 2, 3, 7);
        let b = DifficultyCounts::new(10, 20, 30, 61);
        assert_eq!(a.merge(b), DifficultyCounts::new(11, 22, 33, 68));
        assert_eq!(a.merge(b), b.merge(a));
    }

    #[test]
    fn merge_saturates_instead_of_overflowing() {
        let a = DifficultyCounts::new(u64::MAX, 0, 0, u64::MAX);
        let merged = a.merge(DifficultyCounts::new(1, 0, 0, 1));
        assert_eq!(merged.total, u64::MAX);
    }

    #[test]
    fn success_serializes_stats_and_flattened_extra() {
        let json = serde_json::to_value(codeforces_success()).unwrap();
        assert_eq!(json["platform"], "codeforces");
        assert_eq!(json["username"], "tourist");
        assert_eq!(json["success"], true);
        assert_eq!(json["stats"]["total"], 60);
        assert_eq!(json["rating"], 3800);
        assert_eq!(json["rank"], "legendary grandmaster");
        assert!(json.get("error").is_none());
        assert!(
            json.get("approximate").is_none(),
            "exact results omit the approximate flag"
        );
    }

    #[test]
    fn failure_serializes_error_without_stats() {
        let result = SourceResult::failure(Source::Leetcode, "ghost", "user ghost not found");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "user ghost not found");
        assert!(json.get("stats").is_none());
        assert!(result.counts().is_none());
    }

    #[test]
    fn accessors_cover_both_variants() {
        let ok = codeforces_success();
        assert!(ok.is_success());
        assert_eq!(ok.source(), Source::Codeforces);
        assert_eq!(ok.handle(), "tourist");

        let failed = SourceResult::failure(Source::Gfg, "x", "boom");
        assert!(!failed.is_success());
        assert_eq!(failed.source(), Source::Gfg);
    }
}
