//! LeetCode adapter backed by the public GraphQL endpoint.

use codetally_core::{DifficultyCounts, Source, SourceExtra, SourceResult, SourceStats};
use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::Url;
use serde_json::json;

use crate::error::SourceError;
use crate::http::{endpoint, SourceHttp};
use crate::registry::{into_source_result, SourceAdapter};
use crate::types::{LeetcodeResponse, MatchedUser};

pub const DEFAULT_BASE_URL: &str = "https://leetcode.com";

const PROFILE_QUERY: &str = r"
query getUserProfile($username: String!) {
  matchedUser(username: $username) {
    profile {
      realName
      userAvatar
      reputation
    }
    submitStats {
      acSubmissionNum {
        difficulty
        count
      }
    }
  }
}";

#[derive(Debug, Clone)]
pub struct LeetcodeAdapter {
    http: SourceHttp,
    graphql_url: Url,
}

impl LeetcodeAdapter {
    /// # Errors
    ///
    /// See [`LeetcodeAdapter::with_base_url`].
    pub fn new(http: SourceHttp) -> Result<Self, SourceError> {
        Self::with_base_url(http, DEFAULT_BASE_URL)
    }

    /// Creates an adapter against a custom host (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(http: SourceHttp, base_url: &str) -> Result<Self, SourceError> {
        let graphql_url = endpoint(base_url, "graphql")?;
        Ok(Self { http, graphql_url })
    }

    /// # Errors
    ///
    /// - [`SourceError::NotFound`] when `matchedUser` is null.
    /// - [`SourceError::Api`] when the response carries no `data`.
    /// - Transport, status, and payload errors after the retry budget.
    pub async fn fetch_stats(&self, handle: &str) -> Result<SourceStats, SourceError> {
        let body = json!({
            "query": PROFILE_QUERY,
            "variables": { "username": handle },
        });

        self.http
            .retry_policy()
            .run(|| {
                let url = self.graphql_url.clone();
                let body = &body;
                async move {
                    let request = self
                        .http
                        .client()
                        .post(url)
                        .header(reqwest::header::REFERER, "https://leetcode.com")
                        .json(body);
                    let raw = self.http.send(request).await?.ensure_success(handle)?;
                    let parsed: LeetcodeResponse = raw.json("leetcode profile")?;
                    let data = parsed.data.ok_or_else(|| {
                        let messages: Vec<String> =
                            parsed.errors.into_iter().map(|e| e.message).collect();
                        SourceError::Api(if messages.is_empty() {
                            "response carried no data".to_owned()
                        } else {
                            messages.join("; ")
                        })
                    })?;
                    let user = data.matched_user.ok_or_else(|| SourceError::NotFound {
                        handle: handle.to_owned(),
                    })?;
                    Ok(to_stats(handle, user))
                }
            })
            .await
    }
}

impl SourceAdapter for LeetcodeAdapter {
    fn source(&self) -> Source {
        Source::Leetcode
    }

    fn fetch<'a>(&'a self, handle: &'a str) -> BoxFuture<'a, SourceResult> {
        async move { into_source_result(Source::Leetcode, handle, self.fetch_stats(handle).await) }
            .boxed()
    }
}

fn to_stats(handle: &str, user: MatchedUser) -> SourceStats {
    let mut counts = DifficultyCounts::default();
    if let Some(stats) = user.submit_stats {
        for entry in stats.ac_submission_num {
            match entry.difficulty.to_ascii_lowercase().as_str() {
                "easy" => counts.easy = entry.count,
                "medium" => counts.medium = entry.count,
                "hard" => counts.hard = entry.count,
                "all" => counts.total = entry.count,
                _ => {}
            }
        }
    }

    let profile = user.profile;
    let display_name = profile
        .as_ref()
        .and_then(|p| p.real_name.as_deref())
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(handle)
        .to_owned();
    let avatar = profile
        .as_ref()
        .and_then(|p| p.user_avatar.clone())
        .unwrap_or_default();
    let reputation = profile.as_ref().and_then(|p| p.reputation).unwrap_or(0);

    SourceStats {
        source: Source::Leetcode,
        handle: handle.to_owned(),
        display_name,
        avatar,
        counts,
        extra: Some(SourceExtra::Leetcode { reputation }),
        approximate: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DifficultyCount, LeetcodeProfile, SubmitStats};

    fn user(real_name: Option<&str>) -> MatchedUser {
        MatchedUser {
            profile: Some(LeetcodeProfile {
                real_name: real_name.map(str::to_owned),
                user_avatar: Some("https://assets.leetcode.com/a.png".to_owned()),
                reputation: Some(12),
            }),
            submit_stats: Some(SubmitStats {
                ac_submission_num: vec![
                    DifficultyCount {
                        difficulty: "All".to_owned(),
                        count: 300,
                    },
                    DifficultyCount {
                        difficulty: "Easy".to_owned(),
                        count: 100,
                    },
                    DifficultyCount {
                        difficulty: "Medium".to_owned(),
                        count: 150,
                    },
                    DifficultyCount {
                        difficulty: "Hard".to_owned(),
                        count: 50,
                    },
                ],
            }),
        }
    }

    #[test]
    fn maps_difficulty_entries_by_label() {
        let stats = to_stats("neal_wu", user(Some("Neal Wu")));
        assert_eq!(stats.counts, DifficultyCounts::new(100, 150, 50, 300));
        assert_eq!(stats.display_name, "Neal Wu");
        assert_eq!(stats.extra, Some(SourceExtra::Leetcode { reputation: 12 }));
    }

    #[test]
    fn difficulty_labels_match_case_insensitively() {
        let mut u = user(None);
        if let Some(stats) = u.submit_stats.as_mut() {
            for entry in &mut stats.ac_submission_num {
                entry.difficulty = entry.difficulty.to_ascii_uppercase();
            }
        }
        let stats = to_stats("neal_wu", u);
        assert_eq!(stats.counts, DifficultyCounts::new(100, 150, 50, 300));
    }

    #[test]
    fn blank_real_name_falls_back_to_handle() {
        let stats = to_stats("neal_wu", user(Some("  ")));
        assert_eq!(stats.display_name, "neal_wu");
        let stats = to_stats("neal_wu", user(None));
        assert_eq!(stats.display_name, "neal_wu");
    }

    #[test]
    fn missing_submit_stats_yields_zero_counts() {
        let mut u = user(None);
        u.submit_stats = None;
        let stats = to_stats("neal_wu", u);
        assert_eq!(stats.counts, DifficultyCounts::default());
    }
}
