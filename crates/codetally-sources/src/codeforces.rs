//! Codeforces adapter backed by the public REST API.
//!
//! Two calls per account: `user.info` for the profile and `user.status` for
//! the submission history. Solved problems are deduplicated across accepted
//! submissions and bucketed by problem rating.

use std::collections::HashSet;

use codetally_core::{DifficultyCounts, Source, SourceExtra, SourceResult, SourceStats};
use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::SourceError;
use crate::http::{endpoint, RawResponse, SourceHttp};
use crate::registry::{into_source_result, SourceAdapter};
use crate::types::{CodeforcesEnvelope, CodeforcesSubmission, CodeforcesUser};

pub const DEFAULT_BASE_URL: &str = "https://codeforces.com";

/// Problems rated below this count as easy.
pub const EASY_RATING_CEILING: u32 = 1400;
/// Problems rated below this (and not easy) count as medium; the rest are hard.
pub const MEDIUM_RATING_CEILING: u32 = 1900;

const SUBMISSION_PAGE_SIZE: &str = "10000";
const ACCEPTED_VERDICT: &str = "OK";
const UNRATED_RANK: &str = "unrated";

#[derive(Debug, Clone)]
pub struct CodeforcesAdapter {
    http: SourceHttp,
    user_info_url: Url,
    user_status_url: Url,
}

impl CodeforcesAdapter {
    /// # Errors
    ///
    /// See [`CodeforcesAdapter::with_base_url`].
    pub fn new(http: SourceHttp) -> Result<Self, SourceError> {
        Self::with_base_url(http, DEFAULT_BASE_URL)
    }

    /// Creates an adapter against a custom host (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(http: SourceHttp, base_url: &str) -> Result<Self, SourceError> {
        Ok(Self {
            http,
            user_info_url: endpoint(base_url, "api/user.info")?,
            user_status_url: endpoint(base_url, "api/user.status")?,
        })
    }

    /// # Errors
    ///
    /// - [`SourceError::NotFound`] when Codeforces reports the handle unknown.
    /// - [`SourceError::Api`] for any other `FAILED` envelope.
    /// - Transport, status, and payload errors after the retry budget.
    pub async fn fetch_stats(&self, handle: &str) -> Result<SourceStats, SourceError> {
        let user = self.fetch_user_info(handle).await?;
        let submissions = self.fetch_submissions(handle).await?;
        let counts = tally_accepted(&submissions);
        Ok(to_stats(handle, user, counts))
    }

    async fn fetch_user_info(&self, handle: &str) -> Result<CodeforcesUser, SourceError> {
        let mut url = self.user_info_url.clone();
        url.query_pairs_mut().append_pair("handles", handle);

        self.http
            .retry_policy()
            .run(|| {
                let url = url.clone();
                async move {
                    let raw = self.http.send(self.http.client().get(url)).await?;
                    let users: Vec<CodeforcesUser> =
                        read_envelope(raw, handle, "codeforces user.info")?;
                    users.into_iter().next().ok_or_else(|| SourceError::NotFound {
                        handle: handle.to_owned(),
                    })
                }
            })
            .await
    }

    async fn fetch_submissions(
        &self,
        handle: &str,
    ) -> Result<Vec<CodeforcesSubmission>, SourceError> {
        let mut url = self.user_status_url.clone();
        url.query_pairs_mut()
            .append_pair("handle", handle)
            .append_pair("from", "1")
            .append_pair("count", SUBMISSION_PAGE_SIZE);

        self.http
            .retry_policy()
            .run(|| {
                let url = url.clone();
                async move {
                    let raw = self.http.send(self.http.client().get(url)).await?;
                    read_envelope(raw, handle, "codeforces user.status")
                }
            })
            .await
    }
}

impl SourceAdapter for CodeforcesAdapter {
    fn source(&self) -> Source {
        Source::Codeforces
    }

    fn fetch<'a>(&'a self, handle: &'a str) -> BoxFuture<'a, SourceResult> {
        async move {
            into_source_result(Source::Codeforces, handle, self.fetch_stats(handle).await)
        }
        .boxed()
    }
}

fn is_not_found_comment(comment: Option<&str>) -> bool {
    comment.is_some_and(|c| c.to_ascii_lowercase().contains("not found"))
}

/// Unwraps a Codeforces envelope.
///
/// Codeforces answers an unknown handle with HTTP 400 and a `FAILED`
/// envelope whose comment says "not found"; that case maps to
/// [`SourceError::NotFound`] so it is not retried.
fn read_envelope<T: DeserializeOwned>(
    raw: RawResponse,
    handle: &str,
    context: &str,
) -> Result<T, SourceError> {
    let not_found = || SourceError::NotFound {
        handle: handle.to_owned(),
    };

    if raw.status == StatusCode::BAD_REQUEST {
        if let Ok(envelope) = raw.json::<CodeforcesEnvelope<serde_json::Value>>(context) {
            if is_not_found_comment(envelope.comment.as_deref()) {
                return Err(not_found());
            }
        }
    }

    let envelope: CodeforcesEnvelope<T> = raw.ensure_success(handle)?.json(context)?;
    if envelope.status != "OK" {
        if is_not_found_comment(envelope.comment.as_deref()) {
            return Err(not_found());
        }
        return Err(SourceError::Api(envelope.comment.unwrap_or_else(|| {
            format!("{context} returned status {}", envelope.status)
        })));
    }
    envelope
        .result
        .ok_or_else(|| SourceError::Api(format!("{context} returned no result")))
}

fn bucket_for_rating(counts: &mut DifficultyCounts, rating: u32) {
    if rating < EASY_RATING_CEILING {
        counts.easy += 1;
    } else if rating < MEDIUM_RATING_CEILING {
        counts.medium += 1;
    } else {
        counts.hard += 1;
    }
}

/// Counts each accepted problem once, keyed by `(contestId, index)`.
/// An unrated problem counts as rating 0 (easy). `total` is the number of
/// distinct solved problems.
pub(crate) fn tally_accepted(submissions: &[CodeforcesSubmission]) -> DifficultyCounts {
    let mut seen: HashSet<(Option<i64>, &str)> = HashSet::new();
    let mut counts = DifficultyCounts::default();

    for submission in submissions {
        if submission.verdict.as_deref() != Some(ACCEPTED_VERDICT) {
            continue;
        }
        let problem = &submission.problem;
        if seen.insert((problem.contest_id, problem.index.as_str())) {
            bucket_for_rating(&mut counts, problem.rating.unwrap_or(0));
        }
    }

    counts.total = seen.len() as u64;
    counts
}

fn to_stats(handle: &str, user: CodeforcesUser, counts: DifficultyCounts) -> SourceStats {
    let full_name = format!(
        "{} {}",
        user.first_name.as_deref().unwrap_or_default(),
        user.last_name.as_deref().unwrap_or_default()
    );
    let full_name = full_name.trim();
    let display_name = if full_name.is_empty() {
        handle.to_owned()
    } else {
        full_name.to_owned()
    };

    SourceStats {
        source: Source::Codeforces,
        handle: handle.to_owned(),
        display_name,
        avatar: user.avatar.unwrap_or_default(),
        counts,
        extra: Some(SourceExtra::Codeforces {
            rating: user.rating.unwrap_or(0),
            rank: user.rank.unwrap_or_else(|| UNRATED_RANK.to_owned()),
        }),
        approximate: false,
    }
}
