//! GeeksforGeeks adapter.
//!
//! Tries the practice stats API first. When that call fails or returns no
//! `results`, falls back to reading the rendered profile page and
//! estimating the difficulty split from a single total.

mod page;

use codetally_core::{DifficultyCounts, Source, SourceExtra, SourceResult, SourceStats};
use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::Url;
use serde_json::{Map, Value};

use crate::error::SourceError;
use crate::http::{endpoint, SourceHttp};
use crate::registry::{into_source_result, SourceAdapter};
use crate::types::GfgStatsResponse;

pub use page::FALLBACK_SPLIT_PERCENT;

pub const DEFAULT_API_BASE_URL: &str = "https://practiceapi.geeksforgeeks.org";
pub const DEFAULT_SITE_BASE_URL: &str = "https://www.geeksforgeeks.org";

#[derive(Debug, Clone)]
pub struct GfgAdapter {
    http: SourceHttp,
    stats_url: Url,
    site_base_url: String,
}

impl GfgAdapter {
    /// # Errors
    ///
    /// See [`GfgAdapter::with_base_urls`].
    pub fn new(http: SourceHttp) -> Result<Self, SourceError> {
        Self::with_base_urls(http, DEFAULT_API_BASE_URL, DEFAULT_SITE_BASE_URL)
    }

    /// Creates an adapter against custom hosts (for testing with wiremock).
    /// `api_base_url` serves the stats endpoint; `site_base_url` serves
    /// profile pages.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::InvalidBaseUrl`] if either base does not parse.
    pub fn with_base_urls(
        http: SourceHttp,
        api_base_url: &str,
        site_base_url: &str,
    ) -> Result<Self, SourceError> {
        let stats_url = endpoint(api_base_url, "api/vr/user-stats")?;
        // Validate eagerly; the per-user path is appended at call time.
        endpoint(site_base_url, "user/")?;
        Ok(Self {
            http,
            stats_url,
            site_base_url: site_base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn profile_page_url(&self, handle: &str) -> Result<Url, SourceError> {
        endpoint(&self.site_base_url, &format!("user/{handle}/"))
    }

    /// # Errors
    ///
    /// Returns [`SourceError::AllStrategiesFailed`] when both the stats API
    /// and the profile page fail.
    pub async fn fetch_stats(&self, handle: &str) -> Result<SourceStats, SourceError> {
        let primary = match self.fetch_structured(handle).await {
            Ok(Some(stats)) => return Ok(stats),
            Ok(None) => {
                tracing::debug!(handle, "gfg stats API returned no results, reading profile page");
                None
            }
            Err(err) => {
                tracing::debug!(handle, error = %err, "gfg stats API failed, reading profile page");
                Some(err)
            }
        };

        match self.fetch_rendered(handle).await {
            Ok(stats) => Ok(stats),
            Err(fallback) => Err(match primary {
                Some(primary) => SourceError::AllStrategiesFailed {
                    primary: Box::new(primary),
                    fallback: Box::new(fallback),
                },
                None => fallback,
            }),
        }
    }

    /// `Ok(None)` when the API answered but had nothing for this user.
    async fn fetch_structured(&self, handle: &str) -> Result<Option<SourceStats>, SourceError> {
        let mut url = self.stats_url.clone();
        url.query_pairs_mut().append_pair("userName", handle);
        let referer = format!("{}/user/{handle}/", self.site_base_url);

        self.http
            .retry_policy()
            .run(|| {
                let url = url.clone();
                let referer = referer.clone();
                async move {
                    let request = self
                        .http
                        .client()
                        .get(url)
                        .header(reqwest::header::ACCEPT, "application/json")
                        .header(reqwest::header::REFERER, referer);
                    let raw = self.http.send(request).await?.ensure_success(handle)?;
                    let parsed: GfgStatsResponse = raw.json("gfg user-stats")?;
                    Ok(parsed
                        .results
                        .filter(|r| !r.is_empty())
                        .map(|r| structured_stats(handle, &r)))
                }
            })
            .await
    }

    async fn fetch_rendered(&self, handle: &str) -> Result<SourceStats, SourceError> {
        let url = self.profile_page_url(handle)?;

        let total = self
            .http
            .retry_policy()
            .run(|| {
                let url = url.clone();
                async move {
                    let request = self
                        .http
                        .client()
                        .get(url)
                        .header(reqwest::header::ACCEPT, "text/html,*/*;q=0.8");
                    let raw = self.http.send(request).await?.ensure_success(handle)?;
                    Ok(page::extract_solved_total(&raw.body))
                }
            })
            .await?;

        Ok(SourceStats {
            source: Source::Gfg,
            handle: handle.to_owned(),
            display_name: handle.to_owned(),
            avatar: String::new(),
            counts: page::estimate_split(total),
            extra: None,
            approximate: true,
        })
    }
}

impl SourceAdapter for GfgAdapter {
    fn source(&self) -> Source {
        Source::Gfg
    }

    fn fetch<'a>(&'a self, handle: &'a str) -> BoxFuture<'a, SourceResult> {
        async move { into_source_result(Source::Gfg, handle, self.fetch_stats(handle).await) }
            .boxed()
    }
}

/// Reads a non-negative count that may arrive as a number or a numeric
/// string. Anything else counts as 0.
fn count_field(results: &Map<String, Value>, key: &str) -> u64 {
    match results.get(key) {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(truncate_to_u64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn truncate_to_u64(value: f64) -> u64 {
    value as u64
}

fn signed_field(results: &Map<String, Value>, key: &str) -> i64 {
    match results.get(key) {
        Some(Value::Number(n)) => n.as_i64().unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn text_field<'a>(results: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    results
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// GeeksforGeeks has five tiers; they fold into three buckets as
/// school → easy, basic + easy + medium → medium, hard → hard.
fn structured_stats(handle: &str, results: &Map<String, Value>) -> SourceStats {
    let counts = DifficultyCounts::new(
        count_field(results, "school"),
        count_field(results, "basic")
            .saturating_add(count_field(results, "easy"))
            .saturating_add(count_field(results, "medium")),
        count_field(results, "hard"),
        count_field(results, "total_problems_solved"),
    );

    SourceStats {
        source: Source::Gfg,
        handle: handle.to_owned(),
        display_name: text_field(results, "user_name").unwrap_or(handle).to_owned(),
        avatar: text_field(results, "profile_image_url")
            .unwrap_or_default()
            .to_owned(),
        counts,
        extra: Some(SourceExtra::Gfg {
            score: signed_field(results, "score"),
            institution: text_field(results, "institution")
                .unwrap_or_default()
                .to_owned(),
        }),
        approximate: false,
    }
}
