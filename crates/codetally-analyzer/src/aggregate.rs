//! Fan-out over requested accounts and the fold into one report.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;
use codetally_core::{
    normalize_handle, AppConfig, DifficultyCounts, ProfileRequest, Source, SourceResult,
};
use codetally_sources::{SourceError, SourceHttp, SourceRegistry};
use futures::stream::{self, StreamExt};

use crate::insights::derive_insights;
use crate::overlap;
use crate::report::{AnalysisReport, OverallCounts, OverallStats};

/// One adapter call the aggregator will make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFetch {
    pub source: Source,
    pub handle: String,
    pub key: String,
}

/// Normalizes identifiers and assigns account keys.
///
/// A source with exactly one non-blank identifier is keyed by its bare
/// name; with more, every account is keyed `source_handle`. The key
/// decision counts identifiers as requested, so identical normalized
/// handles still get compound keys but are fetched only once.
#[must_use]
pub fn plan(request: &ProfileRequest) -> Vec<PlannedFetch> {
    let mut planned = Vec::new();
    for (source, identifiers) in request.iter() {
        let normalized: Vec<String> = identifiers
            .iter()
            .map(|raw| normalize_handle(source, raw))
            .filter(|handle| !handle.is_empty())
            .collect();
        let compound = normalized.len() > 1;

        let mut seen = BTreeSet::new();
        planned.extend(
            normalized
                .into_iter()
                .filter(|handle| seen.insert(handle.clone()))
                .map(|handle| PlannedFetch {
                    source,
                    key: if compound {
                        format!("{source}_{handle}")
                    } else {
                        source.as_str().to_owned()
                    },
                    handle,
                }),
        );
    }
    planned
}

/// Per-run fold state. Merging is commutative, so completion order never
/// changes the result.
#[derive(Debug, Default)]
pub struct AggregateState {
    results: BTreeMap<String, SourceResult>,
    sum: DifficultyCounts,
    sources_attempted: usize,
    accounts_attempted: usize,
}

impl AggregateState {
    #[must_use]
    pub fn for_plan(plan: &[PlannedFetch]) -> Self {
        let sources: BTreeSet<Source> = plan.iter().map(|p| p.source).collect();
        Self {
            sources_attempted: sources.len(),
            accounts_attempted: plan.len(),
            ..Self::default()
        }
    }

    /// Records one account's result. Failures are kept but add nothing.
    pub fn record(&mut self, key: String, result: SourceResult) {
        if let Some(counts) = result.counts() {
            self.sum = self.sum.merge(*counts);
        }
        self.results.insert(key, result);
    }

    #[must_use]
    pub fn sum(&self) -> DifficultyCounts {
        self.sum
    }

    /// Applies the overlap estimate and derives insights. An insight
    /// failure is logged and leaves `ai_insights` empty.
    #[must_use]
    pub fn finish(self) -> AnalysisReport {
        let estimate = overlap::estimate(self.sum.total);
        let overall = OverallStats {
            stats: OverallCounts::from_sum(self.sum, estimate.estimated_unique_problems),
            unique_problems: estimate.estimated_unique_problems,
            duplicates: estimate.estimated_duplicates,
            platforms_analyzed: self.sources_attempted,
            total_accounts: self.accounts_attempted,
        };

        let ai_insights = match derive_insights(&overall, &self.results) {
            Ok(bundle) => Some(bundle),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "insight derivation failed; returning report without insights"
                );
                None
            }
        };

        AnalysisReport {
            platforms: self.results,
            overall,
            duplicate_analysis: estimate,
            ai_insights,
            timestamp: Utc::now(),
        }
    }
}

/// Runs the whole pipeline for a validated request.
#[derive(Debug, Clone)]
pub struct Analyzer {
    registry: SourceRegistry,
    max_concurrent: usize,
}

impl Analyzer {
    #[must_use]
    pub fn new(registry: SourceRegistry, max_concurrent: usize) -> Self {
        Self {
            registry,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Analyzer with the live adapters configured from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the HTTP client or an adapter endpoint
    /// cannot be constructed.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, SourceError> {
        let http = SourceHttp::from_app_config(config)?;
        let registry = SourceRegistry::with_default_adapters(&http)?;
        Ok(Self::new(registry, config.source_max_concurrent))
    }

    /// Fetches every planned account concurrently (bounded by
    /// `max_concurrent`) and folds the results. Never fails: per-account
    /// errors are recorded in the report.
    pub async fn analyze(&self, request: &ProfileRequest) -> AnalysisReport {
        let plan = plan(request);
        let mut state = AggregateState::for_plan(&plan);

        let outcomes: Vec<(String, SourceResult)> = stream::iter(plan)
            .map(|fetch| async move {
                let result = match self.registry.get(fetch.source) {
                    Some(adapter) => adapter.fetch(&fetch.handle).await,
                    None => SourceResult::failure(
                        fetch.source,
                        fetch.handle.as_str(),
                        format!("no adapter registered for {}", fetch.source),
                    ),
                };
                (fetch.key, result)
            })
            .buffer_unordered(self.max_concurrent)
            .collect()
            .await;

        for (key, result) in outcomes {
            state.record(key, result);
        }

        let report = state.finish();
        let failed = report
            .overall
            .total_accounts
            .saturating_sub(report.successful_accounts());
        tracing::info!(
            accounts = report.overall.total_accounts,
            platforms = report.overall.platforms_analyzed,
            failed,
            total = report.overall.stats.total,
            "analysis complete"
        );
        if failed > 0 && failed == report.overall.total_accounts {
            tracing::warn!(failed, "every requested account failed");
        }
        report
    }
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
