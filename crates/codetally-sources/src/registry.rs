//! The adapter seam and the per-source lookup table.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use codetally_core::{Source, SourceResult, SourceStats};
use futures::future::BoxFuture;

use crate::codeforces::CodeforcesAdapter;
use crate::error::SourceError;
use crate::gfg::GfgAdapter;
use crate::http::SourceHttp;
use crate::leetcode::LeetcodeAdapter;

/// Fetches statistics for one account on one source.
///
/// `fetch` never fails: every error (after retries and fallbacks) is folded
/// into a [`SourceResult::Failure`] for that account.
pub trait SourceAdapter: Send + Sync {
    fn source(&self) -> Source;

    fn fetch<'a>(&'a self, handle: &'a str) -> BoxFuture<'a, SourceResult>;
}

/// Converts an adapter's internal outcome into the per-account result.
pub(crate) fn into_source_result(
    source: Source,
    handle: &str,
    outcome: Result<SourceStats, SourceError>,
) -> SourceResult {
    match outcome {
        Ok(stats) => {
            tracing::debug!(
                source = %source,
                handle,
                total = stats.counts.total,
                approximate = stats.approximate,
                "source fetch succeeded"
            );
            SourceResult::Success(stats)
        }
        Err(err) => {
            tracing::warn!(source = %source, handle, error = %err, "source fetch failed");
            SourceResult::failure(source, handle, err.to_string())
        }
    }
}

/// Maps each [`Source`] to the adapter that serves it.
#[derive(Clone, Default)]
pub struct SourceRegistry {
    adapters: BTreeMap<Source, Arc<dyn SourceAdapter>>,
}

impl SourceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the live LeetCode, Codeforces, and GeeksforGeeks
    /// adapters, all sharing `http`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::InvalidBaseUrl`] if a built-in endpoint fails
    /// to parse.
    pub fn with_default_adapters(http: &SourceHttp) -> Result<Self, SourceError> {
        let mut registry = Self::new();
        registry.register(Arc::new(LeetcodeAdapter::new(http.clone())?));
        registry.register(Arc::new(CodeforcesAdapter::new(http.clone())?));
        registry.register(Arc::new(GfgAdapter::new(http.clone())?));
        Ok(registry)
    }

    /// Registers `adapter` under its own source, replacing any previous one.
    pub fn register(&mut self, adapter: Arc<dyn SourceAdapter>) {
        self.adapters.insert(adapter.source(), adapter);
    }

    #[must_use]
    pub fn get(&self, source: Source) -> Option<&Arc<dyn SourceAdapter>> {
        self.adapters.get(&source)
    }

    pub fn sources(&self) -> impl Iterator<Item = Source> + '_ {
        self.adapters.keys().copied()
    }
}

impl fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceRegistry")
            .field("sources", &self.adapters.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codetally_core::DifficultyCounts;
    use futures::FutureExt;

    struct Fixed(Source);

    impl SourceAdapter for Fixed {
        fn source(&self) -> Source {
            self.0
        }

        fn fetch<'a>(&'a self, handle: &'a str) -> BoxFuture<'a, SourceResult> {
            async move { SourceResult::failure(self.0, handle, "fixed") }.boxed()
        }
    }

    #[test]
    fn register_keys_by_adapter_source() {
        let mut registry = SourceRegistry::new();
        registry.register(Arc::new(Fixed(Source::Gfg)));
        assert!(registry.get(Source::Gfg).is_some());
        assert!(registry.get(Source::Leetcode).is_none());
        assert_eq!(registry.sources().collect::<Vec<_>>(), vec![Source::Gfg]);
    }

    #[test]
    fn default_registry_covers_every_source() {
        let http = SourceHttp::new(
            std::time::Duration::from_secs(5),
            "codetally-test",
            crate::RetryPolicy::without_delay(1),
        )
        .unwrap();
        let registry = SourceRegistry::with_default_adapters(&http).unwrap();
        assert_eq!(registry.sources().collect::<Vec<_>>(), Source::ALL.to_vec());
    }

    #[test]
    fn into_source_result_maps_errors_to_failure_reason() {
        let result = into_source_result(
            Source::Leetcode,
            "ghost",
            Err(SourceError::NotFound {
                handle: "ghost".to_owned(),
            }),
        );
        match result {
            SourceResult::Failure(f) => {
                assert_eq!(f.handle, "ghost");
                assert_eq!(f.reason, "user ghost not found");
            }
            SourceResult::Success(_) => panic!("expected failure"),
        }
    }

    #[test]
    fn into_source_result_keeps_success() {
        let stats = SourceStats {
            source: Source::Gfg,
            handle: "u".to_owned(),
            display_name: "u".to_owned(),
            avatar: String::new(),
            counts: DifficultyCounts::new(1, 1, 1, 3),
            extra: None,
            approximate: false,
        };
        let result = into_source_result(Source::Gfg, "u", Ok(stats.clone()));
        assert_eq!(result, SourceResult::Success(stats));
    }
}
