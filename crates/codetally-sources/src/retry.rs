//! Bounded retry with exponential back-off for source calls.
//!
//! [`RetryPolicy`] wraps one fallible network call (request plus payload
//! parsing) and retries every failure except terminal ones: a source saying
//! the account does not exist, or a misconfigured base URL. The sleep
//! function is injectable so the schedule is testable without waiting.

use std::future::Future;
use std::time::Duration;

use codetally_core::AppConfig;

use crate::error::SourceError;

/// Returns `true` for errors that are worth another attempt.
///
/// **Retriable:** network failures and timeouts, any non-2xx status,
/// malformed or failed payload envelopes.
///
/// **Not retriable:** [`SourceError::NotFound`] and
/// [`SourceError::InvalidBaseUrl`]. Retrying cannot change either outcome.
pub(crate) fn is_retriable(err: &SourceError) -> bool {
    match err {
        SourceError::Http(_)
        | SourceError::UnexpectedStatus { .. }
        | SourceError::Deserialize { .. }
        | SourceError::Api(_)
        | SourceError::AllStrategiesFailed { .. } => true,
        SourceError::NotFound { .. } | SourceError::InvalidBaseUrl { .. } => false,
    }
}

/// Attempt budget and back-off schedule applied around each network call.
///
/// Schedule with the defaults (`base_delay = 2s`, `multiplier = 2`,
/// `max_delay = 10s`, `max_attempts = 3`):
///
/// | Failed attempt | Sleep before next attempt |
/// |----------------|---------------------------|
/// | 1              | 2 s                       |
/// | 2              | 4 s                       |
/// | 3              | none (budget exhausted)   |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. Treated as at least 1.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub multiplier: u32,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
            multiplier: 2,
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            max_attempts: config.source_max_attempts,
            base_delay: Duration::from_secs(config.source_backoff_base_secs),
            multiplier: 2,
            max_delay: Duration::from_secs(config.source_backoff_max_secs),
        }
    }

    /// Same attempt budget, zero delay. Intended for tests against mock servers.
    #[must_use]
    pub fn without_delay(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            base_delay: Duration::ZERO,
            multiplier: 2,
            max_delay: Duration::ZERO,
        }
    }

    /// Delay after the `failed_attempt`-th failure (1-based):
    /// `base_delay * multiplier^(failed_attempt - 1)`, capped at `max_delay`.
    #[must_use]
    pub fn delay_after(&self, failed_attempt: u32) -> Duration {
        let exponent = failed_attempt.saturating_sub(1);
        let factor = self.multiplier.saturating_pow(exponent);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }

    /// Runs `operation` under this policy, sleeping with `tokio::time::sleep`.
    ///
    /// # Errors
    ///
    /// Returns the first non-retriable error, or the last error once the
    /// attempt budget is exhausted.
    pub async fn run<T, F, Fut>(&self, operation: F) -> Result<T, SourceError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, SourceError>>,
    {
        self.run_with_sleep(tokio::time::sleep, operation).await
    }

    /// Runs `operation` under this policy with an injected sleep function.
    ///
    /// # Errors
    ///
    /// Same as [`RetryPolicy::run`].
    pub async fn run_with_sleep<T, F, Fut, S, SleepFut>(
        &self,
        mut sleep: S,
        mut operation: F,
    ) -> Result<T, SourceError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, SourceError>>,
        S: FnMut(Duration) -> SleepFut,
        SleepFut: Future<Output = ()>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1u32;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    if !is_retriable(&err) || attempt >= max_attempts {
                        return Err(err);
                    }
                    let delay = self.delay_after(attempt);
                    #[allow(clippy::cast_possible_truncation)]
                    let delay_ms = delay.as_millis() as u64;
                    tracing::warn!(
                        attempt,
                        max_attempts,
                        delay_ms,
                        error = %err,
                        "transient source error, retrying after back-off"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
