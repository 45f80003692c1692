//! Shared HTTP plumbing for every source adapter.

use std::time::Duration;

use codetally_core::AppConfig;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::SourceError;
use crate::retry::RetryPolicy;

/// A configured `reqwest::Client` plus the retry policy every adapter
/// applies around its calls. Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct SourceHttp {
    client: Client,
    retry: RetryPolicy,
}

impl SourceHttp {
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout: Duration,
        user_agent: &str,
        retry: RetryPolicy,
    ) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, retry })
    }

    /// # Errors
    ///
    /// Same as [`SourceHttp::new`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, SourceError> {
        Self::new(
            config.source_request_timeout(),
            &config.source_user_agent,
            RetryPolicy::from_app_config(config),
        )
    }

    #[must_use]
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    /// Sends one request and buffers the body. Status interpretation is left
    /// to the caller.
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<RawResponse, SourceError> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().to_string();
        let body = response.text().await?;
        Ok(RawResponse { status, url, body })
    }
}

/// A fully buffered response.
#[derive(Debug)]
pub(crate) struct RawResponse {
    pub status: StatusCode,
    pub url: String,
    pub body: String,
}

impl RawResponse {
    /// 404 becomes [`SourceError::NotFound`]; any other non-2xx becomes
    /// [`SourceError::UnexpectedStatus`].
    pub fn ensure_success(self, handle: &str) -> Result<Self, SourceError> {
        if self.status == StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound {
                handle: handle.to_owned(),
            });
        }
        if !self.status.is_success() {
            return Err(SourceError::UnexpectedStatus {
                status: self.status.as_u16(),
                url: self.url,
            });
        }
        Ok(self)
    }

    pub fn json<T: DeserializeOwned>(&self, context: &str) -> Result<T, SourceError> {
        serde_json::from_str(&self.body).map_err(|source| SourceError::Deserialize {
            context: context.to_owned(),
            source,
        })
    }
}

/// Parses `base_url` and appends `path`, keeping any path prefix already on
/// the base (so mock servers can be mounted under a sub-path).
pub(crate) fn endpoint(base_url: &str, path: &str) -> Result<Url, SourceError> {
    let joined = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&joined).map_err(|e| SourceError::InvalidBaseUrl {
        base_url: base_url.to_owned(),
        reason: e.to_string(),
    })
}
