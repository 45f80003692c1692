//! Domain types shared by every codetally crate.
//!
//! Holds the closed [`Source`] set, the normalized per-account
//! [`SourceResult`] model, request validation, the identifier normalizer,
//! and environment-driven application configuration.

pub mod app_config;
pub mod config;
pub mod normalize;
pub mod request;
pub mod source;
pub mod stats;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use normalize::normalize_handle;
pub use request::{ProfileInput, ProfileRequest, RequestError};
pub use source::Source;
pub use stats::{DifficultyCounts, SourceExtra, SourceFailure, SourceResult, SourceStats};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
