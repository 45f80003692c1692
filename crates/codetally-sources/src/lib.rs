//! Per-source adapters for LeetCode, Codeforces, and GeeksforGeeks.
//!
//! Each adapter turns one account handle into exactly one
//! [`codetally_core::SourceResult`]. Network calls run under a shared
//! [`RetryPolicy`]; the [`SourceRegistry`] is how the aggregator finds the
//! adapter for a source, and how tests substitute fakes.

pub mod codeforces;
pub mod error;
pub mod gfg;
pub(crate) mod http;
pub mod leetcode;
pub mod registry;
pub mod retry;
pub(crate) mod types;

pub use codeforces::CodeforcesAdapter;
pub use error::SourceError;
pub use gfg::GfgAdapter;
pub use http::SourceHttp;
pub use leetcode::LeetcodeAdapter;
pub use registry::{SourceAdapter, SourceRegistry};
pub use retry::RetryPolicy;
