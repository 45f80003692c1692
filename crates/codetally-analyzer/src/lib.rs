//! Aggregation, overlap estimation, and rule-based insights.
//!
//! [`Analyzer::analyze`] drives the source adapters for a validated
//! [`codetally_core::ProfileRequest`], folds the per-account results, and
//! returns an [`AnalysisReport`]. The insight engine is exposed separately as
//! the pure function [`derive_insights`].

pub mod aggregate;
pub mod error;
pub mod insights;
pub mod overlap;
pub mod report;

pub use aggregate::{plan, AggregateState, Analyzer, PlannedFetch};
pub use error::InsightError;
pub use insights::{derive_insights, InsightBundle};
pub use overlap::{estimate, OverlapEstimate};
pub use report::{AnalysisReport, OverallCounts, OverallStats};
