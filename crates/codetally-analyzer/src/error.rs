use thiserror::Error;

/// Input to the insight engine that no aggregation run could have produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InsightError {
    #[error("unique problem count {unique} exceeds total {total}")]
    UniqueExceedsTotal { unique: u64, total: u64 },

    #[error("aggregated {field} count {overall} does not match the sum over successful accounts ({accounts})")]
    InconsistentBuckets {
        field: &'static str,
        overall: u64,
        accounts: u64,
    },
}
