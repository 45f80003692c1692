//! Wire types for the upstream source APIs.
//!
//! Only the fields the adapters read are modelled; everything else in the
//! upstream payloads is ignored.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// LeetCode GraphQL
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct LeetcodeResponse {
    pub data: Option<LeetcodeData>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphqlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LeetcodeData {
    pub matched_user: Option<MatchedUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MatchedUser {
    pub profile: Option<LeetcodeProfile>,
    pub submit_stats: Option<SubmitStats>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LeetcodeProfile {
    pub real_name: Option<String>,
    pub user_avatar: Option<String>,
    pub reputation: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmitStats {
    #[serde(default)]
    pub ac_submission_num: Vec<DifficultyCount>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DifficultyCount {
    pub difficulty: String,
    pub count: u64,
}

// ---------------------------------------------------------------------------
// Codeforces REST
// ---------------------------------------------------------------------------

/// Every Codeforces API response is wrapped in this envelope. On failure
/// `status` is `"FAILED"` and `comment` explains why.
#[derive(Debug, Deserialize)]
pub(crate) struct CodeforcesEnvelope<T> {
    pub status: String,
    pub comment: Option<String>,
    pub result: Option<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CodeforcesUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar: Option<String>,
    pub rating: Option<i64>,
    pub rank: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CodeforcesSubmission {
    pub verdict: Option<String>,
    pub problem: CodeforcesProblem,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CodeforcesProblem {
    pub contest_id: Option<i64>,
    pub index: String,
    pub rating: Option<u32>,
}

// ---------------------------------------------------------------------------
// GeeksforGeeks practice API
// ---------------------------------------------------------------------------

/// `results` is absent (or empty) when the practice API has nothing for the
/// user; callers fall back to the rendered profile page in that case.
#[derive(Debug, Deserialize)]
pub(crate) struct GfgStatsResponse {
    pub results: Option<serde_json::Map<String, serde_json::Value>>,
}
