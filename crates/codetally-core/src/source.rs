use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::request::RequestError;

/// The closed set of coding-practice platforms the pipeline understands.
///
/// Ordering follows declaration order, which keeps `BTreeMap<Source, _>`
/// iteration stable across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Leetcode,
    Codeforces,
    Gfg,
}

impl Source {
    pub const ALL: [Source; 3] = [Source::Leetcode, Source::Codeforces, Source::Gfg];

    /// Wire identifier used in requests, account keys, and persisted reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Source::Leetcode => "leetcode",
            Source::Codeforces => "codeforces",
            Source::Gfg => "gfg",
        }
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Source::Leetcode => "LeetCode",
            Source::Codeforces => "CodeForces",
            Source::Gfg => "GeeksforGeeks",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Source::Leetcode => "Practice coding problems and prepare for interviews",
            Source::Codeforces => "Competitive programming contests and practice",
            Source::Gfg => "Practice data structures and algorithms",
        }
    }

    /// Public profile URL template; `{username}` is the handle placeholder.
    #[must_use]
    pub fn url_format(self) -> &'static str {
        match self {
            Source::Leetcode => "https://leetcode.com/u/{username}",
            Source::Codeforces => "https://codeforces.com/profile/{username}",
            Source::Gfg => "https://www.geeksforgeeks.org/user/{username}",
        }
    }

    /// Comma-separated list of every supported identifier, for error messages.
    #[must_use]
    pub fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "leetcode" => Ok(Source::Leetcode),
            "codeforces" => Ok(Source::Codeforces),
            "gfg" => Ok(Source::Gfg),
            _ => Err(RequestError::UnsupportedSources(vec![s.to_owned()])),
        }
    }
}
