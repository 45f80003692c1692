//! Analysis request shape and boundary validation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::source::Source;

/// Client-input errors raised before any network activity.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("unsupported platforms: {}. Supported: {}", .0.join(", "), Source::supported_list())]
    UnsupportedSources(Vec<String>),

    #[error("no profiles provided")]
    EmptyProfiles,
}

/// One identifier or a list of identifiers for a single source.
///
/// This is the only place the "string or list" input shape is branched on;
/// [`ProfileInput::into_identifiers`] flattens it into an ordered sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfileInput {
    One(String),
    Many(Vec<String>),
}

impl ProfileInput {
    /// Ordered identifiers with blank entries removed.
    #[must_use]
    pub fn into_identifiers(self) -> Vec<String> {
        let raw = match self {
            Self::One(s) => vec![s],
            Self::Many(v) => v,
        };
        raw.into_iter().filter(|s| !s.trim().is_empty()).collect()
    }
}

impl From<&str> for ProfileInput {
    fn from(value: &str) -> Self {
        Self::One(value.to_owned())
    }
}

impl From<Vec<String>> for ProfileInput {
    fn from(value: Vec<String>) -> Self {
        Self::Many(value)
    }
}

/// Validated mapping from source to the raw identifiers requested for it.
///
/// Identifiers are kept as given (URLs included); normalization happens in
/// the aggregator. Blank identifiers are already removed, and sources with
/// no remaining identifiers are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileRequest {
    profiles: BTreeMap<Source, Vec<String>>,
}

impl ProfileRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates a raw name-keyed request from the HTTP or CLI boundary.
    ///
    /// # Errors
    ///
    /// - [`RequestError::UnsupportedSources`] if any key is not a known source.
    /// - [`RequestError::EmptyProfiles`] if no non-blank identifier remains.
    pub fn from_raw<I>(raw: I) -> Result<Self, RequestError>
    where
        I: IntoIterator<Item = (String, ProfileInput)>,
    {
        let mut request = Self::new();
        let mut unsupported = Vec::new();

        for (name, input) in raw {
            match name.parse::<Source>() {
                Ok(source) => request.insert(source, input),
                Err(_) => unsupported.push(name),
            }
        }

        if !unsupported.is_empty() {
            unsupported.sort();
            return Err(RequestError::UnsupportedSources(unsupported));
        }
        if request.is_empty() {
            return Err(RequestError::EmptyProfiles);
        }
        Ok(request)
    }

    /// Adds identifiers for `source`, appending to any already present.
    pub fn insert(&mut self, source: Source, input: impl Into<ProfileInput>) {
        let identifiers = input.into().into_identifiers();
        if identifiers.is_empty() {
            return;
        }
        self.profiles.entry(source).or_default().extend(identifiers);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Source, &[String])> {
        self.profiles.iter().map(|(s, ids)| (*s, ids.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(entries: &[(&str, ProfileInput)]) -> Vec<(String, ProfileInput)> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect()
    }

    #[test]
    fn profile_input_deserializes_string_or_list() {
        let one: ProfileInput = serde_json::from_str("\"tourist\"").unwrap();
        assert_eq!(one, ProfileInput::One("tourist".to_owned()));

        let many: ProfileInput = serde_json::from_str("[\"a\", \"b\"]").unwrap();
        assert_eq!(
            many,
            ProfileInput::Many(vec!["a".to_owned(), "b".to_owned()])
        );
    }

    #[test]
    fn into_identifiers_drops_blank_entries_and_keeps_order() {
        let input = ProfileInput::Many(vec![
            "b".to_owned(),
            "   ".to_owned(),
            String::new(),
            "a".to_owned(),
        ]);
        assert_eq!(input.into_identifiers(), vec!["b", "a"]);
    }

    #[test]
    fn from_raw_rejects_unsupported_sources() {
        let err = ProfileRequest::from_raw(raw(&[
            ("leetcode", "x".into()),
            ("hackerrank", "y".into()),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            RequestError::UnsupportedSources(vec!["hackerrank".to_owned()])
        );
        assert!(err.to_string().contains("Supported: leetcode, codeforces, gfg"));
    }

    #[test]
    fn from_raw_rejects_empty_map() {
        let err = ProfileRequest::from_raw(Vec::new()).unwrap_err();
        assert_eq!(err, RequestError::EmptyProfiles);
    }

    #[test]
    fn from_raw_rejects_only_blank_identifiers() {
        let err = ProfileRequest::from_raw(raw(&[
            ("leetcode", "  ".into()),
            ("gfg", ProfileInput::Many(vec![])),
        ]))
        .unwrap_err();
        assert_eq!(err, RequestError::EmptyProfiles);
    }

    #[test]
    fn blank_source_is_absent_but_others_remain() {
        let request = ProfileRequest::from_raw(raw(&[
            ("leetcode", "".into()),
            ("codeforces", "tourist".into()),
        ]))
        .unwrap();
        let sources: Vec<Source> = request.iter().map(|(s, _)| s).collect();
        assert_eq!(sources, vec![Source::Codeforces]);
    }
}
