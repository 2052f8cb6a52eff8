//! Fetchers: read-only queries that populate dynamic dropdowns

use super::LogEntry;
use serde::{Deserialize, Serialize};

/// Fetcher declaration exposed to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetcherDefinition {
    /// Fetcher id, referenced by an option field's layout
    pub id: String,
    /// Option keys whose change should trigger a refetch
    pub dependencies: Vec<String>,
}

impl FetcherDefinition {
    /// Create a fetcher declaration
    pub fn new<I, S>(id: impl Into<String>, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            dependencies: dependencies.into_iter().map(Into::into).collect(),
        }
    }
}

/// Outcome of a fetcher: either data or an error, never both
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FetcherResult {
    /// Dropdown values
    Data {
        /// Values, in display order
        data: Vec<String>,
    },
    /// Diagnostic to show next to the field
    Error {
        /// Normalized error
        error: LogEntry,
    },
}

impl FetcherResult {
    /// Successful result
    pub fn data(data: Vec<String>) -> Self {
        FetcherResult::Data { data }
    }

    /// Empty list, used when the block is not configured yet
    pub fn empty() -> Self {
        FetcherResult::Data { data: Vec::new() }
    }

    /// Failed result
    pub fn error(error: LogEntry) -> Self {
        FetcherResult::Error { error }
    }

    /// Failed result for a fetcher id the action does not declare
    pub fn unknown_fetcher(fetcher_id: &str, action: &str) -> Self {
        FetcherResult::error(LogEntry::error(format!(
            "Unknown fetcher '{}' for action '{}'",
            fetcher_id, action
        )))
    }

    /// Values, if successful
    pub fn values(&self) -> Option<&[String]> {
        match self {
            FetcherResult::Data { data } => Some(data),
            FetcherResult::Error { .. } => None,
        }
    }

    /// Error, if failed
    pub fn error_entry(&self) -> Option<&LogEntry> {
        match self {
            FetcherResult::Data { .. } => None,
            FetcherResult::Error { error } => Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetcher_result_json() {
        let ok = serde_json::to_value(FetcherResult::data(vec!["a".into()])).unwrap();
        assert_eq!(ok, serde_json::json!({ "data": ["a"] }));

        let err = serde_json::to_value(FetcherResult::error(LogEntry::error("boom"))).unwrap();
        assert_eq!(err["error"]["description"], "boom");
        assert!(err.get("data").is_none());
    }

    #[test]
    fn test_accessors() {
        let ok = FetcherResult::empty();
        assert_eq!(ok.values(), Some(&[][..]));
        assert!(ok.error_entry().is_none());

        let unknown = FetcherResult::unknown_fetcher("fetchVoices", "Create speech");
        assert!(unknown.values().is_none());
        assert!(unknown.error_entry().unwrap().mentions("fetchVoices"));
    }
}
