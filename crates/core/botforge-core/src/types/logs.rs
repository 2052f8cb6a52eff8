//! Action log entries surfaced to the bot builder

use crate::BotforgeError;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Log entry severity. Actions only report failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogStatus {
    /// Something went wrong
    Error,
}

/// A single log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Severity
    pub status: LogStatus,
    /// Short human-readable description
    pub description: String,
    /// Extra diagnostic details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl LogEntry {
    /// Create an error entry
    pub fn error(description: impl Into<String>) -> Self {
        Self {
            status: LogStatus::Error,
            description: description.into(),
            details: None,
        }
    }

    /// Attach details
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Whether description or details contain `needle`
    pub fn mentions(&self, needle: &str) -> bool {
        self.description.contains(needle)
            || self.details.as_deref().is_some_and(|d| d.contains(needle))
    }
}

// Plain strings are reported as failures.
impl From<&str> for LogEntry {
    fn from(s: &str) -> Self {
        LogEntry::error(s)
    }
}

impl From<String> for LogEntry {
    fn from(s: String) -> Self {
        LogEntry::error(s)
    }
}

/// Normalize an error raised at an external-call boundary into a log entry.
///
/// The entry's description is `context`; the error message goes to `details`.
pub fn parse_error(err: &BotforgeError, context: &str) -> LogEntry {
    let details = match err {
        BotforgeError::Network(e) if e.is_timeout() => format!("Request timed out: {}", e),
        BotforgeError::Network(e) if e.is_connect() => format!("Could not connect: {}", e),
        other => other.to_string(),
    };
    tracing::debug!(context, status = ?err.status_code(), "{}", details);
    LogEntry::error(context).with_details(details)
}

/// Append-only log collector handed to an action for one invocation
#[derive(Debug, Default)]
pub struct ActionLogs {
    entries: Mutex<Vec<LogEntry>>,
}

impl ActionLogs {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry
    pub fn add(&self, entry: impl Into<LogEntry>) {
        let entry = entry.into();
        tracing::debug!(status = ?entry.status, "action log: {}", entry.description);
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(entry);
    }

    /// Snapshot of all entries
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// Whether nothing was logged
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_becomes_error_entry() {
        let logs = ActionLogs::new();
        logs.add("Create speech input is empty");

        let entries = logs.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].status, LogStatus::Error);
        assert_eq!(entries[0].description, "Create speech input is empty");
        assert!(entries[0].details.is_none());
    }

    #[test]
    fn test_parse_error_uses_context_as_description() {
        let err = BotforgeError::api(500, "server melted");
        let entry = parse_error(&err, "While generating speech");

        assert_eq!(entry.status, LogStatus::Error);
        assert_eq!(entry.description, "While generating speech");
        assert_eq!(
            entry.details.as_deref(),
            Some("Provider API error (500): server melted")
        );
        assert!(entry.mentions("server melted"));
    }

    #[test]
    fn test_entry_serialization() {
        let entry = LogEntry::error("Create speech voice is empty");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["status"], "error");
        assert!(json.get("details").is_none());

        let entry = entry.with_details("voice");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["details"], "voice");
    }
}
