//! OpenAI block credentials

use botforge_core::{OptionField, OptionsSchema};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Credentials stored by the host for an OpenAI block
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenAICredentials {
    /// Secret API key
    pub api_key: String,
}

impl OpenAICredentials {
    /// Create credentials
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// Whether a usable key is present
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl fmt::Debug for OpenAICredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAICredentials")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Credentials form shown by the host
pub fn auth_schema() -> OptionsSchema {
    OptionsSchema::new(vec![OptionField::secret("apiKey")
        .with_label("API key")
        .with_placeholder("sk-...")
        .with_help_text("You can generate an API key in your OpenAI dashboard.")])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_key() {
        let creds = OpenAICredentials::new("sk-secret");
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_credentials_keys_match_schema() {
        let json = serde_json::to_value(OpenAICredentials::new("k")).unwrap();
        let keys: Vec<&str> = json
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, auth_schema().keys());
    }

    #[test]
    fn test_blank_key_is_not_usable() {
        assert!(!OpenAICredentials::new("  ").has_api_key());
        assert!(OpenAICredentials::new("sk").has_api_key());
    }
}
