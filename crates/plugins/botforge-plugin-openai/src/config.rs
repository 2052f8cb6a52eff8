//! Configuration for the OpenAI block

use botforge_core::{get_env_int, get_env_opt, get_env_or};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::*;

/// Block-level configuration, independent of per-bot credentials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAIBlockConfig {
    /// Base URL used when the bot does not override it
    pub default_base_url: String,

    /// API version sent when the bot does not set one
    pub default_api_version: Option<String>,

    /// Speech model used when the bot did not pick one
    pub default_voice_model: String,

    /// Substring identifying speech models in the catalog
    pub speech_model_marker: String,

    /// Namespace segment of uploaded object keys
    pub storage_namespace: String,

    /// HTTP timeout for provider calls, in seconds
    pub request_timeout_secs: u64,
}

impl Default for OpenAIBlockConfig {
    fn default() -> Self {
        Self {
            default_base_url: DEFAULT_BASE_URL.to_string(),
            default_api_version: None,
            default_voice_model: DEFAULT_VOICE_MODEL.to_string(),
            speech_model_marker: SPEECH_MODEL_MARKER.to_string(),
            storage_namespace: DEFAULT_STORAGE_NAMESPACE.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl OpenAIBlockConfig {
    /// Build configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_base_url: get_env_or("OPENAI_BASE_URL", &defaults.default_base_url),
            default_api_version: get_env_opt("OPENAI_API_VERSION"),
            default_voice_model: get_env_or(
                "OPENAI_TTS_DEFAULT_MODEL",
                &defaults.default_voice_model,
            ),
            speech_model_marker: defaults.speech_model_marker,
            storage_namespace: get_env_or(
                "BOTFORGE_STORAGE_NAMESPACE",
                &defaults.storage_namespace,
            ),
            request_timeout_secs: get_env_int(
                "OPENAI_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            ),
        }
    }

    /// Request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
