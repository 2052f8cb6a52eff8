//! OpenAI block for Botforge
//!
//! Provides the "Create speech" action: text is synthesized with the OpenAI
//! speech API, the audio is uploaded through the host's file uploader and the
//! resulting URL is saved in a bot variable.
//!
//! ## Configuration
//!
//! - `OPENAI_BASE_URL` - default API base URL (bots may override it)
//! - `OPENAI_API_VERSION` - default `api-version` query parameter (Azure)
//! - `OPENAI_TTS_DEFAULT_MODEL` - model used when none is selected
//! - `OPENAI_REQUEST_TIMEOUT_SECS` - HTTP timeout for provider calls
//! - `BOTFORGE_STORAGE_NAMESPACE` - namespace of uploaded object keys
//!
//! ## Usage
//!
//! ```ignore
//! use botforge_plugin_openai::OpenAIPlugin;
//!
//! let plugin = OpenAIPlugin::from_env();
//! let action = plugin.action("Create speech").unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

use async_trait::async_trait;
use botforge_core::{
    load_env, Action, Logger, OptionsSchema, Plugin, Result, TypedActionWrapper,
};
use std::collections::HashMap;
use std::sync::Arc;

pub mod actions;
pub mod auth;
pub mod base_options;
pub mod client;
pub mod config;
pub mod constants;
pub mod fetchers;

pub use actions::*;
pub use auth::OpenAICredentials;
pub use base_options::OpenAIBaseOptions;
pub use botforge_core;
pub use client::{ModelInfo, OpenAIClient, OpenAIClientConfig, SpeechRequest};
pub use config::OpenAIBlockConfig;
pub use constants::OpenAIVoice;
pub use fetchers::{fetch_speech_models, select_speech_models, FETCH_SPEECH_MODELS};

struct SettingRow {
    name: String,
    value: String,
    source: String,
}

// Widths count chars, so multi-byte values are cut on a char boundary.
fn pad(s: &str, w: usize) -> String {
    let out: String = s.chars().take(w).collect();
    let pad_len = w.saturating_sub(out.chars().count());
    out + &" ".repeat(pad_len)
}

fn setting_row(env_key: &str, value: String) -> SettingRow {
    SettingRow {
        name: env_key.to_string(),
        value,
        source: if std::env::var(env_key).is_ok() {
            "env".to_string()
        } else {
            "default".to_string()
        },
    }
}

fn render(plugin: &str, rows: Vec<SettingRow>) {
    let line = "-".repeat(62);
    tracing::info!("+{}+", line);
    tracing::info!("|{}|", pad(&format!(" {} settings", plugin), 62));
    tracing::info!("+{}+", "=".repeat(62));
    tracing::info!(
        "|{}|{}|{}|",
        pad("Setting", 28),
        pad("Value", 24),
        pad("Source", 8)
    );
    tracing::info!("+{}+", line);
    for r in rows {
        tracing::info!(
            "|{}|{}|{}|",
            pad(&r.name, 28),
            pad(&r.value, 24),
            pad(&r.source, 8)
        );
    }
    tracing::info!("+{}+", line);
}

/// OpenAI block plugin
pub struct OpenAIPlugin {
    config: OpenAIBlockConfig,
}

impl OpenAIPlugin {
    /// Create a new OpenAI plugin
    pub fn new(config: OpenAIBlockConfig) -> Self {
        Self { config }
    }

    /// Load `.env`, then build configuration from environment variables
    pub fn from_env() -> Self {
        if let Err(e) = load_env() {
            tracing::warn!("Ignoring .env file: {}", e);
        }
        Self::new(OpenAIBlockConfig::from_env())
    }

    /// Block configuration
    pub fn config(&self) -> &OpenAIBlockConfig {
        &self.config
    }
}

impl Default for OpenAIPlugin {
    fn default() -> Self {
        Self::new(OpenAIBlockConfig::default())
    }
}

#[async_trait]
impl Plugin for OpenAIPlugin {
    fn name(&self) -> &str {
        "openai"
    }

    fn description(&self) -> &str {
        "OpenAI text-to-speech with uploaded audio URLs"
    }

    async fn init(&self, _config: HashMap<String, String>) -> Result<()> {
        let rows = vec![
            setting_row("OPENAI_BASE_URL", self.config.default_base_url.clone()),
            setting_row(
                "OPENAI_API_VERSION",
                self.config
                    .default_api_version
                    .clone()
                    .unwrap_or_else(|| "<not set>".to_string()),
            ),
            setting_row(
                "OPENAI_TTS_DEFAULT_MODEL",
                self.config.default_voice_model.clone(),
            ),
            setting_row(
                "OPENAI_REQUEST_TIMEOUT_SECS",
                self.config.request_timeout_secs.to_string(),
            ),
            setting_row(
                "BOTFORGE_STORAGE_NAMESPACE",
                self.config.storage_namespace.clone(),
            ),
        ];
        render(self.name(), rows);

        let logger = Logger::new(self.name());
        if self.config.request_timeout_secs == 0 {
            logger.warn("OPENAI_REQUEST_TIMEOUT_SECS is 0, provider calls will time out");
        }
        logger.info(&format!("{} action(s) registered", self.actions().len()));
        Ok(())
    }

    fn auth_schema(&self) -> Option<OptionsSchema> {
        Some(auth::auth_schema())
    }

    fn base_options_schema(&self) -> OptionsSchema {
        base_options::base_options_schema()
    }

    fn actions(&self) -> Vec<Arc<dyn Action>> {
        vec![Arc::new(TypedActionWrapper::new(CreateSpeechAction::new(
            self.config.clone(),
        )))]
    }
}
