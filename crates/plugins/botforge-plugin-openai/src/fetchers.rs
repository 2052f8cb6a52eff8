//! Dropdown fetchers of the OpenAI block

use botforge_core::{parse_error, FetcherDefinition, FetcherResult};
use tracing::{debug, info};

use crate::auth::OpenAICredentials;
use crate::base_options::OpenAIBaseOptions;
use crate::client::{ModelInfo, OpenAIClient, OpenAIClientConfig};
use crate::config::OpenAIBlockConfig;

/// Id of the speech model fetcher
pub const FETCH_SPEECH_MODELS: &str = "fetchSpeechModels";

/// Declaration of the speech model fetcher
pub fn speech_models_fetcher() -> FetcherDefinition {
    FetcherDefinition::new(FETCH_SPEECH_MODELS, ["baseUrl", "apiVersion"])
}

/// Keep speech-capable models, newest first, as ids
pub fn select_speech_models(mut models: Vec<ModelInfo>, marker: &str) -> Vec<String> {
    models.retain(|m| m.id.contains(marker));
    models.sort_by(|a, b| b.created.cmp(&a.created));
    models.into_iter().map(|m| m.id).collect()
}

/// Build a client from credentials, block config and per-bot overrides
pub(crate) fn client_config(
    config: &OpenAIBlockConfig,
    credentials: &OpenAICredentials,
    options: Option<&OpenAIBaseOptions>,
) -> OpenAIClientConfig {
    let base_url = options
        .and_then(|o| o.base_url.clone())
        .unwrap_or_else(|| config.default_base_url.clone());
    let api_version = options
        .and_then(|o| o.api_version.clone())
        .or_else(|| config.default_api_version.clone());

    OpenAIClientConfig::new(credentials.api_key.clone())
        .with_base_url(Some(base_url))
        .with_api_version(api_version)
        .with_timeout(config.request_timeout())
}

/// List speech models for the model dropdown.
///
/// Without an API key this returns an empty list: the block is simply not configured yet.
pub async fn fetch_speech_models(
    config: &OpenAIBlockConfig,
    credentials: Option<&OpenAICredentials>,
    options: Option<&OpenAIBaseOptions>,
) -> FetcherResult {
    let Some(credentials) = credentials.filter(|c| c.has_api_key()) else {
        debug!("No OpenAI API key configured, returning no speech models");
        return FetcherResult::empty();
    };

    let context = "While fetching OpenAI speech models";

    let client = match OpenAIClient::new(client_config(config, credentials, options)) {
        Ok(client) => client,
        Err(e) => return FetcherResult::error(parse_error(&e, context)),
    };

    match client.list_models().await {
        Ok(models) => {
            let ids = select_speech_models(models, &config.speech_model_marker);
            info!("Found {} OpenAI speech models", ids.len());
            FetcherResult::data(ids)
        }
        Err(e) => FetcherResult::error(parse_error(&e, context)),
    }
}
