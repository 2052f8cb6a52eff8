//! Create Speech Action
//!
//! Synthesizes text with OpenAI, uploads the audio and stores its URL in a variable.

use async_trait::async_trait;
use botforge_core::{
    create_id, empty_string_as_none, parse_error, FetcherDefinition, FetcherResult, HostContext,
    InputType, OptionField, OptionsSchema, Result, TypedAction, UploadFile, VariableUpdate,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::auth::OpenAICredentials;
use crate::base_options::OpenAIBaseOptions;
use crate::client::{OpenAIClient, SpeechRequest};
use crate::config::OpenAIBlockConfig;
use crate::constants::{OpenAIVoice, SPEECH_FILE_EXTENSION, SPEECH_MIME_TYPE};
use crate::fetchers::{
    client_config, fetch_speech_models, speech_models_fetcher, FETCH_SPEECH_MODELS,
};

/// Options of the "Create speech" action
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpeechOptions {
    /// Block-wide endpoint overrides
    #[serde(flatten)]
    pub base: OpenAIBaseOptions,

    /// Speech model; the block default applies when unset
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub model: Option<String>,

    /// Text to synthesize
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub input: Option<String>,

    /// Voice
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub voice: Option<OpenAIVoice>,

    /// Variable receiving the audio URL
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub save_url_in_variable_id: Option<String>,
}

/// Options that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechJob {
    /// Text to synthesize
    pub input: String,
    /// Voice
    pub voice: OpenAIVoice,
    /// Variable receiving the audio URL
    pub variable_id: String,
}

impl CreateSpeechOptions {
    /// Check required options in order: input, voice, destination variable.
    /// Returns the log message of the first missing one.
    pub fn validate(&self) -> std::result::Result<SpeechJob, &'static str> {
        let input = self.input.clone().ok_or("Create speech input is empty")?;
        let voice = self.voice.ok_or("Create speech voice is empty")?;
        let variable_id = self
            .save_url_in_variable_id
            .clone()
            .ok_or("Create speech save variable is empty")?;

        Ok(SpeechJob {
            input,
            voice,
            variable_id,
        })
    }

    /// Model to call, falling back to `default_model`
    pub fn resolved_model(&self, default_model: &str) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| default_model.to_string())
    }
}

/// Option schema of the "Create speech" action
pub fn create_speech_schema(config: &OpenAIBlockConfig) -> OptionsSchema {
    OptionsSchema::new(vec![
        OptionField::string("model")
            .with_fetcher(FETCH_SPEECH_MODELS)
            .with_default(config.default_voice_model.clone())
            .with_placeholder("Select a model"),
        OptionField::string("input")
            .with_label("Input")
            .with_input_type(InputType::Textarea),
        OptionField::enumeration("voice", OpenAIVoice::ALL.iter().map(|v| v.as_str()))
            .with_label("Voice")
            .with_placeholder("Select a voice"),
        OptionField::string("saveUrlInVariableId")
            .with_label("Save URL in variable")
            .with_input_type(InputType::VariableDropdown),
    ])
}

/// Action turning text into an audio file URL
pub struct CreateSpeechAction {
    config: OpenAIBlockConfig,
}

impl CreateSpeechAction {
    /// Create a new create speech action
    pub fn new(config: OpenAIBlockConfig) -> Self {
        Self { config }
    }

    /// Object key for a new audio file
    pub fn storage_key(&self) -> String {
        format!(
            "tmp/{}/audio/{}.{}",
            self.config.storage_namespace,
            create_id(),
            SPEECH_FILE_EXTENSION
        )
    }

    async fn synthesize_and_upload(
        &self,
        credentials: &OpenAICredentials,
        options: &CreateSpeechOptions,
        job: &SpeechJob,
        host: HostContext<'_>,
    ) -> Result<String> {
        let client = OpenAIClient::new(client_config(
            &self.config,
            credentials,
            Some(&options.base),
        ))?;

        let request = SpeechRequest {
            model: options.resolved_model(&self.config.default_voice_model),
            input: job.input.clone(),
            voice: job.voice.as_str().to_string(),
        };

        info!(
            "Generating speech: model={}, voice={}, text_len={}",
            request.model,
            request.voice,
            request.input.len()
        );

        let audio = client.create_speech(&request).await?;

        let file = UploadFile::new(audio, self.storage_key(), SPEECH_MIME_TYPE);
        debug!("Uploading {} bytes to {}", file.bytes.len(), file.key);
        host.uploader.upload(file).await
    }
}

#[async_trait]
impl TypedAction for CreateSpeechAction {
    type Credentials = OpenAICredentials;
    type Options = CreateSpeechOptions;
    type FetchOptions = OpenAIBaseOptions;

    fn name(&self) -> &str {
        "Create speech"
    }

    fn options_schema(&self) -> OptionsSchema {
        create_speech_schema(&self.config)
    }

    fn fetchers(&self) -> Vec<FetcherDefinition> {
        vec![speech_models_fetcher()]
    }

    fn set_variable_ids(&self, options: &CreateSpeechOptions) -> Vec<String> {
        options.save_url_in_variable_id.iter().cloned().collect()
    }

    async fn fetch(
        &self,
        _fetcher_id: &str,
        credentials: Option<OpenAICredentials>,
        options: Option<OpenAIBaseOptions>,
    ) -> FetcherResult {
        fetch_speech_models(&self.config, credentials.as_ref(), options.as_ref()).await
    }

    async fn run(
        &self,
        credentials: OpenAICredentials,
        options: CreateSpeechOptions,
        host: HostContext<'_>,
    ) {
        let job = match options.validate() {
            Ok(job) => job,
            Err(message) => {
                debug!("Create speech skipped: {}", message);
                return host.logs.add(message);
            }
        };

        match self
            .synthesize_and_upload(&credentials, &options, &job, host)
            .await
        {
            Ok(url) => {
                info!("Speech stored at {}", url);
                host.variables
                    .set(vec![VariableUpdate::new(job.variable_id, url)]);
            }
            Err(e) => {
                warn!("Create speech failed: {}", e);
                host.logs.add(parse_error(&e, "While generating speech"));
            }
        }
    }
}
