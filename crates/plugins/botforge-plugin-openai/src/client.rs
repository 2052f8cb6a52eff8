//! Minimal OpenAI REST client for the model catalog and speech endpoints

use botforge_core::{BotforgeError, Result};
use bytes::Bytes;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS};

/// Connection settings for one client
#[derive(Clone)]
pub struct OpenAIClientConfig {
    /// Secret API key
    pub api_key: String,
    /// Base URL override
    pub base_url: Option<String>,
    /// `api-version` query parameter
    pub api_version: Option<String>,
    /// Request timeout
    pub timeout: Duration,
}

impl OpenAIClientConfig {
    /// Config pointing at the public OpenAI API
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            api_version: None,
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Override the base URL
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        self.base_url = base_url;
        self
    }

    /// Set the `api-version` query parameter
    pub fn with_api_version(mut self, api_version: Option<String>) -> Self {
        self.api_version = api_version;
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Catalog entry returned by `GET /models`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModelInfo {
    /// Model id
    pub id: String,
    /// Creation time, unix seconds
    #[serde(default)]
    pub created: i64,
}

#[derive(Debug, Deserialize)]
struct ModelList {
    data: Vec<ModelInfo>,
}

/// Body of `POST /audio/speech`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeechRequest {
    /// Speech model
    pub model: String,
    /// Text to synthesize
    pub input: String,
    /// Voice id
    pub voice: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// OpenAI client scoped to one base URL and API version
pub struct OpenAIClient {
    http: Client,
    base_url: String,
    api_version: Option<String>,
}

impl OpenAIClient {
    /// Build a client. Sends the key both as bearer token and `api-key` header.
    pub fn new(config: OpenAIClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|e| BotforgeError::config(format!("Invalid API key: {}", e)))?;
        bearer.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, bearer);

        let mut api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| BotforgeError::config(format!("Invalid API key: {}", e)))?;
        api_key.set_sensitive(true);
        headers.insert("api-key", api_key);

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        let base_url = config
            .base_url
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            http,
            base_url,
            api_version: config.api_version.filter(|v| !v.trim().is_empty()),
        })
    }

    /// Base URL in use
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, format!("{}/{}", self.base_url, path));
        match &self.api_version {
            Some(version) => builder.query(&[("api-version", version.as_str())]),
            None => builder,
        }
    }

    /// List the full model catalog
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let response = self.request(Method::GET, "models").send().await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let body = response.bytes().await?;
        let list: ModelList = serde_json::from_slice(&body).map_err(|e| {
            BotforgeError::malformed_response(format!("model catalog: {}", e))
        })?;

        debug!("OpenAI catalog returned {} models", list.data.len());
        Ok(list.data)
    }

    /// Synthesize speech and return the raw audio
    pub async fn create_speech(&self, request: &SpeechRequest) -> Result<Bytes> {
        debug!(
            "OpenAI TTS request: model={}, voice={}, text_len={}",
            request.model,
            request.voice,
            request.input.len()
        );

        let response = self
            .request(Method::POST, "audio/speech")
            .json(request)
            .send()
            .await?;

        let audio = read_audio_response(response).await?;
        debug!("OpenAI TTS response: {} bytes", audio.len());
        Ok(audio)
    }
}

/// Turn a non-success response into an error
pub async fn error_from_response(response: Response) -> BotforgeError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorEnvelope>(&text)
        .map(|e| e.error.message)
        .unwrap_or(text);

    match status {
        StatusCode::UNAUTHORIZED => BotforgeError::auth(message),
        StatusCode::TOO_MANY_REQUESTS => BotforgeError::rate_limit(message),
        other => BotforgeError::api(other.as_u16(), message),
    }
}

/// Read a speech response into an audio buffer
pub async fn read_audio_response(response: Response) -> Result<Bytes> {
    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let body = response.bytes().await?;

    validate_audio_payload(content_type.as_deref(), body)
}

/// Check that a successful body really is audio
pub fn validate_audio_payload(content_type: Option<&str>, body: Bytes) -> Result<Bytes> {
    if let Some(ct) = content_type {
        let mime = ct.split(';').next().unwrap_or_default().trim();
        if mime.eq_ignore_ascii_case("application/json") || mime.starts_with("text/") {
            return Err(BotforgeError::malformed_response(format!(
                "expected audio, got {} body",
                mime
            )));
        }
    }

    if body.is_empty() {
        return Err(BotforgeError::malformed_response("empty audio payload"));
    }

    // Untyped bodies are sniffed: audio never starts with a JSON delimiter.
    if content_type.is_none() {
        let first = body.iter().copied().find(|b| !b.is_ascii_whitespace());
        if matches!(first, Some(b'{') | Some(b'[')) {
            return Err(BotforgeError::malformed_response(
                "expected audio, got untyped JSON body",
            ));
        }
    }

    Ok(body)
}
