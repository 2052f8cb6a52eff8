//! OpenAI block constants and the speech voice vocabulary

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// OpenAI API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Model used when the user did not pick one
pub const DEFAULT_VOICE_MODEL: &str = "tts-1";

/// Substring marking a catalog entry as speech-capable
pub const SPEECH_MODEL_MARKER: &str = "tts";

/// MIME type of synthesized audio
pub const SPEECH_MIME_TYPE: &str = "audio/mpeg";

/// File extension of synthesized audio
pub const SPEECH_FILE_EXTENSION: &str = "mp3";

/// Storage namespace under `tmp/`
pub const DEFAULT_STORAGE_NAMESPACE: &str = "openai";

/// HTTP timeout for provider calls
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// OpenAI speech voice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenAIVoice {
    /// alloy
    Alloy,
    /// ash
    Ash,
    /// coral
    Coral,
    /// echo
    Echo,
    /// fable
    Fable,
    /// onyx
    Onyx,
    /// nova
    Nova,
    /// sage
    Sage,
    /// shimmer
    Shimmer,
}

impl OpenAIVoice {
    /// Every voice, in the order shown in the dropdown
    pub const ALL: [OpenAIVoice; 9] = [
        Self::Alloy,
        Self::Ash,
        Self::Coral,
        Self::Echo,
        Self::Fable,
        Self::Onyx,
        Self::Nova,
        Self::Sage,
        Self::Shimmer,
    ];

    /// Get voice string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alloy => "alloy",
            Self::Ash => "ash",
            Self::Coral => "coral",
            Self::Echo => "echo",
            Self::Fable => "fable",
            Self::Onyx => "onyx",
            Self::Nova => "nova",
            Self::Sage => "sage",
            Self::Shimmer => "shimmer",
        }
    }
}

impl fmt::Display for OpenAIVoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OpenAIVoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| format!("unknown OpenAI voice '{}'", s))
    }
}
