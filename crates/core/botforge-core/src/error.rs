//! Error types for Botforge actions

use thiserror::Error;

/// Main error type for Botforge operations
#[derive(Debug, Error)]
pub enum BotforgeError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network/HTTP transport error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("Provider API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message extracted from the provider's error body
        message: String,
    },

    /// Authentication/authorization error
    #[error("Auth error: {0}")]
    Auth(String),

    /// Rate limit error
    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    /// Provider response did not have the expected shape
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    /// Object storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenient Result type using BotforgeError
pub type Result<T> = std::result::Result<T, BotforgeError>;

impl BotforgeError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        BotforgeError::Config(msg.into())
    }

    /// Create a provider API error
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        BotforgeError::Api {
            status,
            message: message.into(),
        }
    }

    /// Create an auth error
    pub fn auth(msg: impl Into<String>) -> Self {
        BotforgeError::Auth(msg.into())
    }

    /// Create a rate limit error
    pub fn rate_limit(msg: impl Into<String>) -> Self {
        BotforgeError::RateLimit(msg.into())
    }

    /// Create a malformed response error
    pub fn malformed_response(msg: impl Into<String>) -> Self {
        BotforgeError::MalformedResponse(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        BotforgeError::Storage(msg.into())
    }

    /// HTTP status carried by the error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            BotforgeError::Api { status, .. } => Some(*status),
            BotforgeError::Auth(_) => Some(401),
            BotforgeError::RateLimit(_) => Some(429),
            BotforgeError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
