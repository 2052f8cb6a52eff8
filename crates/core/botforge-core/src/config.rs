//! Configuration management and environment variable loading

use crate::{BotforgeError, Result};
use std::env;

/// Load environment variables from .env file
///
/// Looks in the current directory and its parents. Safe to call more than once.
///
/// # Example
///
/// ```no_run
/// use botforge_core::load_env;
///
/// load_env().ok();
/// let api_key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
/// ```
pub fn load_env() -> Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::info!("Loaded environment from: {}", path.display());
            Ok(())
        }
        Err(dotenvy::Error::LineParse(line, pos)) => Err(BotforgeError::config(format!(
            "Failed to parse .env file at line {}, position {}",
            line, pos
        ))),
        Err(dotenvy::Error::Io(_)) => {
            tracing::warn!("No .env file found - using system environment variables only");
            Ok(())
        }
        Err(e) => Err(BotforgeError::config(format!(
            "Failed to load .env file: {}",
            e
        ))),
    }
}

/// Get optional environment variable with default
pub fn get_env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get an environment variable, treating empty values as unset
pub fn get_env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get environment variable as integer
pub fn get_env_int<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
