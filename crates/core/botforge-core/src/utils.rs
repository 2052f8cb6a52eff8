//! Utility functions and helpers

use serde::{Deserialize, Deserializer};
use std::fmt::Display;
use std::str::FromStr;
use uuid::Uuid;

/// Generate a collision-resistant id suitable for object keys
pub fn create_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Deserialize an optional value from a string, treating `""` like a missing value
pub fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
