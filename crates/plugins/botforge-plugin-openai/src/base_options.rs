//! Options shared by every action of the OpenAI block

use botforge_core::{empty_string_as_none, OptionField, OptionsSchema};
use serde::{Deserialize, Serialize};

/// Endpoint overrides, e.g. for Azure OpenAI deployments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenAIBaseOptions {
    /// Alternative API base URL
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub base_url: Option<String>,

    /// Value of the `api-version` query parameter
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub api_version: Option<String>,
}

/// Base options form
pub fn base_options_schema() -> OptionsSchema {
    OptionsSchema::new(vec![
        OptionField::string("baseUrl")
            .with_label("Base URL")
            .with_default(crate::constants::DEFAULT_BASE_URL),
        OptionField::string("apiVersion")
            .with_label("API version")
            .with_help_text("Only required for Azure OpenAI deployments."),
    ])
}
