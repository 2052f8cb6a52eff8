//! Declarative option schemas consumed by the host's form renderer

use serde::{Deserialize, Serialize};

/// Value kind of an option field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OptionKind {
    /// Free-form string
    String,
    /// Secret string (rendered masked)
    Secret,
    /// One value out of a fixed vocabulary
    Enum {
        /// Allowed values
        values: Vec<String>,
    },
}

/// Input widget hint for the form renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputType {
    /// Multi-line text area
    Textarea,
    /// Dropdown listing the bot's variables
    VariableDropdown,
    /// Password-style masked input
    Password,
}

/// Layout metadata, opaque to action logic
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionLayout {
    /// Field label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Placeholder text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Widget hint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_type: Option<InputType>,
    /// Value pre-filled by the renderer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,
    /// Fetcher id populating this field's dropdown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetcher: Option<String>,
    /// Extra help text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}

/// A single option field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionField {
    /// Key under which the value is stored in the options object
    pub key: String,
    /// Value kind
    pub kind: OptionKind,
    /// Layout metadata
    pub layout: OptionLayout,
}

impl OptionField {
    /// Create a string field
    pub fn string(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: OptionKind::String,
            layout: OptionLayout::default(),
        }
    }

    /// Create a secret field
    pub fn secret(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: OptionKind::Secret,
            layout: OptionLayout {
                input_type: Some(InputType::Password),
                ..Default::default()
            },
        }
    }

    /// Create an enum field
    pub fn enumeration<I, S>(key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: key.into(),
            kind: OptionKind::Enum {
                values: values.into_iter().map(Into::into).collect(),
            },
            layout: OptionLayout::default(),
        }
    }

    /// Set label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.layout.label = Some(label.into());
        self
    }

    /// Set placeholder
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.layout.placeholder = Some(placeholder.into());
        self
    }

    /// Set input type
    pub fn with_input_type(mut self, input_type: InputType) -> Self {
        self.layout.input_type = Some(input_type);
        self
    }

    /// Set default value
    pub fn with_default(mut self, default: impl Into<serde_json::Value>) -> Self {
        self.layout.default_value = Some(default.into());
        self
    }

    /// Attach a fetcher
    pub fn with_fetcher(mut self, fetcher_id: impl Into<String>) -> Self {
        self.layout.fetcher = Some(fetcher_id.into());
        self
    }

    /// Set help text
    pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
        self.layout.help_text = Some(help_text.into());
        self
    }
}

/// Ordered list of option fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionsSchema {
    /// Fields, in rendering order
    pub fields: Vec<OptionField>,
}

impl OptionsSchema {
    /// Create a schema from fields
    pub fn new(fields: Vec<OptionField>) -> Self {
        Self { fields }
    }

    /// Append another schema's fields after this one's
    pub fn extend(mut self, other: OptionsSchema) -> Self {
        self.fields.extend(other.fields);
        self
    }

    /// Field keys, in order
    pub fn keys(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.key.as_str()).collect()
    }

    /// Look up a field by key
    pub fn field(&self, key: &str) -> Option<&OptionField> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Render as JSON for the host's form renderer
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
