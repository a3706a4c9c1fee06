//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;
use crate::message::TemplateVariable;

/// Root configuration structure from TOML file.
///
/// All fields are optional so a file can hold only part of the
/// configuration and leave the rest to CLI flags or the environment.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// API endpoint and credentials
    #[serde(default)]
    pub api: ApiSection,

    /// Message to send
    #[serde(default)]
    pub message: MessageSection,
}

/// API configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSection {
    /// Messages endpoint URL
    pub url: Option<String>,

    /// Bearer access token
    pub access_token: Option<String>,
}

/// Message configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MessageSection {
    /// Recipient phone number
    pub recipient: Option<String>,

    /// Template name (default: `hello_world`)
    pub template: Option<String>,

    /// Template language code (default: `en_US`)
    pub language: Option<String>,

    /// Template variables in placeholder order
    #[serde(default)]
    pub variables: Vec<VariableValue>,
}

/// A template variable as written in the config file.
///
/// Numbers and booleans are accepted and sent as their text form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    /// A string value
    Text(String),
    /// An integer value
    Integer(i64),
    /// A floating-point value
    Float(f64),
    /// A boolean value
    Boolean(bool),
}

impl From<&VariableValue> for TemplateVariable {
    fn from(value: &VariableValue) -> Self {
        match value {
            VariableValue::Text(s) => s.into(),
            VariableValue::Integer(i) => (*i).into(),
            VariableValue::Float(f) => (*f).into(),
            VariableValue::Boolean(b) => (*b).into(),
        }
    }
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r##"# wa-template configuration file
#
# CLI flags override everything here. The endpoint, token and recipient
# can also come from WHATSAPP_API_URL, ACCESS_TOKEN and RECEIVER_PHONE
# (a .env file in the working directory is read on startup).

[api]
# Messages endpoint (required)
# url = "https://graph.facebook.com/v21.0/<phone-number-id>/messages"

# Access token, sent as "Authorization: Bearer <token>" (required)
# access_token = "your-token-here"

[message]
# Recipient phone number in international format (required)
# recipient = "15551234567"

# Approved template name (default: hello_world)
# template = "hello_world"

# Template language code (default: en_US)
# language = "en_US"

# Values for the body placeholders {{1}}, {{2}}, ... in order.
# Numbers are sent as text. --var flags REPLACE this list.
# variables = ["Alice", "#1042", 3]
"##
    .to_string()
}
