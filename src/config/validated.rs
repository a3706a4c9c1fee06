//! Validated configuration after merging CLI, environment and TOML sources.
//!
//! All validation is performed during construction.

use std::fmt;
use std::path::Path;

use url::Url;

use crate::message::{TemplateMessageRequest, TemplateVariable, ValidationError};
use crate::whatsapp::ApiConfig;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::load`] to read the optional config file named by
/// `--config`, or [`ValidatedConfig::from_raw`] when the TOML is already parsed.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// API endpoint and credentials (required)
    pub api: ApiConfig,

    /// Recipient phone number (required)
    pub recipient: String,

    /// Template name
    pub template: String,

    /// Template language code
    pub language: String,

    /// Template variables in placeholder order
    pub variables: Vec<TemplateVariable>,

    /// Dry-run mode (log the payload without sending)
    pub dry_run: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ endpoint: {}, to: {}, template: {}, language: {}, variables: {}, dry_run: {} }}",
            self.api.endpoint(),
            self.recipient,
            self.template,
            self.language,
            self.variables.len(),
            self.dry_run,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments (and the environment variables clap folds into them)
    /// take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required fields are missing (`api_url`, `access_token`, `recipient`)
    /// - The endpoint URL is invalid
    /// - The access token is not a valid header value
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let api = Self::resolve_api(cli, toml)?;

        let recipient = first_non_empty(
            cli.to.as_deref(),
            toml.and_then(|t| t.message.recipient.as_deref()),
        )
        .ok_or_else(|| {
            ConfigError::missing(
                field::RECIPIENT,
                "Use --to, set RECEIVER_PHONE, or set message.recipient in config file",
            )
        })?;

        let template = first_non_empty(
            cli.template.as_deref(),
            toml.and_then(|t| t.message.template.as_deref()),
        )
        .unwrap_or(defaults::TEMPLATE);

        let language = first_non_empty(
            cli.language.as_deref(),
            toml.and_then(|t| t.message.language.as_deref()),
        )
        .unwrap_or(defaults::LANGUAGE);

        Ok(Self {
            api,
            recipient: recipient.to_string(),
            template: template.to_string(),
            language: language.to_string(),
            variables: Self::resolve_variables(cli, toml),
            dry_run: cli.dry_run,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    /// Builds the message request described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the recipient or template is empty.
    pub fn message_request(&self) -> Result<TemplateMessageRequest, ValidationError> {
        Ok(
            TemplateMessageRequest::new(self.recipient.as_str(), self.template.as_str())?
                .with_language(self.language.as_str())
                .with_variables(&self.variables),
        )
    }

    fn resolve_api(cli: &Cli, toml: Option<&TomlConfig>) -> Result<ApiConfig, ConfigError> {
        let url_str = first_non_empty(
            cli.api_url.as_deref(),
            toml.and_then(|t| t.api.url.as_deref()),
        )
        .ok_or_else(|| {
            ConfigError::missing(
                field::API_URL,
                "Use --api-url, set WHATSAPP_API_URL, or set api.url in config file",
            )
        })?;

        let token = first_non_empty(
            cli.token.as_deref(),
            toml.and_then(|t| t.api.access_token.as_deref()),
        )
        .ok_or_else(|| {
            ConfigError::missing(
                field::ACCESS_TOKEN,
                "Use --token, set ACCESS_TOKEN, or set api.access_token in config file",
            )
        })?;

        let url = Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        })?;

        ApiConfig::new(url, token).map_err(|e| ConfigError::InvalidToken {
            reason: e.to_string(),
        })
    }

    fn resolve_variables(cli: &Cli, toml: Option<&TomlConfig>) -> Vec<TemplateVariable> {
        // CLI replaces the file's list entirely
        if !cli.variables.is_empty() {
            return cli.variables.iter().map(TemplateVariable::from).collect();
        }

        toml.map(|t| t.message.variables.iter().map(TemplateVariable::from).collect())
            .unwrap_or_default()
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

fn first_non_empty<'a>(primary: Option<&'a str>, fallback: Option<&'a str>) -> Option<&'a str> {
    primary
        .filter(|s| !s.is_empty())
        .or_else(|| fallback.filter(|s| !s.is_empty()))
}
