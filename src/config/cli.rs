//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// wa-template: WhatsApp template message sender
///
/// Sends one pre-approved template message through the WhatsApp Cloud API.
#[derive(Debug, Parser)]
#[command(name = "wa-template")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Messages endpoint URL, e.g. `https://graph.facebook.com/v21.0/<phone-id>/messages`
    #[arg(long = "api-url", env = "WHATSAPP_API_URL")]
    pub api_url: Option<String>,

    /// Access token sent as a Bearer credential
    #[arg(long, env = "ACCESS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Recipient phone number in international format
    #[arg(long, env = "RECEIVER_PHONE")]
    pub to: Option<String>,

    /// Name of the approved template
    #[arg(long)]
    pub template: Option<String>,

    /// Template language code
    #[arg(long)]
    pub language: Option<String>,

    /// Template variable, in placeholder order (can be specified multiple times)
    #[arg(long = "var", value_name = "VALUE")]
    pub variables: Vec<String>,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Log the payload without sending it
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for wa-template
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = super::defaults::CONFIG_FILE)]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
