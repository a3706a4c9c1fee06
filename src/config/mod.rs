//! Configuration layer for wa-template.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Values are resolved with the following priority (highest to lowest):
//!
//! 1. **CLI arguments** - Values passed on the command line
//! 2. **Environment** - `WHATSAPP_API_URL`, `ACCESS_TOKEN`, `RECEIVER_PHONE`
//!    (a `.env` file in the working directory is loaded first by the binary)
//! 3. **TOML config file** - Values from the file given with `--config`
//! 4. **Built-in defaults** - Template name and language only
//!
//! The endpoint URL, access token and recipient have no defaults. Empty
//! strings count as missing.
//!
//! Template variables given with `--var` **replace** the `message.variables`
//! list from the config file entirely (not merged).

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod toml_tests;

pub use cli::{Cli, Command};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, VariableValue, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
