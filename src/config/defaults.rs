//! Default values for configuration options.

/// Template sent when none is configured. Every WhatsApp Business account
/// has it pre-approved.
pub const TEMPLATE: &str = "hello_world";

/// Template language when none is configured.
pub const LANGUAGE: &str = crate::message::DEFAULT_LANGUAGE_CODE;

/// Output path for `init`.
pub const CONFIG_FILE: &str = "wa-template.toml";
