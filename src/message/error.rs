//! Error types for payload construction.

use thiserror::Error;

/// A required message field was missing.
///
/// Raised synchronously while building a payload, before any request is
/// issued. Never worth retrying: the same input always fails the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The recipient phone number was empty.
    #[error("Missing required field 'to': recipient and template name are mandatory")]
    MissingRecipient,

    /// The template name was empty.
    #[error("Missing required field 'template_name': recipient and template name are mandatory")]
    MissingTemplateName,
}

impl ValidationError {
    /// Returns the name of the offending field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::MissingRecipient => "to",
            Self::MissingTemplateName => "template_name",
        }
    }
}
