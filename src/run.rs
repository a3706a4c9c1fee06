//! Application execution logic.
//!
//! Builds the configured message and sends it once.

use http::StatusCode;
use thiserror::Error;

use wa_template::config::ValidatedConfig;
use wa_template::message::ValidationError;
use wa_template::whatsapp::{HttpClient, HttpError, ReqwestClient, SendOutcome, TemplateSender};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The configured message is incomplete.
    #[error("Invalid message: {0}")]
    Validation(#[from] ValidationError),

    /// The API answered with a non-success status.
    #[error("WhatsApp API rejected the message with status {status}")]
    Rejected {
        /// Status code returned by the API
        status: StatusCode,
    },

    /// No response was received.
    #[error("No response from WhatsApp API: {0}")]
    NoResponse(#[source] HttpError),
}

/// Sends the configured message with the production HTTP client.
///
/// # Errors
///
/// See [`execute_with`].
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    execute_with(ReqwestClient::new(), config).await
}

/// Sends the configured message through `client`.
///
/// In dry-run mode the payload is logged and nothing is sent.
///
/// # Errors
///
/// Returns [`RunError`] if the message is invalid, rejected, or unanswered.
pub async fn execute_with<H: HttpClient>(
    client: H,
    config: ValidatedConfig,
) -> Result<(), RunError> {
    let request = config.message_request()?;

    if config.dry_run {
        let payload = request.to_wire().to_json_bytes();
        tracing::info!(
            endpoint = %config.api.endpoint(),
            payload = %String::from_utf8_lossy(&payload),
            "[DRY-RUN] Would send message"
        );
        return Ok(());
    }

    let sender = TemplateSender::new(client, config.api);
    match sender.send(&request).await {
        SendOutcome::Sent(response) => {
            for id in response.message_ids() {
                tracing::info!(message_id = id, "Message accepted");
            }
            Ok(())
        }
        SendOutcome::Rejected { status, .. } => Err(RunError::Rejected { status }),
        SendOutcome::NoResponse(e) => Err(RunError::NoResponse(e)),
    }
}
