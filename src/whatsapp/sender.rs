//! Template message sender.

use std::fmt;

use http::header::{AUTHORIZATION, HeaderValue, InvalidHeaderValue};
use http::StatusCode;

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};
use crate::message::{
    TemplateMessageRequest, TemplateVariable, ValidationError, WireRequest, build_payload,
};

/// Where and as whom messages are sent.
///
/// Built once at startup and handed to [`TemplateSender::new`]. The token is
/// stored as a sensitive header value and never shows up in `Debug` output.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    endpoint: url::Url,
    authorization: HeaderValue,
}

impl ApiConfig {
    /// Creates a configuration for the given messages endpoint.
    ///
    /// `endpoint` is the full URL requests are posted to, e.g.
    /// `https://graph.facebook.com/v21.0/<phone-number-id>/messages`.
    ///
    /// # Errors
    ///
    /// Returns an error if the token contains characters that are not
    /// allowed in an HTTP header.
    pub fn new(endpoint: url::Url, access_token: &str) -> Result<Self, InvalidHeaderValue> {
        let mut authorization = HeaderValue::from_str(&format!("Bearer {access_token}"))?;
        authorization.set_sensitive(true);

        Ok(Self {
            endpoint,
            authorization,
        })
    }

    /// Returns the messages endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &url::Url {
        &self.endpoint
    }
}

/// Body of a successful (2xx) API response.
///
/// The body is parsed as JSON when possible. A non-JSON body is kept as a
/// JSON string and an empty body becomes `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    status: StatusCode,
    body: serde_json::Value,
}

impl ApiResponse {
    fn from_http(response: &HttpResponse) -> Self {
        let body = if response.body.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&response.body).unwrap_or_else(|_| {
                serde_json::Value::String(String::from_utf8_lossy(&response.body).into_owned())
            })
        };

        Self {
            status: response.status,
            body,
        }
    }

    /// HTTP status of the response.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Response body.
    #[must_use]
    pub const fn body(&self) -> &serde_json::Value {
        &self.body
    }

    /// Consumes the response and returns its body.
    #[must_use]
    pub fn into_body(self) -> serde_json::Value {
        self.body
    }

    /// Message ids (`wamid.*`) assigned by the API, in response order.
    #[must_use]
    pub fn message_ids(&self) -> Vec<&str> {
        self.body["messages"]
            .as_array()
            .map(|messages| {
                messages
                    .iter()
                    .filter_map(|m| m["id"].as_str())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Result of a single send attempt.
///
/// Remote failures are values, not errors: callers branch on the variant
/// instead of relying on `?` to notice that the API refused a message.
#[derive(Debug)]
#[must_use]
pub enum SendOutcome {
    /// The API accepted the message (2xx).
    Sent(ApiResponse),

    /// The API answered with a non-success status.
    Rejected {
        /// Status code returned by the API
        status: StatusCode,
        /// Response body, if it was valid UTF-8
        body: Option<String>,
    },

    /// No response was received.
    NoResponse(HttpError),
}

impl SendOutcome {
    /// Returns true if the API accepted the message.
    #[must_use]
    pub const fn is_sent(&self) -> bool {
        matches!(self, Self::Sent(_))
    }

    /// Returns the response of an accepted message.
    #[must_use]
    pub const fn response(&self) -> Option<&ApiResponse> {
        match self {
            Self::Sent(response) => Some(response),
            _ => None,
        }
    }

    /// Converts into the response of an accepted message, discarding failure detail.
    #[must_use]
    pub fn into_response(self) -> Option<ApiResponse> {
        match self {
            Self::Sent(response) => Some(response),
            _ => None,
        }
    }
}

impl fmt::Display for SendOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sent(response) => write!(f, "sent ({})", response.status),
            Self::Rejected { status, body } => {
                write!(f, "rejected with {status}: {}", body.as_deref().unwrap_or(""))
            }
            Self::NoResponse(e) => write!(f, "no response: {e}"),
        }
    }
}

/// Sends template messages with a single authenticated POST each.
///
/// There are no retries and no timeout beyond whatever the [`HttpClient`]
/// applies. The sender holds no mutable state, so one instance can serve
/// concurrent callers.
///
/// # Example
///
/// ```no_run
/// use wa_template::whatsapp::{ApiConfig, ReqwestClient, TemplateSender};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ApiConfig::new(
///     url::Url::parse("https://graph.facebook.com/v21.0/123456/messages")?,
///     "EAAG...",
/// )?;
/// let sender = TemplateSender::new(ReqwestClient::new(), config);
///
/// let outcome = sender
///     .send_template("15551234567", "order_update", ["Alice", "#1042"], Some("en"))
///     .await?;
/// if let Some(response) = outcome.into_response() {
///     println!("{}", response.body());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TemplateSender<H> {
    client: H,
    config: ApiConfig,
}

impl<H> TemplateSender<H> {
    /// Creates a sender that posts to `config`'s endpoint through `client`.
    #[must_use]
    pub const fn new(client: H, config: ApiConfig) -> Self {
        Self { client, config }
    }

    /// Returns the API configuration.
    #[must_use]
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }
}

impl<H: HttpClient> TemplateSender<H> {
    /// Builds a template message and sends it.
    ///
    /// `language_code` defaults to `en_US` when `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if `recipient` or `template_name` is
    /// empty. No request is made in that case. Every other failure is
    /// reported through the returned [`SendOutcome`].
    pub async fn send_template<I, T>(
        &self,
        recipient: &str,
        template_name: &str,
        variables: I,
        language_code: Option<&str>,
    ) -> Result<SendOutcome, ValidationError>
    where
        I: IntoIterator<Item = T>,
        T: Into<TemplateVariable>,
    {
        let wire = build_payload(recipient, template_name, language_code, variables)?;
        Ok(self.deliver(&wire).await)
    }

    /// Sends an already validated request.
    pub async fn send(&self, request: &TemplateMessageRequest) -> SendOutcome {
        self.deliver(&request.to_wire()).await
    }

    /// Posts a wire payload and classifies the result.
    pub async fn deliver(&self, wire: &WireRequest) -> SendOutcome {
        tracing::info!(
            to = wire.to(),
            template = wire.template().name(),
            "Sending message..."
        );

        let request = self.build_request(wire);
        match self.client.request(request).await {
            Ok(response) if response.is_success() => {
                let response = ApiResponse::from_http(&response);
                tracing::info!(
                    status = %response.status(),
                    body = %response.body(),
                    "Message sent successfully"
                );
                SendOutcome::Sent(response)
            }
            Ok(response) => {
                let body = response.body_text().map(ToString::to_string);
                tracing::error!(
                    status = response.status.as_u16(),
                    body = body.as_deref().unwrap_or("<non-UTF-8 body>"),
                    "Error response from WhatsApp API"
                );
                SendOutcome::Rejected {
                    status: response.status,
                    body,
                }
            }
            Err(e) => {
                if matches!(e, HttpError::InvalidUrl(_)) {
                    tracing::error!(error = %e, "Request could not be sent");
                } else {
                    tracing::error!(error = %e, "No response from WhatsApp API");
                }
                SendOutcome::NoResponse(e)
            }
        }
    }

    fn build_request(&self, wire: &WireRequest) -> HttpRequest {
        let body = wire.to_json_bytes();
        tracing::debug!(payload = %String::from_utf8_lossy(&body), "Request payload");

        HttpRequest::post(self.config.endpoint.clone())
            .with_header(AUTHORIZATION, self.config.authorization.clone())
            .with_json_body(body)
    }
}
