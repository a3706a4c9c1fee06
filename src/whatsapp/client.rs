//! Reqwest transport for [`TemplateSender`](super::TemplateSender).

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// [`HttpClient`] backed by reqwest, used by the `wa-template` binary.
///
/// [`ReqwestClient::new`] keeps reqwest's defaults, which is what the
/// sender relies on: no overall request timeout (a stalled Graph API call
/// waits until the connection itself fails), no request body size limit,
/// and no proxy settings beyond the system ones. Any status code, including
/// 401 and 5xx, comes back as `Ok`; only a missing response is an
/// [`HttpError`].
///
/// # Example
///
/// Bounding the wait for callers that cannot block indefinitely:
///
/// ```no_run
/// use std::time::Duration;
/// use wa_template::whatsapp::{ApiConfig, ReqwestClient, TemplateSender};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ReqwestClient::from_client(
///     reqwest::Client::builder()
///         .timeout(Duration::from_secs(10))
///         .build()?,
/// );
/// let config = ApiConfig::new(
///     url::Url::parse("https://graph.facebook.com/v21.0/123/messages")?,
///     "EAAG...",
/// )?;
/// let sender = TemplateSender::new(client, config);
/// # let _ = sender;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a new HTTP client with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
        }
    }

    /// Wraps a preconfigured reqwest client.
    ///
    /// A timeout set here surfaces as [`HttpError::Timeout`], which the
    /// sender reports as a missing response.
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { inner: client }
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut builder = self
            .inner
            .request(req.method, req.url.as_str())
            .headers(req.headers);

        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        // `send` fails only when the request never got a response.
        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                HttpError::Timeout
            } else if e.is_builder() {
                HttpError::InvalidUrl(e.to_string())
            } else {
                HttpError::Connection(Box::new(e))
            }
        })?;

        // Error bodies are kept: the API explains rejections there.
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| HttpError::Connection(Box::new(e)))?
            .to_vec();

        Ok(HttpResponse::new(status, body))
    }
}
