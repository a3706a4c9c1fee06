//! Error types for HTTP operations.

use thiserror::Error;

/// A request that never produced an HTTP response.
///
/// Any status code, including 4xx and 5xx, is a response and is reported
/// through [`HttpResponse`](super::HttpResponse) instead.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// Covers DNS resolution failures, refused connections, resets and
    /// errors while reading the response body.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The transport gave up waiting for a response.
    #[error("Request timed out")]
    Timeout,

    /// The request could not be built, usually because of a bad URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
