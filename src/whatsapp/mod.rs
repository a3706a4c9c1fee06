//! Delivery of template messages to the WhatsApp Cloud API.
//!
//! This module provides:
//! - HTTP request/response value types ([`HttpRequest`], [`HttpResponse`])
//! - The HTTP client seam ([`HttpClient`]) and its reqwest implementation ([`ReqwestClient`])
//! - Endpoint and credential configuration ([`ApiConfig`])
//! - The one-shot sender ([`TemplateSender`]) and its typed result ([`SendOutcome`])

mod client;
mod error;
mod http;
mod sender;

#[cfg(test)]
mod sender_tests;

pub use client::ReqwestClient;
pub use error::HttpError;
pub use http::{HttpClient, HttpRequest, HttpResponse};
pub use sender::{ApiConfig, ApiResponse, SendOutcome, TemplateSender};
