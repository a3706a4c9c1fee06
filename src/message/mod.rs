//! Template message payloads.
//!
//! This module provides:
//! - Validated message parameters ([`TemplateMessageRequest`])
//! - Template placeholder values ([`TemplateVariable`])
//! - The exact JSON body sent to the Cloud API ([`WireRequest`])
//! - A one-shot construction function ([`build_payload`])
//!
//! Everything here is pure data shaping. Nothing touches the network.

mod error;
mod payload;


pub use error::ValidationError;
pub use payload::{
    Component, ComponentKind, DEFAULT_LANGUAGE_CODE, Language, Parameter, ParameterKind,
    TemplateMessageRequest, TemplateSection, TemplateVariable, WireRequest, build_payload,
};
