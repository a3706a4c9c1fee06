//! wa-template: WhatsApp template message sender
//!
//! A library for building WhatsApp Cloud API template message payloads
//! and sending them with a single authenticated request.

pub mod config;
pub mod message;
pub mod whatsapp;
