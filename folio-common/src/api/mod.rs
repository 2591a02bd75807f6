//! API module for the contact endpoint wire format
//!
//! Shared by the server handler and the client-side relay so both ends agree
//! on field names and the `{success, message}` envelope.
//!
//! This module contains ONLY plain serde types; the server wraps them with
//! axum extractors and responses.

pub mod types;

pub use types::{ContactRequest, ContactResponse};
