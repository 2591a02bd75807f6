//! # Folio Common Library
//!
//! Shared code for the portfolio site crates including:
//! - Configuration loading (TOML + environment)
//! - Contact draft, validation and endpoint wire types
//! - Email delivery collaborators (EmailJS REST, server relay)
//! - Easing curves used by the section animations
//! - Clock abstraction for render-time values

pub mod api;
pub mod config;
pub mod contact;
pub mod easing;
pub mod email;
pub mod error;
pub mod time;

pub use contact::{ContactFormDraft, Field, ValidContact, ValidationError};
pub use easing::Easing;
pub use error::{Error, Result};
pub use time::{Clock, FixedClock, SystemClock};
