//! Common error types for Folio

use thiserror::Error;

/// Common result type for Folio operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the Folio crates
///
/// Contact validation and email delivery keep their own error types
/// ([`crate::ValidationError`], [`crate::email::DeliveryError`]) since their
/// callers branch on them directly.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid caller input (bad threshold, out-of-order stagger, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
