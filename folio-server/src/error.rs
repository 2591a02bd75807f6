//! Error types for folio-server
//!
//! Every failure leaves the handler as the same `{success, message}` envelope
//! the contact form reads. Server-side detail goes to the log, never the body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use folio_common::api::types::{ContactResponse, MSG_PROCESSING_ERROR};
use folio_common::email::DeliveryError;
use folio_common::ValidationError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Missing or implausible contact fields (400)
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Relay to the email service failed (500)
    #[error("Delivery failed: {0}")]
    Delivery(#[from] DeliveryError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) => msg.clone(),
            ApiError::Validation(e) => e.user_message().to_string(),
            ApiError::Delivery(_) => {
                error!(error = %self, "Error processing request");
                MSG_PROCESSING_ERROR.to_string()
            }
        };

        (status, Json(ContactResponse::failure(message))).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
