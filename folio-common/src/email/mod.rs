//! Email delivery collaborators
//!
//! The contact pipeline hands a finished submission to an [`EmailDelivery`]
//! implementation and only cares whether it succeeded. Two implementations
//! ship here:
//! - [`EmailJsClient`]: calls the EmailJS REST API directly
//! - [`RelayClient`]: posts to this site's own `/contact` endpoint, which can
//!   in turn relay through EmailJS with server-held credentials

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::contact::ValidContact;

pub mod emailjs;
pub mod relay;

pub use emailjs::EmailJsClient;
pub use relay::RelayClient;

/// Delivery failure reasons
///
/// Callers only branch on success vs failure; the variant is kept for logs.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Credentials rejected: {0}")]
    Rejected(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Field mapping handed to the email template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundEmail {
    pub from_name: String,
    pub from_email: String,
    pub message: String,
    pub to_email: String,
}

impl OutboundEmail {
    pub fn new(contact: &ValidContact, to_email: impl Into<String>) -> Self {
        Self {
            from_name: contact.name.clone(),
            from_email: contact.email.clone(),
            message: contact.message.clone(),
            to_email: to_email.into(),
        }
    }
}

/// External email-delivery collaborator
#[async_trait]
pub trait EmailDelivery: Send + Sync {
    /// Collaborator identifier for logs (e.g. "emailjs", "relay")
    fn name(&self) -> &'static str;

    /// Send one email; exactly one outbound attempt, no retry
    async fn send(&self, email: &OutboundEmail) -> Result<(), DeliveryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outbound_mapping() {
        let contact = ValidContact {
            name: "Jane".into(),
            email: "jane@x.com".into(),
            message: "Hi".into(),
        };
        let email = OutboundEmail::new(&contact, "owner@example.com");
        let json = serde_json::to_value(&email).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "from_name": "Jane",
                "from_email": "jane@x.com",
                "message": "Hi",
                "to_email": "owner@example.com",
            })
        );
    }
}
