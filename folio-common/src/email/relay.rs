//! Relay client: browser side posts to this site's own `/contact` endpoint
//!
//! Keeps EmailJS credentials on the server. The destination address is also
//! chosen by the server, so `OutboundEmail::to_email` is not transmitted.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use super::{DeliveryError, EmailDelivery, OutboundEmail};
use crate::api::{ContactRequest, ContactResponse};
use crate::config::DEFAULT_TIMEOUT_SECS;

/// Client for the server-side contact endpoint
pub struct RelayClient {
    http_client: reqwest::Client,
    contact_url: String,
}

impl RelayClient {
    /// # Arguments
    /// * `contact_url` - Full endpoint URL, e.g. `https://example.com/api/contact`
    pub fn new(contact_url: impl Into<String>) -> Result<Self, DeliveryError> {
        Self::with_timeout(contact_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(
        contact_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DeliveryError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DeliveryError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            contact_url: contact_url.into(),
        })
    }
}

#[async_trait]
impl EmailDelivery for RelayClient {
    fn name(&self) -> &'static str {
        "relay"
    }

    async fn send(&self, email: &OutboundEmail) -> Result<(), DeliveryError> {
        let body = ContactRequest {
            name: Some(email.from_name.clone()),
            email: Some(email.from_email.clone()),
            message: Some(email.message.clone()),
        };

        debug!(url = %self.contact_url, "Relaying contact submission");

        let response = self
            .http_client
            .post(&self.contact_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| DeliveryError::Network(e.to_string()))?;

        let status = response.status();
        let reply: ContactResponse = response
            .json()
            .await
            .map_err(|e| DeliveryError::Parse(e.to_string()))?;

        if !status.is_success() || !reply.success {
            return Err(DeliveryError::Api(status.as_u16(), reply.message));
        }

        Ok(())
    }
}
