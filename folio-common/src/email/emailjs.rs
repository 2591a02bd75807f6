//! EmailJS REST client
//!
//! Sends the contact template through `POST /api/v1.0/email/send`.

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{DeliveryError, EmailDelivery, OutboundEmail};
use crate::config::EmailSettings;

const SEND_PATH: &str = "/api/v1.0/email/send";
const USER_AGENT: &str = concat!("folio/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
    template_params: &'a OutboundEmail,
}

/// EmailJS API client
pub struct EmailJsClient {
    http_client: reqwest::Client,
    send_url: String,
    service_id: String,
    template_id: String,
    public_key: String,
    private_key: Option<String>,
}

impl EmailJsClient {
    pub fn new(settings: &EmailSettings) -> Result<Self, DeliveryError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| DeliveryError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            send_url: format!("{}{}", settings.endpoint.trim_end_matches('/'), SEND_PATH),
            service_id: settings.service_id.clone(),
            template_id: settings.template_id.clone(),
            public_key: settings.public_key.clone(),
            private_key: settings.private_key.clone(),
        })
    }

    /// Full URL requests are posted to
    pub fn send_url(&self) -> &str {
        &self.send_url
    }
}

#[async_trait]
impl EmailDelivery for EmailJsClient {
    fn name(&self) -> &'static str {
        "emailjs"
    }

    async fn send(&self, email: &OutboundEmail) -> Result<(), DeliveryError> {
        let body = SendRequest {
            service_id: &self.service_id,
            template_id: &self.template_id,
            user_id: &self.public_key,
            access_token: self.private_key.as_deref(),
            template_params: email,
        };

        debug!(
            service_id = %self.service_id,
            template_id = %self.template_id,
            "Sending contact email via EmailJS"
        );

        let response = self
            .http_client
            .post(&self.send_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| DeliveryError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "EmailJS rejected credentials");
            return Err(DeliveryError::Rejected(error_text));
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Api(status.as_u16(), error_text));
        }

        info!(to = %email.to_email, "Contact email accepted by EmailJS");
        Ok(())
    }
}
