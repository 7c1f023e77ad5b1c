//! Outgoing SMS for verification codes.
//!
//! Providers:
//! - `console`: logs the message, code included (development only)
//! - `twilio`: Twilio Messages API
//!
//! With `sms.enabled = false` every send succeeds without doing anything.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::SmsConfig;

#[derive(Debug, Error)]
pub enum SmsError {
    #[error("SMS service not configured")]
    NotConfigured,

    #[error("Failed to send SMS: {0}")]
    SendFailed(String),

    #[error("Provider error: {0}")]
    ProviderError(String),
}

#[async_trait]
pub trait SmsSender: Send + Sync {
    async fn send(&self, to: &str, body: &str) -> Result<(), SmsError>;
}

#[derive(Clone)]
pub struct SmsService {
    config: Arc<SmsConfig>,
    client: reqwest::Client,
}

impl SmsService {
    pub fn new(config: SmsConfig) -> Self {
        Self {
            config: Arc::new(config),
            client: reqwest::Client::new(),
        }
    }

    fn twilio_url(&self) -> String {
        format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
            self.config.twilio_account_sid
        )
    }

    async fn send_twilio(&self, to: &str, body: &str) -> Result<(), SmsError> {
        if self.config.twilio_account_sid.is_empty() || self.config.twilio_auth_token.is_empty() {
            return Err(SmsError::NotConfigured);
        }

        let form = [
            ("To", to),
            ("From", self.config.from_number.as_str()),
            ("Body", body),
        ];

        let response = self
            .client
            .post(self.twilio_url())
            .basic_auth(
                &self.config.twilio_account_sid,
                Some(&self.config.twilio_auth_token),
            )
            .form(&form)
            .send()
            .await
            .map_err(|e| SmsError::SendFailed(format!("Twilio request failed: {}", e)))?;

        if response.status().is_success() {
            info!(to = %to, "SMS sent via Twilio");
            Ok(())
        } else {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, error = %error_body, "Twilio API error");
            Err(SmsError::ProviderError(format!(
                "Twilio returned {}: {}",
                status, error_body
            )))
        }
    }
}

#[async_trait]
impl SmsSender for SmsService {
    async fn send(&self, to: &str, body: &str) -> Result<(), SmsError> {
        if !self.config.enabled {
            debug!(to = %to, "SMS disabled, skipping send");
            return Ok(());
        }

        match self.config.provider.as_str() {
            "console" => {
                info!(to = %to, body = %body, "SMS (console provider)");
                Ok(())
            }
            "twilio" => self.send_twilio(to, body).await,
            provider => {
                error!(provider = %provider, "Unknown SMS provider");
                Err(SmsError::NotConfigured)
            }
        }
    }
}
