//! Outbound mail via an HTTP relay API.

use async_trait::async_trait;
use serde::Serialize;

use crate::application::ports::Mailer;
use crate::domain::{DomainError, DomainResult};

/// Settings for the mail relay.
#[derive(Debug, Clone, Default)]
pub struct MailSettings {
    /// Relay endpoint accepting a JSON message.
    pub relay_url: String,
    pub api_key: String,
    pub from_address: String,
}

pub struct MailRelayClient {
    http: reqwest::Client,
    settings: MailSettings,
}

#[derive(Debug, Serialize)]
struct OutboundMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

impl MailRelayClient {
    pub fn new(settings: MailSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            settings,
        }
    }
}

fn upstream(e: impl std::fmt::Display) -> DomainError {
    DomainError::Upstream(format!("Mail relay: {}", e))
}

#[async_trait]
impl Mailer for MailRelayClient {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> DomainResult<()> {
        let message = OutboundMessage {
            from: &self.settings.from_address,
            to,
            subject,
            html: html_body,
        };

        self.http
            .post(&self.settings.relay_url)
            .bearer_auth(&self.settings.api_key)
            .json(&message)
            .send()
            .await
            .map_err(upstream)?
            .error_for_status()
            .map_err(upstream)?;

        Ok(())
    }
}
