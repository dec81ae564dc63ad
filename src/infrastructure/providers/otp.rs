//! SMS verification client (Verify-style API: start a verification, then
//! check the submitted code against it).

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::ports::{OtpDelivery, OtpProvider};
use crate::domain::{DomainError, DomainResult};

/// Settings for the SMS verification service.
#[derive(Debug, Clone, Default)]
pub struct SmsSettings {
    pub account_sid: String,
    pub auth_token: String,
    pub verify_service_sid: String,
}

pub struct SmsVerifyClient {
    http: reqwest::Client,
    settings: SmsSettings,
}

#[derive(Debug, Deserialize)]
struct VerificationResponse {
    status: String,
}

impl SmsVerifyClient {
    pub fn new(settings: SmsSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            settings,
        }
    }

    fn service_url(&self, resource: &str) -> String {
        format!(
            "https://verify.twilio.com/v2/Services/{}/{}",
            self.settings.verify_service_sid, resource
        )
    }
}

fn upstream(e: impl std::fmt::Display) -> DomainError {
    DomainError::Upstream(format!("SMS verification: {}", e))
}

#[async_trait]
impl OtpProvider for SmsVerifyClient {
    async fn send_code(&self, phone_e164: &str) -> DomainResult<OtpDelivery> {
        let params = [("To", phone_e164), ("Channel", "sms")];

        let response: VerificationResponse = self
            .http
            .post(self.service_url("Verifications"))
            .basic_auth(&self.settings.account_sid, Some(&self.settings.auth_token))
            .form(&params)
            .send()
            .await
            .map_err(upstream)?
            .error_for_status()
            .map_err(upstream)?
            .json()
            .await
            .map_err(upstream)?;

        Ok(OtpDelivery {
            status: response.status,
            to: phone_e164.to_string(),
        })
    }

    async fn check_code(&self, phone_e164: &str, code: &str) -> DomainResult<bool> {
        let params = [("To", phone_e164), ("Code", code)];

        let response: VerificationResponse = self
            .http
            .post(self.service_url("VerificationCheck"))
            .basic_auth(&self.settings.account_sid, Some(&self.settings.auth_token))
            .form(&params)
            .send()
            .await
            .map_err(upstream)?
            .error_for_status()
            .map_err(upstream)?
            .json()
            .await
            .map_err(upstream)?;

        Ok(response.status == "approved")
    }
}
