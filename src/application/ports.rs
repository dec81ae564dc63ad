//! Outbound ports for third-party providers.
//!
//! The identity service receives these as injected dependencies so tests
//! can substitute recording fakes. HTTP implementations live in
//! `infrastructure::providers`.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::DomainResult;

/// Verified identity extracted from a Google ID token.
#[derive(Debug, Clone)]
pub struct GoogleProfile {
    pub email: String,
    pub name: String,
    /// Google subject identifier (`sub`).
    pub subject: String,
}

/// Exchanges an OAuth authorization code for a verified profile.
#[async_trait]
pub trait GoogleAuthProvider: Send + Sync {
    async fn exchange_code(&self, code: &str) -> DomainResult<GoogleProfile>;
}

/// Result of asking the SMS provider to deliver an OTP.
#[derive(Debug, Clone, Serialize)]
pub struct OtpDelivery {
    /// Provider-reported delivery status (e.g. "pending").
    pub status: String,
    /// E.164 number the code was sent to.
    pub to: String,
}

/// One-time-code delivery and verification.
#[async_trait]
pub trait OtpProvider: Send + Sync {
    /// Ask the provider to send a code to an E.164 number.
    async fn send_code(&self, phone_e164: &str) -> DomainResult<OtpDelivery>;

    /// Check a submitted code. `Ok(true)` only when the provider reports
    /// the check approved.
    async fn check_code(&self, phone_e164: &str, code: &str) -> DomainResult<bool>;
}

/// Outbound email delivery.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> DomainResult<()>;
}
