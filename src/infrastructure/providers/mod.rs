//! HTTP clients for the third-party providers behind the application ports.

pub mod google;
pub mod mailer;
pub mod otp;

pub use google::{GoogleOAuthClient, GoogleSettings};
pub use mailer::{MailRelayClient, MailSettings};
pub use otp::{SmsSettings, SmsVerifyClient};
