//! Application layer: identity use-cases and outbound ports.

pub mod identity;
pub mod ports;

pub use identity::{AdminCredentials, IdentityService, IssuedToken, OtpBypass};
pub use ports::{GoogleAuthProvider, GoogleProfile, Mailer, OtpDelivery, OtpProvider};
