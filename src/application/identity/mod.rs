pub mod service;

pub use service::{AdminCredentials, IdentityService, IssuedToken, OtpBypass};

#[cfg(test)]
mod tests;
