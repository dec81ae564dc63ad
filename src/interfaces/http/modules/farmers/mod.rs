//! Farmer module: phone-OTP authentication plus profile CRUD.

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
