//! Manager authentication module: register, password login, Google
//! sign-in, password reset and change-password.

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
