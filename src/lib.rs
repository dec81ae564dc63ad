//! # Barn Identity Service
//!
//! Identity & Access backend for the farm platform: credential store,
//! token issuance (password, Google OAuth, phone OTP, administrator),
//! route guards and the session ledger.
//!
//! ## Architecture
//!
//! - **domain**: core models, error taxonomy and repository interfaces
//! - **application**: the identity service (all login protocols) and
//!   outbound provider ports
//! - **infrastructure**: crypto (bcrypt, JWT), database (SeaORM entities,
//!   migrations, repositories) and provider HTTP clients
//! - **interfaces**: REST API (axum router, guards, per-module handlers,
//!   Swagger documentation)
//! - **shared**: graceful shutdown, field-format validation helpers

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};
pub use server::{init_tracing, ServerHandle, ServerOptions};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
