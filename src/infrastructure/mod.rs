//! Infrastructure: crypto, persistence and outbound provider clients.

pub mod crypto;
pub mod database;
pub mod providers;

pub use database::{init_database, DatabaseConfig};
