//! HTTP REST API interfaces
//!
//! - `middleware`: bearer-token and admin guards
//! - `modules`: per-resource DTOs and handlers
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod request_id;
pub mod router;

pub use router::create_api_router;

use crate::application::IdentityService;
use crate::infrastructure::database::repositories::{
    FarmerRepository, ManagerRepository, SessionRepository,
};

/// The identity service over the SeaORM repositories — the concrete type
/// Axum handler states hold.
pub type AppIdentityService =
    IdentityService<ManagerRepository, FarmerRepository, SessionRepository>;
