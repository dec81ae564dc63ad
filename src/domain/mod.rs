//! Core domain: models, error taxonomy and repository interfaces.

pub mod error;
pub mod farmer;
pub mod manager;
pub mod repositories;
pub mod session;

pub use error::{DomainError, DomainResult};
pub use farmer::{Farmer, FarmerProfile, LandUnit};
pub use manager::{CreateManager, Manager, ManagerPatch};
pub use repositories::{FarmerStore, ManagerStore, SessionLedger};
pub use session::{LoginMethod, LoginSession, Role};
