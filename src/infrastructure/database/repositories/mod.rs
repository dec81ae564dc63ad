//! SeaORM implementations of the domain repository interfaces.

pub mod farmer_repository;
pub mod manager_repository;
pub mod session_repository;

pub use farmer_repository::FarmerRepository;
pub use manager_repository::ManagerRepository;
pub use session_repository::SessionRepository;
