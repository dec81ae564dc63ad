//! Repository interfaces for the credential store and session ledger.
//!
//! Implementations live in `infrastructure::database::repositories`.
//! Services stay generic over these traits so tests can substitute
//! in-memory fakes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{
    CreateManager, DomainResult, Farmer, FarmerProfile, LoginMethod, LoginSession, Manager,
    ManagerPatch, Role,
};

/// Lookups and mutations of manager records used in authentication
/// decisions.
#[async_trait]
pub trait ManagerStore: Send + Sync {
    /// Case-insensitive email lookup (emails are stored lower-cased).
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Manager>>;

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Manager>>;

    /// Fails with `Conflict` when the email is already registered.
    async fn create(&self, fields: CreateManager) -> DomainResult<Manager>;

    /// Overwrites the stored hash (already salted+hashed by the caller).
    async fn set_password_hash(&self, id: &str, password_hash: &str) -> DomainResult<()>;

    /// Applies an explicit patch; unset fields are left unchanged.
    /// Returns `None` when the manager does not exist.
    async fn apply_patch(&self, id: &str, patch: ManagerPatch) -> DomainResult<Option<Manager>>;

    async fn delete(&self, id: &str) -> DomainResult<()>;

    async fn list(&self) -> DomainResult<Vec<Manager>>;
}

/// Lookups (and profile-side mutations) of farmer records.
///
/// The identity core only ever reads farmer rows; the write operations
/// exist for the profile routes.
#[async_trait]
pub trait FarmerStore: Send + Sync {
    /// Matches the raw 10-digit string as stored (no country code).
    async fn find_by_phone(&self, phone_number: &str) -> DomainResult<Option<Farmer>>;

    async fn find_by_aadhar(&self, aadhar_number: &str) -> DomainResult<Option<Farmer>>;

    async fn list(&self) -> DomainResult<Vec<Farmer>>;

    /// Fails with `Conflict` when the phone or Aadhaar number is taken.
    async fn create(&self, profile: FarmerProfile) -> DomainResult<Farmer>;

    /// Replaces the profile fields of the farmer with the given Aadhaar
    /// number. Returns `None` when no such farmer exists.
    async fn update_by_aadhar(
        &self,
        aadhar_number: &str,
        profile: FarmerProfile,
    ) -> DomainResult<Option<Farmer>>;

    async fn delete_by_aadhar(&self, aadhar_number: &str) -> DomainResult<()>;
}

/// Append-only login/logout audit trail.
#[async_trait]
pub trait SessionLedger: Send + Sync {
    async fn record_login(
        &self,
        principal_id: &str,
        role: Role,
        method: LoginMethod,
        login_time: DateTime<Utc>,
    ) -> DomainResult<LoginSession>;

    /// Stamps `logout_time` on the principal's most recent session (by
    /// login time, descending). Returns the updated session, or `None`
    /// when the principal has no sessions — callers treat that as success.
    async fn close_latest(
        &self,
        principal_id: &str,
        logout_time: DateTime<Utc>,
    ) -> DomainResult<Option<LoginSession>>;

    async fn latest_for_principal(&self, principal_id: &str)
        -> DomainResult<Option<LoginSession>>;
}
