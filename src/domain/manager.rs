//! Manager domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered operator account.
///
/// `password_hash` is the empty string for Google-registered accounts;
/// `is_google_account` marks which credential applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manager {
    pub id: String,
    pub name: String,
    /// Stored lower-cased; lookups are case-insensitive.
    pub email: String,
    pub phone_number: Option<String>,
    pub password_hash: String,
    pub google_id: Option<String>,
    pub is_google_account: bool,
    /// Gates manager-only screens. Set by an administrator, never by the
    /// manager themself.
    pub is_authorized: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Manager {
    pub fn has_password(&self) -> bool {
        !self.password_hash.is_empty()
    }
}

/// Fields for creating a manager record.
#[derive(Debug, Clone)]
pub struct CreateManager {
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
    /// Already-hashed password; empty string for Google accounts.
    pub password_hash: String,
    pub google_id: Option<String>,
    pub is_google_account: bool,
}

/// Explicit patch for manager mutations.
///
/// Every field defaults to "unchanged"; only set fields are written.
#[derive(Debug, Clone, Default)]
pub struct ManagerPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub is_authorized: Option<bool>,
}

impl ManagerPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone_number.is_none()
            && self.is_authorized.is_none()
    }
}
