//! Manager management DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{Manager, ManagerPatch};

/// Manager API representation (management views; never exposes the hash)
#[derive(Debug, Serialize, ToSchema)]
pub struct ManagerDto {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub is_google_account: bool,
    pub is_authorized: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Manager> for ManagerDto {
    fn from(m: Manager) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            phone_number: m.phone_number,
            is_google_account: m.is_google_account,
            is_authorized: m.is_authorized,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Admin-side edit request. Every field is optional; absent means
/// unchanged. This is the only surface that can flip `is_authorized`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct EditManagerRequest {
    #[validate(length(min = 1, max = 100, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "invalid email format"))]
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub is_authorized: Option<bool>,
}

impl From<EditManagerRequest> for ManagerPatch {
    fn from(r: EditManagerRequest) -> Self {
        ManagerPatch {
            name: r.name,
            email: r.email,
            phone_number: r.phone_number,
            is_authorized: r.is_authorized,
        }
    }
}

/// Self-service profile edit; cannot touch authorization.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,
    pub phone_number: Option<String>,
}

/// Lookup query for the by-email endpoint
#[derive(Debug, Deserialize, IntoParams)]
pub struct ManagerByEmailParams {
    pub email: String,
}
