//! Authentication DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::IssuedToken;
use crate::domain::Manager;
use crate::infrastructure::crypto::jwt::TokenClaims;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterManagerRequest {
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    /// Optional 10-digit number; format-checked in the handler.
    pub phone_number: Option<String>,
    #[validate(length(min = 6, max = 128, message = "password must be 6–128 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GoogleSignInRequest {
    /// OAuth authorization code from the frontend code-flow popup.
    #[validate(length(min = 1, message = "authorization code is required"))]
    pub code: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "invalid email format"))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "token is required"))]
    pub token: String,
    #[validate(length(min = 6, max = 128, message = "password must be 6–128 characters"))]
    pub new_password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "current password is required"))]
    pub current_password: String,
    #[validate(length(min = 6, max = 128, message = "new password must be 6–128 characters"))]
    pub new_password: String,
}

/// Registration echo (no token is issued on register).
#[derive(Debug, Serialize, ToSchema)]
pub struct ManagerInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub is_authorized: bool,
    pub is_google_account: bool,
}

impl From<Manager> for ManagerInfo {
    fn from(m: Manager) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            phone_number: m.phone_number,
            is_authorized: m.is_authorized,
            is_google_account: m.is_google_account,
        }
    }
}

/// Issued bearer token with the claim payload echoed back.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    #[schema(value_type = Object)]
    pub payload: TokenClaims,
}

impl From<IssuedToken> for LoginResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            token: issued.token,
            token_type: "Bearer".to_string(),
            expires_in: issued.expires_in,
            payload: issued.claims,
        }
    }
}
