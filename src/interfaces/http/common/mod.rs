//! Common API DTOs

pub mod validated_json;

pub use validated_json::ValidatedJson;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Standard response envelope.
///
/// Every REST endpoint returns data in this wrapper.
/// Success: `{"success": true, "data": {...}}`,
/// failure: `{"success": false, "error": "description"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` when the request succeeded
    pub success: bool,
    /// Payload; `null` on error
    pub data: Option<T>,
    /// Error description; absent on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Simple message payload for operations without return data
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageData {
    pub message: String,
}

impl MessageData {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Map a domain error to its HTTP status and error envelope.
pub fn error_response(e: DomainError) -> (StatusCode, Json<ApiResponse<()>>) {
    let status = match &e {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        // Duplicate registrations answer 400, matching the login surface.
        DomainError::Validation(_) | DomainError::Conflict(_) => StatusCode::BAD_REQUEST,
        DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
        DomainError::Upstream(_) | DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, Json(ApiResponse::error(e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_error_taxonomy() {
        let (status, _) = error_response(DomainError::not_found("Manager", "email", "a@x.com"));
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = error_response(DomainError::Validation("Invalid OTP".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = error_response(DomainError::Conflict("Manager already exists".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = error_response(DomainError::Unauthorized("bad password".into()));
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = error_response(DomainError::Upstream("provider down".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn envelope_serializes_without_error_key_on_success() {
        let body = serde_json::to_value(ApiResponse::success(MessageData::new("ok"))).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["message"], "ok");
        assert!(body.get("error").is_none());
    }
}
