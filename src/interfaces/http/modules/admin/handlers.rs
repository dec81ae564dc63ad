//! Administrator login handler
//!
//! The administrator is defined purely by configuration secrets: no record
//! is persisted and no session row is written.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use super::dto::AdminLoginRequest;
use crate::interfaces::http::common::{error_response, ApiResponse, ValidatedJson};
use crate::interfaces::http::modules::auth::dto::LoginResponse;
use crate::interfaces::http::AppIdentityService;

#[derive(Clone)]
pub struct AdminHandlerState {
    pub service: Arc<AppIdentityService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/admin/login",
    tag = "Authentication",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Admin login successful", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid admin credentials")
    )
)]
pub async fn admin_login(
    State(state): State<AdminHandlerState>,
    ValidatedJson(request): ValidatedJson<AdminLoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let issued = state
        .service
        .admin_login(&request.email, &request.password)
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(LoginResponse::from(issued))))
}
