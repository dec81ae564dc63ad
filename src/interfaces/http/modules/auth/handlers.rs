//! Manager authentication API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};

use super::dto::{
    ChangePasswordRequest, ForgotPasswordRequest, GoogleSignInRequest, LoginRequest, LoginResponse,
    ManagerInfo, RegisterManagerRequest, ResetPasswordRequest,
};
use crate::domain::DomainError;
use crate::interfaces::http::common::{error_response, ApiResponse, MessageData, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedPrincipal;
use crate::interfaces::http::AppIdentityService;
use crate::shared::validations::is_valid_phone_number;

/// Auth handler state
#[derive(Clone)]
pub struct AuthHandlerState {
    pub service: Arc<AppIdentityService>,
}

type HandlerError = (StatusCode, Json<ApiResponse<()>>);

#[utoipa::path(
    post,
    path = "/api/v1/auth/manager/register",
    tag = "Authentication",
    request_body = RegisterManagerRequest,
    responses(
        (status = 201, description = "Manager registered", body = ApiResponse<ManagerInfo>),
        (status = 400, description = "Email already registered"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn register_manager(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterManagerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ManagerInfo>>), HandlerError> {
    if let Some(ref phone) = request.phone_number {
        if !is_valid_phone_number(phone) {
            return Err(error_response(DomainError::Validation(
                "Phone number must be a 10-digit number".into(),
            )));
        }
    }

    let manager = state
        .service
        .register_manager(
            &request.name,
            &request.email,
            request.phone_number,
            &request.password,
        )
        .await
        .map_err(error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(ManagerInfo::from(manager))),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/manager/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid email or password"),
        (status = 404, description = "Manager not found")
    )
)]
pub async fn login_manager(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, HandlerError> {
    let issued = state
        .service
        .login_manager(&request.email, &request.password)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(LoginResponse::from(issued))))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/google",
    tag = "Authentication",
    request_body = GoogleSignInRequest,
    responses(
        (status = 200, description = "Google sign-in successful", body = ApiResponse<LoginResponse>),
        (status = 400, description = "Missing authorization code"),
        (status = 500, description = "OAuth exchange failed")
    )
)]
pub async fn google_sign_in(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<GoogleSignInRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, HandlerError> {
    let issued = state
        .service
        .google_sign_in(&request.code)
        .await
        .map_err(|e| match e {
            // Provider details stay in the logs, not the response.
            DomainError::Upstream(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Google sign-in failed")),
            ),
            e => error_response(e),
        })?;

    Ok(Json(ApiResponse::success(LoginResponse::from(issued))))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/manager/forgot-password",
    tag = "Authentication",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Reset link sent", body = ApiResponse<MessageData>),
        (status = 404, description = "No manager with this email"),
        (status = 500, description = "Mail delivery failed")
    )
)]
pub async fn forgot_password(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<ForgotPasswordRequest>,
) -> Result<Json<ApiResponse<MessageData>>, HandlerError> {
    state
        .service
        .forgot_password(&request.email)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(MessageData::new(
        "Reset link sent to your email",
    ))))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/manager/reset-password",
    tag = "Authentication",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password reset", body = ApiResponse<MessageData>),
        (status = 400, description = "Invalid or expired token")
    )
)]
pub async fn reset_password(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<ResetPasswordRequest>,
) -> Result<Json<ApiResponse<MessageData>>, HandlerError> {
    state
        .service
        .reset_password(&request.token, &request.new_password)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(MessageData::new(
        "Password reset successful",
    ))))
}

#[utoipa::path(
    put,
    path = "/api/v1/auth/manager/change-password",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = ApiResponse<MessageData>),
        (status = 401, description = "Current password is incorrect")
    )
)]
pub async fn change_password(
    State(state): State<AuthHandlerState>,
    Extension(principal): Extension<AuthenticatedPrincipal>,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<MessageData>>, HandlerError> {
    state
        .service
        .change_password(
            &principal.id,
            &request.current_password,
            &request.new_password,
        )
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(MessageData::new(
        "Password updated successfully",
    ))))
}
