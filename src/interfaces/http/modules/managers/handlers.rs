//! Manager management API handlers
//!
//! Admin-guarded CRUD over manager records, plus the bearer-guarded
//! self-service profile edit.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{EditManagerRequest, ManagerByEmailParams, ManagerDto, UpdateProfileRequest};
use crate::domain::DomainError;
use crate::interfaces::http::common::{error_response, ApiResponse, MessageData, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedPrincipal;
use crate::interfaces::http::AppIdentityService;
use crate::shared::validations::is_valid_phone_number;

#[derive(Clone)]
pub struct ManagersHandlerState {
    pub service: Arc<AppIdentityService>,
}

type HandlerError = (StatusCode, Json<ApiResponse<()>>);

fn check_phone(phone_number: &Option<String>) -> Result<(), HandlerError> {
    if let Some(phone) = phone_number {
        if !is_valid_phone_number(phone) {
            return Err(error_response(DomainError::Validation(
                "Phone number must be a 10-digit number".into(),
            )));
        }
    }
    Ok(())
}

#[utoipa::path(
    get,
    path = "/api/v1/managers",
    tag = "Managers",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All managers", body = ApiResponse<Vec<ManagerDto>>),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn list_managers(
    State(state): State<ManagersHandlerState>,
) -> Result<Json<ApiResponse<Vec<ManagerDto>>>, HandlerError> {
    let managers = state.service.list_managers().await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(
        managers.into_iter().map(ManagerDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/managers/by-email",
    tag = "Managers",
    security(("bearer_auth" = [])),
    params(ManagerByEmailParams),
    responses(
        (status = 200, description = "Manager details", body = ApiResponse<ManagerDto>),
        (status = 404, description = "Manager not found")
    )
)]
pub async fn get_manager_by_email(
    State(state): State<ManagersHandlerState>,
    Query(params): Query<ManagerByEmailParams>,
) -> Result<Json<ApiResponse<ManagerDto>>, HandlerError> {
    let manager = state
        .service
        .get_manager_by_email(&params.email)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(ManagerDto::from(manager))))
}

#[utoipa::path(
    put,
    path = "/api/v1/managers/{id}",
    tag = "Managers",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Manager ID")),
    request_body = EditManagerRequest,
    responses(
        (status = 200, description = "Manager updated", body = ApiResponse<ManagerDto>),
        (status = 404, description = "Manager not found")
    )
)]
pub async fn edit_manager(
    State(state): State<ManagersHandlerState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<EditManagerRequest>,
) -> Result<Json<ApiResponse<ManagerDto>>, HandlerError> {
    check_phone(&request.phone_number)?;

    let manager = state
        .service
        .edit_manager(&id, request.into())
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(ManagerDto::from(manager))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/managers/{id}",
    tag = "Managers",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Manager ID")),
    responses(
        (status = 200, description = "Manager deleted", body = ApiResponse<MessageData>),
        (status = 404, description = "Manager not found")
    )
)]
pub async fn delete_manager(
    State(state): State<ManagersHandlerState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageData>>, HandlerError> {
    state
        .service
        .delete_manager(&id)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(MessageData::new(
        "Manager deleted successfully",
    ))))
}

#[utoipa::path(
    put,
    path = "/api/v1/managers/profile",
    tag = "Managers",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<ManagerDto>),
        (status = 401, description = "Token carries no email"),
        (status = 404, description = "Manager not found")
    )
)]
pub async fn update_profile(
    State(state): State<ManagersHandlerState>,
    Extension(principal): Extension<AuthenticatedPrincipal>,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<ManagerDto>>, HandlerError> {
    // Farmer tokens pass the general guard but carry no email claim.
    let Some(email) = principal.email else {
        return Err(error_response(DomainError::Unauthorized(
            "No user email in token".into(),
        )));
    };

    check_phone(&request.phone_number)?;

    let manager = state
        .service
        .update_profile(&email, Some(request.name), request.phone_number)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(ManagerDto::from(manager))))
}
