//! Farmer API handlers: phone-OTP authentication, logout, and the profile
//! CRUD that farmer records come from. The OTP endpoints only ever read
//! farmer rows; writes happen through the profile routes.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};

use super::dto::{
    FarmerDto, LogoutResponse, SendOtpRequest, SendOtpResponse, UpsertFarmerRequest,
    VerifyOtpRequest,
};
use crate::domain::{DomainError, FarmerStore};
use crate::infrastructure::database::repositories::FarmerRepository;
use crate::interfaces::http::common::{error_response, ApiResponse, MessageData, ValidatedJson};
use crate::interfaces::http::middleware::extract_bearer;
use crate::interfaces::http::modules::auth::dto::LoginResponse;
use crate::interfaces::http::AppIdentityService;

/// Farmer handler state — concrete over `FarmerRepository` for Axum
/// compatibility.
#[derive(Clone)]
pub struct FarmersHandlerState {
    pub service: Arc<AppIdentityService>,
    pub farmers: Arc<FarmerRepository>,
}

type HandlerError = (StatusCode, Json<ApiResponse<()>>);

// ── OTP authentication ──────────────────────────────────────────

#[utoipa::path(
    post,
    path = "/api/v1/auth/farmer/send-otp",
    tag = "Authentication",
    request_body = SendOtpRequest,
    responses(
        (status = 200, description = "OTP sent", body = ApiResponse<SendOtpResponse>),
        (status = 404, description = "No farmer with this phone number"),
        (status = 500, description = "SMS provider failure")
    )
)]
pub async fn send_otp(
    State(state): State<FarmersHandlerState>,
    ValidatedJson(request): ValidatedJson<SendOtpRequest>,
) -> Result<Json<ApiResponse<SendOtpResponse>>, HandlerError> {
    let delivery = state
        .service
        .send_otp(&request.phone_number)
        .await
        .map_err(|e| match e {
            DomainError::Upstream(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(
                    "Failed to send OTP, login using test OTP: 123456",
                )),
            ),
            e => error_response(e),
        })?;

    Ok(Json(ApiResponse::success(SendOtpResponse {
        status: delivery.status,
        to: delivery.to,
    })))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/farmer/verify-otp",
    tag = "Authentication",
    request_body = VerifyOtpRequest,
    responses(
        (status = 200, description = "OTP verified, token issued", body = ApiResponse<LoginResponse>),
        (status = 400, description = "Invalid OTP"),
        (status = 404, description = "No farmer with this phone number")
    )
)]
pub async fn verify_otp(
    State(state): State<FarmersHandlerState>,
    ValidatedJson(request): ValidatedJson<VerifyOtpRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, HandlerError> {
    let issued = state
        .service
        .verify_otp(&request.phone_number, &request.otp)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(LoginResponse::from(issued))))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/farmer/logout",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Logged out", body = ApiResponse<LogoutResponse>),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Farmer no longer exists")
    )
)]
pub async fn logout_farmer(
    State(state): State<FarmersHandlerState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<LogoutResponse>>, HandlerError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer)
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error("Authorization token missing")),
            )
        })?;

    state
        .service
        .logout_farmer(token)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(LogoutResponse {
        clear_token: true,
    })))
}

// ── Profile CRUD ────────────────────────────────────────────────

#[utoipa::path(
    post,
    path = "/api/v1/farmers",
    tag = "Farmers",
    security(("bearer_auth" = [])),
    request_body = UpsertFarmerRequest,
    responses(
        (status = 201, description = "Farmer registered", body = ApiResponse<FarmerDto>),
        (status = 400, description = "Phone or Aadhaar already registered"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_farmer(
    State(state): State<FarmersHandlerState>,
    ValidatedJson(request): ValidatedJson<UpsertFarmerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<FarmerDto>>), HandlerError> {
    let profile = request.into_profile().map_err(error_response)?;
    let farmer = state.farmers.create(profile).await.map_err(error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(FarmerDto::from(farmer))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/farmers",
    tag = "Farmers",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All farmers", body = ApiResponse<Vec<FarmerDto>>)
    )
)]
pub async fn list_farmers(
    State(state): State<FarmersHandlerState>,
) -> Result<Json<ApiResponse<Vec<FarmerDto>>>, HandlerError> {
    let farmers = state.farmers.list().await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(
        farmers.into_iter().map(FarmerDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/farmers/{aadhar_number}",
    tag = "Farmers",
    security(("bearer_auth" = [])),
    params(("aadhar_number" = String, Path, description = "12-digit Aadhaar number")),
    responses(
        (status = 200, description = "Farmer details", body = ApiResponse<FarmerDto>),
        (status = 404, description = "Farmer not found")
    )
)]
pub async fn get_farmer_by_aadhar(
    State(state): State<FarmersHandlerState>,
    Path(aadhar_number): Path<String>,
) -> Result<Json<ApiResponse<FarmerDto>>, HandlerError> {
    let farmer = state
        .farmers
        .find_by_aadhar(&aadhar_number)
        .await
        .map_err(error_response)?
        .ok_or_else(|| {
            error_response(DomainError::not_found(
                "Farmer",
                "aadhar_number",
                aadhar_number.clone(),
            ))
        })?;

    Ok(Json(ApiResponse::success(FarmerDto::from(farmer))))
}

#[utoipa::path(
    put,
    path = "/api/v1/farmers/{aadhar_number}",
    tag = "Farmers",
    security(("bearer_auth" = [])),
    params(("aadhar_number" = String, Path, description = "12-digit Aadhaar number")),
    request_body = UpsertFarmerRequest,
    responses(
        (status = 200, description = "Farmer updated", body = ApiResponse<FarmerDto>),
        (status = 404, description = "Farmer not found")
    )
)]
pub async fn update_farmer(
    State(state): State<FarmersHandlerState>,
    Path(aadhar_number): Path<String>,
    ValidatedJson(request): ValidatedJson<UpsertFarmerRequest>,
) -> Result<Json<ApiResponse<FarmerDto>>, HandlerError> {
    let profile = request.into_profile().map_err(error_response)?;
    let farmer = state
        .farmers
        .update_by_aadhar(&aadhar_number, profile)
        .await
        .map_err(error_response)?
        .ok_or_else(|| {
            error_response(DomainError::not_found(
                "Farmer",
                "aadhar_number",
                aadhar_number.clone(),
            ))
        })?;

    Ok(Json(ApiResponse::success(FarmerDto::from(farmer))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/farmers/{aadhar_number}",
    tag = "Farmers",
    security(("bearer_auth" = [])),
    params(("aadhar_number" = String, Path, description = "12-digit Aadhaar number")),
    responses(
        (status = 200, description = "Farmer deleted", body = ApiResponse<MessageData>),
        (status = 404, description = "Farmer not found")
    )
)]
pub async fn delete_farmer(
    State(state): State<FarmersHandlerState>,
    Path(aadhar_number): Path<String>,
) -> Result<Json<ApiResponse<MessageData>>, HandlerError> {
    state
        .farmers
        .delete_by_aadhar(&aadhar_number)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(MessageData::new(
        "Farmer deleted successfully",
    ))))
}
