//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::repositories::FarmerRepository;
use crate::interfaces::http::common::{ApiResponse, MessageData};
use crate::interfaces::http::middleware::{admin_middleware, auth_middleware, AuthState};
use crate::interfaces::http::modules::{admin, auth, farmers, health, managers, metrics};
use crate::interfaces::http::request_id::request_id_middleware;
use crate::interfaces::http::AppIdentityService;

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Manager auth
        auth::handlers::register_manager,
        auth::handlers::login_manager,
        auth::handlers::google_sign_in,
        auth::handlers::forgot_password,
        auth::handlers::reset_password,
        auth::handlers::change_password,
        // Admin auth
        admin::handlers::admin_login,
        // Farmer auth
        farmers::handlers::send_otp,
        farmers::handlers::verify_otp,
        farmers::handlers::logout_farmer,
        // Farmer profiles
        farmers::handlers::create_farmer,
        farmers::handlers::list_farmers,
        farmers::handlers::get_farmer_by_aadhar,
        farmers::handlers::update_farmer,
        farmers::handlers::delete_farmer,
        // Manager management
        managers::handlers::list_managers,
        managers::handlers::get_manager_by_email,
        managers::handlers::edit_manager,
        managers::handlers::delete_manager,
        managers::handlers::update_profile,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            MessageData,
            // Manager auth
            auth::dto::RegisterManagerRequest,
            auth::dto::LoginRequest,
            auth::dto::GoogleSignInRequest,
            auth::dto::ForgotPasswordRequest,
            auth::dto::ResetPasswordRequest,
            auth::dto::ChangePasswordRequest,
            auth::dto::ManagerInfo,
            auth::dto::LoginResponse,
            // Admin auth
            admin::dto::AdminLoginRequest,
            // Farmers
            farmers::dto::SendOtpRequest,
            farmers::dto::VerifyOtpRequest,
            farmers::dto::SendOtpResponse,
            farmers::dto::LogoutResponse,
            farmers::dto::FarmerDto,
            farmers::dto::UpsertFarmerRequest,
            // Managers
            managers::dto::ManagerDto,
            managers::dto::EditManagerRequest,
            managers::dto::UpdateProfileRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Authentication", description = "Manager, farmer and administrator login flows"),
        (name = "Farmers", description = "Farmer profile management"),
        (name = "Managers", description = "Manager record management"),
    ),
    info(
        title = "Barn Identity Service API",
        version = "1.0.0",
        description = "Identity & Access REST API: credential store, token issuance, route guards and the session ledger",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    service: Arc<AppIdentityService>,
    farmer_repo: Arc<FarmerRepository>,
    db: DatabaseConnection,
    jwt_config: JwtConfig,
    prometheus_handle: PrometheusHandle,
) -> Router {
    let guard_state = AuthState { jwt_config };

    let auth_state = auth::handlers::AuthHandlerState {
        service: service.clone(),
    };
    let admin_state = admin::handlers::AdminHandlerState {
        service: service.clone(),
    };
    let farmers_state = farmers::handlers::FarmersHandlerState {
        service: service.clone(),
        farmers: farmer_repo,
    };
    let managers_state = managers::handlers::ManagersHandlerState { service };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // ── Authentication routes ──────────────────────────────────

    // Public manager auth
    let manager_auth_routes = Router::new()
        .route("/register", post(auth::handlers::register_manager))
        .route("/login", post(auth::handlers::login_manager))
        .route("/forgot-password", post(auth::handlers::forgot_password))
        .route("/reset-password", post(auth::handlers::reset_password))
        .with_state(auth_state.clone());

    // Bearer-guarded manager auth
    let manager_auth_protected_routes = Router::new()
        .route("/change-password", put(auth::handlers::change_password))
        .layer(middleware::from_fn_with_state(
            guard_state.clone(),
            auth_middleware,
        ))
        .with_state(auth_state.clone());

    let admin_auth_routes = Router::new()
        .route("/login", post(admin::handlers::admin_login))
        .with_state(admin_state);

    // Farmer auth (logout parses its own Authorization header)
    let farmer_auth_routes = Router::new()
        .route("/send-otp", post(farmers::handlers::send_otp))
        .route("/verify-otp", post(farmers::handlers::verify_otp))
        .route("/logout", post(farmers::handlers::logout_farmer))
        .with_state(farmers_state.clone());

    // ── Farmer profile routes (bearer-guarded) ─────────────────

    let farmer_profile_routes = Router::new()
        .route(
            "/",
            get(farmers::handlers::list_farmers).post(farmers::handlers::create_farmer),
        )
        .route(
            "/{aadhar_number}",
            get(farmers::handlers::get_farmer_by_aadhar)
                .put(farmers::handlers::update_farmer)
                .delete(farmers::handlers::delete_farmer),
        )
        .layer(middleware::from_fn_with_state(
            guard_state.clone(),
            auth_middleware,
        ))
        .with_state(farmers_state);

    // ── Manager management routes ──────────────────────────────

    // Self-service profile edit: any valid bearer token, no admin role.
    let manager_profile_routes = Router::new()
        .route("/profile", put(managers::handlers::update_profile))
        .layer(middleware::from_fn_with_state(
            guard_state.clone(),
            auth_middleware,
        ))
        .with_state(managers_state.clone());

    // Admin-guarded management
    let manager_admin_routes = Router::new()
        .route("/", get(managers::handlers::list_managers))
        .route("/by-email", get(managers::handlers::get_manager_by_email))
        .route(
            "/{id}",
            put(managers::handlers::edit_manager).delete(managers::handlers::delete_manager),
        )
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(
            guard_state,
            auth_middleware,
        ))
        .with_state(managers_state);

    // ── Unprotected infrastructure routes ──────────────────────

    let health_state = health::handlers::HealthState {
        db,
        started_at: Arc::new(Instant::now()),
    };
    let metrics_state = metrics::handlers::MetricsState {
        handle: prometheus_handle,
    };

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        .merge(swagger_routes)
        .route("/health", get(health::handlers::health_check).with_state(health_state))
        .route(
            "/metrics",
            get(metrics::handlers::prometheus_metrics).with_state(metrics_state),
        )
        .route(
            "/api/v1/auth/google",
            post(auth::handlers::google_sign_in).with_state(auth_state),
        )
        .nest("/api/v1/auth/manager", manager_auth_routes)
        .nest("/api/v1/auth/manager", manager_auth_protected_routes)
        .nest("/api/v1/auth/admin", admin_auth_routes)
        .nest("/api/v1/auth/farmer", farmer_auth_routes)
        .nest("/api/v1/farmers", farmer_profile_routes)
        .nest("/api/v1/managers", manager_profile_routes)
        .nest("/api/v1/managers", manager_admin_routes)
        .layer(middleware::from_fn(
            metrics::middleware::http_metrics_middleware,
        ))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
