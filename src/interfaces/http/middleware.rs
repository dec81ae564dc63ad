//! Authentication middleware for Axum
//!
//! Two stateless guards: the general bearer guard verifies signature and
//! expiry and injects the decoded principal; the admin guard additionally
//! requires the admin role. Neither consults a revocation list — logout is
//! a ledger annotation, not a token state change.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::infrastructure::crypto::jwt::{verify_token, JwtConfig, TokenClaims};

/// Authentication state shared by the guards
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
}

/// Authentication error types
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    AdminRequired,
}

/// Decoded principal injected into request extensions by the general guard.
#[derive(Clone, Debug)]
pub struct AuthenticatedPrincipal {
    pub id: String,
    pub name: String,
    pub role: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub is_authorized: bool,
}

impl AuthenticatedPrincipal {
    pub fn from_claims(claims: TokenClaims) -> Self {
        Self {
            id: claims.sub,
            name: claims.name,
            role: claims.role,
            email: claims.email,
            phone_number: claims.phone_number,
            is_authorized: claims.is_authorized,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

/// Extract the raw token from an `Authorization: Bearer …` header value.
pub fn extract_bearer(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// General bearer-token guard.
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(String::from);
    let Some(auth_header) = auth_header else {
        return auth_error_response(AuthError::MissingToken);
    };

    let Some(token) = extract_bearer(&auth_header) else {
        return auth_error_response(AuthError::MissingToken);
    };

    match verify_token(token, &auth_state.jwt_config) {
        Ok(claims) => {
            if claims.is_expired() {
                return auth_error_response(AuthError::InvalidToken);
            }
            let principal = AuthenticatedPrincipal::from_claims(claims);
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        Err(_) => auth_error_response(AuthError::InvalidToken),
    }
}

/// Admin-only guard — must be layered after `auth_middleware`.
///
/// A validly-signed manager or farmer token is rejected here: the role
/// claim must equal "admin".
pub async fn admin_middleware(request: Request<Body>, next: Next) -> Response {
    let principal = request.extensions().get::<AuthenticatedPrincipal>();

    match principal {
        Some(principal) if principal.is_admin() => next.run(request).await,
        Some(_) => auth_error_response(AuthError::AdminRequired),
        None => auth_error_response(AuthError::MissingToken),
    }
}

fn auth_error_response(error: AuthError) -> Response {
    let (status, message) = match error {
        AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Authorization token missing"),
        AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Token is invalid"),
        AuthError::AdminRequired => (StatusCode::FORBIDDEN, "Admin access required"),
    };

    let body = Json(json!({
        "success": false,
        "error": message
    }));

    (status, body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::middleware;
    use axum::routing::get;
    use axum::{Extension, Router};
    use chrono::Utc;
    use tower::Service;

    use crate::domain::Manager;
    use crate::infrastructure::crypto::jwt::{create_token, TokenClaims};

    fn jwt_config() -> JwtConfig {
        JwtConfig::default()
    }

    fn manager_token(config: &JwtConfig) -> String {
        let manager = Manager {
            id: "mgr-1".into(),
            name: "Asha".into(),
            email: "a@x.com".into(),
            phone_number: None,
            password_hash: "$2b$12$hash".into(),
            google_id: None,
            is_google_account: false,
            is_authorized: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        create_token(&TokenClaims::for_manager(&manager, config), config).unwrap()
    }

    fn admin_token(config: &JwtConfig) -> String {
        create_token(&TokenClaims::for_admin("root@x.com", config), config).unwrap()
    }

    async fn whoami(Extension(principal): Extension<AuthenticatedPrincipal>) -> String {
        format!("{}:{}", principal.id, principal.email.unwrap_or_default())
    }

    fn guarded_app(config: JwtConfig, admin_only: bool) -> Router {
        let state = AuthState { jwt_config: config };
        let mut router = Router::new().route("/guarded", get(whoami));
        if admin_only {
            router = router.layer(middleware::from_fn(admin_middleware));
        }
        router.layer(middleware::from_fn_with_state(state, auth_middleware))
    }

    async fn call(router: Router, auth_header: Option<String>) -> axum::http::Response<Body> {
        let mut builder = Request::builder().method("GET").uri("/guarded");
        if let Some(value) = auth_header {
            builder = builder.header("authorization", value);
        }
        let req = builder.body(Body::empty()).unwrap();
        let mut svc = router.into_service();
        svc.call(req).await.unwrap()
    }

    #[tokio::test]
    async fn missing_header_is_401() {
        let resp = call(guarded_app(jwt_config(), false), None).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn malformed_header_is_401() {
        let resp = call(
            guarded_app(jwt_config(), false),
            Some("Basic abc".to_string()),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn garbage_token_is_401() {
        let resp = call(
            guarded_app(jwt_config(), false),
            Some("Bearer not-a-token".to_string()),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn valid_token_roundtrips_id_and_email() {
        let config = jwt_config();
        let token = manager_token(&config);
        let resp = call(
            guarded_app(config, false),
            Some(format!("Bearer {}", token)),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"mgr-1:a@x.com");
    }

    // Pins the chosen behavior: the admin guard checks the role claim, it
    // does not accept any validly-signed token.
    #[tokio::test]
    async fn manager_token_rejected_by_admin_guard() {
        let config = jwt_config();
        let token = manager_token(&config);
        let resp = call(guarded_app(config, true), Some(format!("Bearer {}", token))).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admin_token_passes_admin_guard() {
        let config = jwt_config();
        let token = admin_token(&config);
        let resp = call(guarded_app(config, true), Some(format!("Bearer {}", token))).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
