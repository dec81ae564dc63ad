//! Identity service — application-layer orchestration
//!
//! All authentication protocols live here: manager password login, Google
//! OAuth sign-in, farmer phone OTP, administrator login, plus the password
//! reset flow and the manager-record mutations used by the admin screens.
//! HTTP handlers are thin wrappers that delegate to this service.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::application::ports::{GoogleAuthProvider, Mailer, OtpDelivery, OtpProvider};
use crate::domain::{
    CreateManager, DomainError, DomainResult, Farmer, FarmerStore, LoginMethod, Manager,
    ManagerPatch, ManagerStore, Role, SessionLedger,
};
use crate::infrastructure::crypto::jwt::{
    create_reset_token, create_token, verify_reset_token, verify_token, JwtConfig, TokenClaims,
};
use crate::infrastructure::crypto::password::{hash_password, verify_password};

/// Administrator credentials from configuration. The administrator has no
/// persisted record; this comparison is the entire account.
#[derive(Debug, Clone, Default)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
}

/// Test-mode OTP bypass. When enabled, submitting `code` verifies without
/// contacting the provider. The farmer-existence check still applies.
#[derive(Debug, Clone)]
pub struct OtpBypass {
    pub enabled: bool,
    pub code: String,
}

impl Default for OtpBypass {
    fn default() -> Self {
        Self {
            enabled: true,
            code: "123456".to_string(),
        }
    }
}

/// A signed bearer token plus the claims embedded in it, echoed back to the
/// client on login.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: TokenClaims,
    /// Seconds until expiry.
    pub expires_in: i64,
}

/// Identity service — generic over the store traits so tests can use
/// in-memory fakes; providers are injected as trait objects.
pub struct IdentityService<M, F, S>
where
    M: ManagerStore,
    F: FarmerStore,
    S: SessionLedger,
{
    managers: Arc<M>,
    farmers: Arc<F>,
    sessions: Arc<S>,
    google: Arc<dyn GoogleAuthProvider>,
    otp: Arc<dyn OtpProvider>,
    mailer: Arc<dyn Mailer>,
    jwt: JwtConfig,
    admin: AdminCredentials,
    otp_bypass: OtpBypass,
    /// Base URL the reset link points at (frontend route).
    reset_link_base: String,
}

impl<M, F, S> IdentityService<M, F, S>
where
    M: ManagerStore,
    F: FarmerStore,
    S: SessionLedger,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        managers: Arc<M>,
        farmers: Arc<F>,
        sessions: Arc<S>,
        google: Arc<dyn GoogleAuthProvider>,
        otp: Arc<dyn OtpProvider>,
        mailer: Arc<dyn Mailer>,
        jwt: JwtConfig,
        admin: AdminCredentials,
        otp_bypass: OtpBypass,
        reset_link_base: String,
    ) -> Self {
        Self {
            managers,
            farmers,
            sessions,
            google,
            otp,
            mailer,
            jwt,
            admin,
            otp_bypass,
            reset_link_base,
        }
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        &self.jwt
    }

    // ── Manager registration ────────────────────────────────────

    /// Register a manager with a password credential.
    pub async fn register_manager(
        &self,
        name: &str,
        email: &str,
        phone_number: Option<String>,
        password: &str,
    ) -> DomainResult<Manager> {
        if self.managers.find_by_email(email).await?.is_some() {
            return Err(DomainError::Conflict("Manager already exists".into()));
        }

        let password_hash = hash_password(password)
            .map_err(|e| DomainError::Internal(format!("Failed to hash password: {}", e)))?;

        let manager = self
            .managers
            .create(CreateManager {
                name: name.to_string(),
                email: email.to_string(),
                phone_number,
                password_hash,
                google_id: None,
                is_google_account: false,
            })
            .await?;

        info!(manager_id = %manager.id, "New manager registered");
        Ok(manager)
    }

    // ── Protocol A: manager password login ──────────────────────

    pub async fn login_manager(&self, email: &str, password: &str) -> DomainResult<IssuedToken> {
        let manager = self
            .managers
            .find_by_email(email)
            .await?
            .ok_or_else(|| DomainError::not_found("Manager", "email", email))?;

        // Google accounts have an empty hash and cannot password-login.
        let valid = manager.has_password()
            && verify_password(password, &manager.password_hash).unwrap_or(false);
        if !valid {
            metrics::counter!("auth_login_failures_total", "role" => "manager").increment(1);
            return Err(DomainError::Unauthorized("Invalid email or password".into()));
        }

        let issued = self.issue_for_manager(&manager)?;
        self.record_session(&manager.id, Role::Manager, LoginMethod::Password)
            .await;

        metrics::counter!("auth_logins_total", "role" => "manager", "method" => "password")
            .increment(1);
        info!(manager_id = %manager.id, "Manager logged in");
        Ok(issued)
    }

    // ── Protocol B: Google OAuth sign-in ────────────────────────

    /// Register-or-login via a Google authorization code. Idempotent by
    /// email lookup, so one operation serves both entry points.
    pub async fn google_sign_in(&self, code: &str) -> DomainResult<IssuedToken> {
        let profile = self.google.exchange_code(code).await?;

        let manager = match self.managers.find_by_email(&profile.email).await? {
            Some(manager) => manager,
            None => {
                let manager = self
                    .managers
                    .create(CreateManager {
                        name: profile.name.clone(),
                        email: profile.email.clone(),
                        phone_number: None,
                        password_hash: String::new(),
                        google_id: Some(profile.subject.clone()),
                        is_google_account: true,
                    })
                    .await?;
                info!(manager_id = %manager.id, "Manager registered via Google");
                manager
            }
        };

        let issued = self.issue_for_manager(&manager)?;
        self.record_session(&manager.id, Role::Manager, LoginMethod::Google)
            .await;

        metrics::counter!("auth_logins_total", "role" => "manager", "method" => "google")
            .increment(1);
        Ok(issued)
    }

    // ── Protocol C: farmer phone OTP ────────────────────────────

    /// Request an OTP for a registered farmer's phone number. Never
    /// contacts the provider for unregistered numbers.
    pub async fn send_otp(&self, phone_number: &str) -> DomainResult<OtpDelivery> {
        let farmer = self.require_farmer_by_phone(phone_number).await?;

        self.otp
            .send_code(&crate::shared::validations::to_e164(&farmer.phone_number))
            .await
    }

    /// Verify a submitted OTP and issue a farmer token.
    pub async fn verify_otp(&self, phone_number: &str, code: &str) -> DomainResult<IssuedToken> {
        let farmer = self.require_farmer_by_phone(phone_number).await?;

        let approved = if self.otp_bypass.enabled && code == self.otp_bypass.code {
            // Demo/test mode: fixed code verifies without provider contact.
            true
        } else {
            self.otp
                .check_code(&crate::shared::validations::to_e164(&farmer.phone_number), code)
                .await?
        };

        if !approved {
            metrics::counter!("auth_login_failures_total", "role" => "farmer").increment(1);
            return Err(DomainError::Validation("Invalid OTP".into()));
        }

        let claims = TokenClaims::for_farmer(&farmer, &self.jwt);
        let token = create_token(&claims, &self.jwt)
            .map_err(|e| DomainError::Internal(format!("Failed to create token: {}", e)))?;

        self.record_session(&farmer.id, Role::Farmer, LoginMethod::Phone)
            .await;

        metrics::counter!("auth_logins_total", "role" => "farmer", "method" => "phone")
            .increment(1);
        info!(farmer_id = %farmer.id, "Farmer logged in");

        Ok(IssuedToken {
            token,
            expires_in: self.jwt.farmer_token_hours * 3600,
            claims,
        })
    }

    /// Stamp a logout time on the farmer's latest session. Advisory only:
    /// the token stays valid until natural expiry, and a missing session
    /// row is swallowed.
    pub async fn logout_farmer(&self, bearer_token: &str) -> DomainResult<()> {
        let claims = verify_token(bearer_token, &self.jwt)
            .map_err(|_| DomainError::Unauthorized("Token is invalid".into()))?;

        let phone_number = claims
            .phone_number
            .ok_or_else(|| DomainError::Unauthorized("Token is invalid".into()))?;

        let farmer = self.require_farmer_by_phone(&phone_number).await?;

        if self
            .sessions
            .close_latest(&farmer.id, Utc::now())
            .await?
            .is_none()
        {
            warn!(farmer_id = %farmer.id, "Logout with no session on ledger");
        }

        Ok(())
    }

    // ── Protocol D: administrator ───────────────────────────────

    /// Administrator login against configuration secrets. No session row
    /// is written and no record exists; the role lives in the signature.
    pub fn admin_login(&self, email: &str, password: &str) -> DomainResult<IssuedToken> {
        if email != self.admin.email || password != self.admin.password {
            metrics::counter!("auth_login_failures_total", "role" => "admin").increment(1);
            return Err(DomainError::Unauthorized("Invalid admin credentials".into()));
        }

        let claims = TokenClaims::for_admin(email, &self.jwt);
        let token = create_token(&claims, &self.jwt)
            .map_err(|e| DomainError::Internal(format!("Failed to create token: {}", e)))?;

        metrics::counter!("auth_logins_total", "role" => "admin", "method" => "password")
            .increment(1);

        Ok(IssuedToken {
            token,
            expires_in: self.jwt.admin_token_hours * 3600,
            claims,
        })
    }

    // ── Password reset ──────────────────────────────────────────

    /// Mint a short-lived reset token and mail a reset link.
    pub async fn forgot_password(&self, email: &str) -> DomainResult<()> {
        let manager = self
            .managers
            .find_by_email(email)
            .await?
            .ok_or_else(|| DomainError::not_found("Manager", "email", email))?;

        let reset_token = create_reset_token(&manager.id, &self.jwt)
            .map_err(|e| DomainError::Internal(format!("Failed to create token: {}", e)))?;
        let reset_url = format!("{}/reset-password/{}", self.reset_link_base, reset_token);

        let html = format!(
            "<h4>Hi {},</h4>\
             <p>You requested to reset your password. Click the link below to reset it:</p>\
             <a href=\"{}\" target=\"_blank\">Reset Password</a>\
             <p>This link will expire in {} minutes.</p>\
             <p>If you did not request this, please ignore this email.</p>",
            manager.name, reset_url, self.jwt.reset_token_minutes
        );

        self.mailer
            .send(&manager.email, "Password Reset Request", &html)
            .await?;

        info!(manager_id = %manager.id, "Password reset link sent");
        Ok(())
    }

    /// Verify a reset token and overwrite the password. Forged, expired
    /// and orphaned tokens all collapse into one user-facing error.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> DomainResult<()> {
        let invalid = || DomainError::Validation("Invalid or expired token".into());

        let manager_id = verify_reset_token(token, &self.jwt).map_err(|_| invalid())?;

        let manager = self
            .managers
            .find_by_id(&manager_id)
            .await?
            .ok_or_else(invalid)?;

        let new_hash = hash_password(new_password)
            .map_err(|e| DomainError::Internal(format!("Failed to hash password: {}", e)))?;
        self.managers
            .set_password_hash(&manager.id, &new_hash)
            .await?;

        info!(manager_id = %manager.id, "Password reset completed");
        Ok(())
    }

    /// Change a manager's password, verifying the current one first.
    /// Google-only accounts (empty hash) cannot change a password.
    pub async fn change_password(
        &self,
        manager_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        let manager = self.managers.find_by_id(manager_id).await?;

        let Some(manager) = manager.filter(Manager::has_password) else {
            return Err(DomainError::Unauthorized(
                "Not authorized to change password".into(),
            ));
        };

        let valid = verify_password(current_password, &manager.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::Unauthorized(
                "Current password is incorrect".into(),
            ));
        }

        let new_hash = hash_password(new_password)
            .map_err(|e| DomainError::Internal(format!("Failed to hash password: {}", e)))?;
        self.managers
            .set_password_hash(&manager.id, &new_hash)
            .await?;

        info!(manager_id = %manager.id, "Password changed");
        Ok(())
    }

    // ── Manager record management ───────────────────────────────

    pub async fn list_managers(&self) -> DomainResult<Vec<Manager>> {
        self.managers.list().await
    }

    pub async fn get_manager_by_email(&self, email: &str) -> DomainResult<Manager> {
        self.managers
            .find_by_email(email)
            .await?
            .ok_or_else(|| DomainError::not_found("Manager", "email", email))
    }

    /// Admin-side edit; the only path that may flip `is_authorized`.
    pub async fn edit_manager(&self, id: &str, patch: ManagerPatch) -> DomainResult<Manager> {
        self.managers
            .apply_patch(id, patch)
            .await?
            .ok_or_else(|| DomainError::not_found("Manager", "id", id))
    }

    /// Self-service profile edit; resolved by the email in the caller's
    /// token and never touches `is_authorized`.
    pub async fn update_profile(
        &self,
        email: &str,
        name: Option<String>,
        phone_number: Option<String>,
    ) -> DomainResult<Manager> {
        let manager = self
            .managers
            .find_by_email(email)
            .await?
            .ok_or_else(|| DomainError::not_found("Manager", "email", email))?;

        let patch = ManagerPatch {
            name,
            phone_number,
            ..Default::default()
        };
        self.managers
            .apply_patch(&manager.id, patch)
            .await?
            .ok_or_else(|| DomainError::not_found("Manager", "id", manager.id.clone()))
    }

    pub async fn delete_manager(&self, id: &str) -> DomainResult<()> {
        self.managers.delete(id).await
    }

    // ── Helpers ─────────────────────────────────────────────────

    fn issue_for_manager(&self, manager: &Manager) -> DomainResult<IssuedToken> {
        let claims = TokenClaims::for_manager(manager, &self.jwt);
        let token = create_token(&claims, &self.jwt)
            .map_err(|e| DomainError::Internal(format!("Failed to create token: {}", e)))?;

        Ok(IssuedToken {
            token,
            expires_in: self.jwt.manager_token_hours * 3600,
            claims,
        })
    }

    async fn require_farmer_by_phone(&self, phone_number: &str) -> DomainResult<Farmer> {
        self.farmers
            .find_by_phone(phone_number)
            .await?
            .ok_or_else(|| DomainError::not_found("Farmer", "phone_number", phone_number))
    }

    /// Ledger write, ordered strictly after token signing. Issuance and
    /// audit are not transactional: a failed write is logged and the token
    /// is returned anyway.
    async fn record_session(&self, principal_id: &str, role: Role, method: LoginMethod) {
        if let Err(e) = self
            .sessions
            .record_login(principal_id, role, method, Utc::now())
            .await
        {
            warn!(principal_id, error = %e, "Session ledger write failed; token already issued");
        }
    }
}
