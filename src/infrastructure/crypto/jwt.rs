//! JWT token handling
//!
//! One canonical claim shape is used by all three login protocols; the
//! password-reset flow uses a separate single-purpose claim set so a login
//! token can never drive a reset.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::{Farmer, Manager, Role};

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Issuer claim
    pub issuer: String,
    /// Manager token lifetime in hours
    pub manager_token_hours: i64,
    /// Farmer token lifetime in hours
    pub farmer_token_hours: i64,
    /// Admin token lifetime in hours
    pub admin_token_hours: i64,
    /// Password-reset token lifetime in minutes
    pub reset_token_minutes: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "super-secret-key-change-in-production".to_string(),
            issuer: "barn-identity".to_string(),
            manager_token_hours: 24,
            farmer_token_hours: 1,
            admin_token_hours: 2,
            reset_token_minutes: 15,
        }
    }
}

/// Canonical bearer-token claims for all principals.
///
/// Role-specific identity fields are optional and omitted from the JSON
/// when absent: manager tokens carry `email` plus the authorization flags,
/// farmer tokens carry `phone_number` and `aadhar_number`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TokenClaims {
    /// Subject (principal ID; `"admin"` for the administrator)
    pub sub: String,
    /// Display name
    pub name: String,
    /// Principal role: "manager", "farmer" or "admin"
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aadhar_number: Option<String>,
    #[serde(default)]
    pub is_authorized: bool,
    #[serde(default)]
    pub is_google_account: bool,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Issuer
    pub iss: String,
}

impl TokenClaims {
    fn stamped(mut self, lifetime: Duration, config: &JwtConfig) -> Self {
        let now = Utc::now();
        self.iat = now.timestamp();
        self.exp = (now + lifetime).timestamp();
        self.iss = config.issuer.clone();
        self
    }

    /// Claims for a manager, mirroring the stored record at login time.
    pub fn for_manager(manager: &Manager, config: &JwtConfig) -> Self {
        Self {
            sub: manager.id.clone(),
            name: manager.name.clone(),
            role: Role::Manager.as_str().to_string(),
            email: Some(manager.email.clone()),
            phone_number: manager.phone_number.clone(),
            aadhar_number: None,
            is_authorized: manager.is_authorized,
            is_google_account: manager.is_google_account,
            exp: 0,
            iat: 0,
            iss: String::new(),
        }
        .stamped(Duration::hours(config.manager_token_hours), config)
    }

    /// Claims for a farmer.
    pub fn for_farmer(farmer: &Farmer, config: &JwtConfig) -> Self {
        Self {
            sub: farmer.id.clone(),
            name: farmer.full_name.clone(),
            role: Role::Farmer.as_str().to_string(),
            email: None,
            phone_number: Some(farmer.phone_number.clone()),
            aadhar_number: Some(farmer.aadhar_number.clone()),
            is_authorized: false,
            is_google_account: false,
            exp: 0,
            iat: 0,
            iss: String::new(),
        }
        .stamped(Duration::hours(config.farmer_token_hours), config)
    }

    /// Claims for the configuration-defined administrator. No persisted
    /// record backs these; the role is asserted by signature alone.
    pub fn for_admin(email: &str, config: &JwtConfig) -> Self {
        Self {
            sub: Role::Admin.as_str().to_string(),
            name: "Administrator".to_string(),
            role: Role::Admin.as_str().to_string(),
            email: Some(email.to_string()),
            phone_number: None,
            aadhar_number: None,
            is_authorized: true,
            is_google_account: false,
            exp: 0,
            iat: 0,
            iss: String::new(),
        }
        .stamped(Duration::hours(config.admin_token_hours), config)
    }

    /// Check if the token is expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// Check if the principal has the admin role
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin.as_str()
    }
}

/// Sign a claim set
pub fn create_token(
    claims: &TokenClaims,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify signature, expiry and issuer, and decode the claims
pub fn verify_token(
    token: &str,
    config: &JwtConfig,
) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.issuer]);

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

// ── Password-reset tokens ──────────────────────────────────────

const RESET_PURPOSE: &str = "password_reset";

/// Single-purpose claims embedded in password-reset links.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ResetClaims {
    /// Manager ID
    pub sub: String,
    /// Fixed purpose marker; verification rejects anything else
    pub purpose: String,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
}

/// Mint a short-lived reset token containing only the manager ID.
pub fn create_reset_token(
    manager_id: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = ResetClaims {
        sub: manager_id.to_string(),
        purpose: RESET_PURPOSE.to_string(),
        exp: (now + Duration::minutes(config.reset_token_minutes)).timestamp(),
        iat: now.timestamp(),
        iss: config.issuer.clone(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify a reset token and return the embedded manager ID.
///
/// Fails on bad signature, expiry, or a wrong `purpose` claim (so ordinary
/// bearer tokens are rejected here).
pub fn verify_reset_token(
    token: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.issuer]);

    let token_data = decode::<ResetClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    if token_data.claims.purpose != RESET_PURPOSE {
        return Err(jsonwebtoken::errors::ErrorKind::InvalidToken.into());
    }

    Ok(token_data.claims.sub)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn manager() -> Manager {
        Manager {
            id: "mgr-1".into(),
            name: "Asha".into(),
            email: "asha@example.com".into(),
            phone_number: Some("9876543210".into()),
            password_hash: "$2b$12$hash".into(),
            google_id: None,
            is_google_account: false,
            is_authorized: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn farmer() -> Farmer {
        Farmer {
            id: "frm-1".into(),
            full_name: "Ravi".into(),
            phone_number: "9876543210".into(),
            aadhar_number: "123456789012".into(),
            cultivation_practices: None,
            land_area: 2.5,
            land_unit: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn manager_token_roundtrip_preserves_identity() {
        let config = JwtConfig::default();
        let claims = TokenClaims::for_manager(&manager(), &config);
        let token = create_token(&claims, &config).unwrap();

        let decoded = verify_token(&token, &config).unwrap();
        assert_eq!(decoded.sub, "mgr-1");
        assert_eq!(decoded.email.as_deref(), Some("asha@example.com"));
        assert_eq!(decoded.role, "manager");
        assert!(decoded.is_authorized);
        assert!(!decoded.is_expired());
    }

    #[test]
    fn farmer_token_carries_phone_and_aadhar() {
        let config = JwtConfig::default();
        let claims = TokenClaims::for_farmer(&farmer(), &config);
        let token = create_token(&claims, &config).unwrap();

        let decoded = verify_token(&token, &config).unwrap();
        assert_eq!(decoded.role, "farmer");
        assert_eq!(decoded.phone_number.as_deref(), Some("9876543210"));
        assert_eq!(decoded.aadhar_number.as_deref(), Some("123456789012"));
        assert!(decoded.email.is_none());
    }

    #[test]
    fn admin_token_has_admin_role() {
        let config = JwtConfig::default();
        let claims = TokenClaims::for_admin("root@example.com", &config);
        let token = create_token(&claims, &config).unwrap();

        let decoded = verify_token(&token, &config).unwrap();
        assert!(decoded.is_admin());
        assert_eq!(decoded.sub, "admin");
    }

    #[test]
    fn garbage_token_is_rejected() {
        let config = JwtConfig::default();
        assert!(verify_token("not-a-token", &config).is_err());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let config = JwtConfig::default();
        let claims = TokenClaims::for_manager(&manager(), &config);
        let token = create_token(&claims, &config).unwrap();

        let other = JwtConfig {
            secret: "another-secret".into(),
            ..JwtConfig::default()
        };
        assert!(verify_token(&token, &other).is_err());
    }

    #[test]
    fn reset_token_roundtrip() {
        let config = JwtConfig::default();
        let token = create_reset_token("mgr-1", &config).unwrap();
        assert_eq!(verify_reset_token(&token, &config).unwrap(), "mgr-1");
    }

    #[test]
    fn login_token_is_not_a_reset_token() {
        let config = JwtConfig::default();
        let claims = TokenClaims::for_manager(&manager(), &config);
        let token = create_token(&claims, &config).unwrap();

        assert!(verify_reset_token(&token, &config).is_err());
    }

    #[test]
    fn expired_reset_token_is_rejected() {
        // Far enough in the past to clear the default decode leeway.
        let config = JwtConfig {
            reset_token_minutes: -5,
            ..JwtConfig::default()
        };
        let token = create_reset_token("mgr-1", &config).unwrap();
        assert!(verify_reset_token(&token, &config).is_err());
    }
}
