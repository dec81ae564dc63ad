//! Application configuration
//!
//! Loaded from a TOML file (default `~/.config/barn-identity/config.toml`,
//! overridable via the `BARN_IDENTITY_CONFIG` environment variable). Every
//! section has defaults so a missing or partial file still yields a
//! runnable development configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::providers::{GoogleSettings, MailSettings, SmsSettings};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub security: SecurityConfig,
    pub admin: AdminConfig,
    pub google: GoogleConfig,
    pub sms: SmsConfig,
    pub email: EmailConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub api_host: String,
    pub api_port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 8080,
            shutdown_timeout: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub url: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "sqlite://./barn-identity.db?mode=rwc".to_string(),
        }
    }
}

impl DatabaseSettings {
    /// `DATABASE_URL` wins over the file value.
    pub fn connection_url(&self) -> String {
        std::env::var("DATABASE_URL").unwrap_or_else(|_| self.url.clone())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub manager_token_hours: i64,
    pub farmer_token_hours: i64,
    pub admin_token_hours: i64,
    pub reset_token_minutes: i64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "super-secret-key-change-in-production".to_string(),
            manager_token_hours: 24,
            farmer_token_hours: 1,
            admin_token_hours: 2,
            reset_token_minutes: 15,
        }
    }
}

/// The administrator account: nothing but these two secrets.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub email: String,
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            email: "admin@example.com".to_string(),
            password: "change-me".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SmsConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub verify_service_sid: String,
    /// When true, `test_otp` verifies without contacting the provider.
    pub test_otp_enabled: bool,
    pub test_otp: String,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            account_sid: String::new(),
            auth_token: String::new(),
            verify_service_sid: String::new(),
            test_otp_enabled: true,
            test_otp: "123456".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    pub relay_url: String,
    pub api_key: String,
    pub from_address: String,
    /// Frontend base URL embedded in reset links
    pub client_url: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            relay_url: String::new(),
            api_key: String::new(),
            from_address: "no-reply@barn.example.com".to_string(),
            client_url: "http://localhost:5173".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            secret: self.security.jwt_secret.clone(),
            issuer: "barn-identity".to_string(),
            manager_token_hours: self.security.manager_token_hours,
            farmer_token_hours: self.security.farmer_token_hours,
            admin_token_hours: self.security.admin_token_hours,
            reset_token_minutes: self.security.reset_token_minutes,
        }
    }

    pub fn google_settings(&self) -> GoogleSettings {
        GoogleSettings {
            client_id: self.google.client_id.clone(),
            client_secret: self.google.client_secret.clone(),
        }
    }

    pub fn sms_settings(&self) -> SmsSettings {
        SmsSettings {
            account_sid: self.sms.account_sid.clone(),
            auth_token: self.sms.auth_token.clone(),
            verify_service_sid: self.sms.verify_service_sid.clone(),
        }
    }

    pub fn mail_settings(&self) -> MailSettings {
        MailSettings {
            relay_url: self.email.relay_url.clone(),
            api_key: self.email.api_key.clone(),
            from_address: self.email.from_address.clone(),
        }
    }
}

/// Default configuration file location
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("barn-identity")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.server.api_port, 8080);
        assert_eq!(cfg.security.manager_token_hours, 24);
        assert_eq!(cfg.security.farmer_token_hours, 1);
        assert_eq!(cfg.security.admin_token_hours, 2);
        assert_eq!(cfg.security.reset_token_minutes, 15);
        assert!(cfg.sms.test_otp_enabled);
        assert_eq!(cfg.sms.test_otp, "123456");
    }

    #[test]
    fn partial_toml_overrides_one_section() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [security]
            jwt_secret = "s3cr3t"
            farmer_token_hours = 2

            [admin]
            email = "root@barn.example.com"
            password = "hunter2"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.security.jwt_secret, "s3cr3t");
        assert_eq!(cfg.security.farmer_token_hours, 2);
        assert_eq!(cfg.security.manager_token_hours, 24);
        assert_eq!(cfg.admin.email, "root@barn.example.com");
        assert_eq!(cfg.server.api_host, "0.0.0.0");
    }

    #[test]
    fn jwt_config_mirrors_security_section() {
        let cfg = AppConfig::default();
        let jwt = cfg.jwt_config();
        assert_eq!(jwt.issuer, "barn-identity");
        assert_eq!(jwt.manager_token_hours, 24);
    }
}
