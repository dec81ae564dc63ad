//! Google OAuth code-flow client.
//!
//! Exchanges the frontend popup's authorization code for tokens, then
//! validates the returned ID token against Google's tokeninfo endpoint and
//! checks the audience before trusting any claim in it.

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::ports::{GoogleAuthProvider, GoogleProfile};
use crate::domain::{DomainError, DomainResult};

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// Settings for the Google OAuth client.
#[derive(Debug, Clone, Default)]
pub struct GoogleSettings {
    pub client_id: String,
    pub client_secret: String,
}

pub struct GoogleOAuthClient {
    http: reqwest::Client,
    settings: GoogleSettings,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    id_token: String,
}

#[derive(Debug, Deserialize)]
struct TokenInfo {
    aud: String,
    email: Option<String>,
    name: Option<String>,
    sub: String,
}

impl GoogleOAuthClient {
    pub fn new(settings: GoogleSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            settings,
        }
    }
}

fn upstream(e: impl std::fmt::Display) -> DomainError {
    DomainError::Upstream(format!("Google OAuth: {}", e))
}

#[async_trait]
impl GoogleAuthProvider for GoogleOAuthClient {
    async fn exchange_code(&self, code: &str) -> DomainResult<GoogleProfile> {
        // "postmessage" is the fixed redirect for the code-flow popup.
        let params = [
            ("code", code),
            ("client_id", self.settings.client_id.as_str()),
            ("client_secret", self.settings.client_secret.as_str()),
            ("redirect_uri", "postmessage"),
            ("grant_type", "authorization_code"),
        ];

        let tokens: TokenResponse = self
            .http
            .post(TOKEN_URL)
            .form(&params)
            .send()
            .await
            .map_err(upstream)?
            .error_for_status()
            .map_err(upstream)?
            .json()
            .await
            .map_err(upstream)?;

        let info: TokenInfo = self
            .http
            .get(TOKENINFO_URL)
            .query(&[("id_token", tokens.id_token.as_str())])
            .send()
            .await
            .map_err(upstream)?
            .error_for_status()
            .map_err(upstream)?
            .json()
            .await
            .map_err(upstream)?;

        if info.aud != self.settings.client_id {
            return Err(upstream("ID token audience mismatch"));
        }

        let email = info
            .email
            .ok_or_else(|| upstream("ID token carries no email"))?;
        let name = info.name.unwrap_or_else(|| email.clone());

        Ok(GoogleProfile {
            email,
            name,
            subject: info.sub,
        })
    }
}
