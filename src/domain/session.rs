//! Session ledger records
//!
//! An append-only audit trail of login (and best-effort logout) events,
//! independent of token validity: there is no revocation, a "logout" is a
//! ledger annotation only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Principal role encoded in tokens and ledger rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Manager,
    Farmer,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Manager => "manager",
            Role::Farmer => "farmer",
            Role::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "manager" => Some(Role::Manager),
            "farmer" => Some(Role::Farmer),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// How a principal authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginMethod {
    Password,
    Google,
    Phone,
}

impl LoginMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoginMethod::Password => "password",
            LoginMethod::Google => "google",
            LoginMethod::Phone => "phone",
        }
    }
}

/// One row of the session ledger. Immutable once written, except for the
/// single later stamp of `logout_time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginSession {
    pub id: String,
    pub principal_id: String,
    pub role: Role,
    pub method: LoginMethod,
    pub login_time: DateTime<Utc>,
    pub logout_time: Option<DateTime<Utc>>,
}
