//! Farmer domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered producer account.
///
/// Farmers carry no password; they authenticate via possession of the
/// registered phone number plus an OTP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Farmer {
    pub id: String,
    pub full_name: String,
    /// Raw 10-digit string, no country code.
    pub phone_number: String,
    /// Unique 12-digit national ID.
    pub aadhar_number: String,
    pub cultivation_practices: Option<String>,
    pub land_area: f64,
    pub land_unit: Option<LandUnit>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LandUnit {
    Acre,
    Hectare,
}

/// Fields for creating or replacing a farmer profile.
///
/// Profile operations only — the identity core never writes farmer rows.
#[derive(Debug, Clone)]
pub struct FarmerProfile {
    pub full_name: String,
    pub phone_number: String,
    pub aadhar_number: String,
    pub cultivation_practices: Option<String>,
    pub land_area: f64,
    pub land_unit: Option<LandUnit>,
}
