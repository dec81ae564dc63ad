//! Farmer DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{DomainError, DomainResult, Farmer, FarmerProfile, LandUnit};
use crate::shared::validations::{is_valid_aadhar_number, is_valid_phone_number};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SendOtpRequest {
    #[validate(length(equal = 10, message = "phone number must be 10 digits"))]
    pub phone_number: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct VerifyOtpRequest {
    #[validate(length(equal = 10, message = "phone number must be 10 digits"))]
    pub phone_number: String,
    #[validate(length(min = 4, max = 8, message = "OTP is required"))]
    pub otp: String,
}

/// Provider-reported OTP delivery status.
#[derive(Debug, Serialize, ToSchema)]
pub struct SendOtpResponse {
    pub status: String,
    pub to: String,
}

/// Logout acknowledgement; the client is expected to drop its token.
#[derive(Debug, Serialize, ToSchema)]
pub struct LogoutResponse {
    pub clear_token: bool,
}

/// Farmer API representation
#[derive(Debug, Serialize, ToSchema)]
pub struct FarmerDto {
    pub id: String,
    pub full_name: String,
    pub phone_number: String,
    pub aadhar_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cultivation_practices: Option<String>,
    pub land_area: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub land_unit: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Farmer> for FarmerDto {
    fn from(f: Farmer) -> Self {
        Self {
            id: f.id,
            full_name: f.full_name,
            phone_number: f.phone_number,
            aadhar_number: f.aadhar_number,
            cultivation_practices: f.cultivation_practices,
            land_area: f.land_area,
            land_unit: f.land_unit.map(|u| unit_to_str(u).to_string()),
            created_at: f.created_at,
            updated_at: f.updated_at,
        }
    }
}

fn unit_to_str(unit: LandUnit) -> &'static str {
    match unit {
        LandUnit::Acre => "acre",
        LandUnit::Hectare => "hectare",
    }
}

/// Create/replace farmer profile request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpsertFarmerRequest {
    #[validate(length(min = 1, max = 255, message = "full name is required"))]
    pub full_name: String,
    #[validate(length(equal = 10, message = "phone number must be 10 digits"))]
    pub phone_number: String,
    #[validate(length(equal = 12, message = "Aadhaar number must be 12 digits"))]
    pub aadhar_number: String,
    pub cultivation_practices: Option<String>,
    #[validate(range(min = 0.01, message = "land area must be positive"))]
    pub land_area: f64,
    /// "acre" or "hectare"
    pub land_unit: Option<String>,
}

impl UpsertFarmerRequest {
    /// Digit-format and enum checks that the derive attributes cannot
    /// express.
    pub fn into_profile(self) -> DomainResult<FarmerProfile> {
        if !is_valid_phone_number(&self.phone_number) {
            return Err(DomainError::Validation(
                "Phone number must be a 10-digit number".into(),
            ));
        }
        if !is_valid_aadhar_number(&self.aadhar_number) {
            return Err(DomainError::Validation(
                "Aadhaar number must be a 12-digit number".into(),
            ));
        }

        let land_unit = match self.land_unit.as_deref() {
            None => None,
            Some("acre") => Some(LandUnit::Acre),
            Some("hectare") => Some(LandUnit::Hectare),
            Some(_) => {
                return Err(DomainError::Validation(
                    "Land unit must be either \"acre\" or \"hectare\"".into(),
                ))
            }
        };

        Ok(FarmerProfile {
            full_name: self.full_name,
            phone_number: self.phone_number,
            aadhar_number: self.aadhar_number,
            cultivation_practices: self.cultivation_practices,
            land_area: self.land_area,
            land_unit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> UpsertFarmerRequest {
        UpsertFarmerRequest {
            full_name: "Ravi".into(),
            phone_number: "9876543210".into(),
            aadhar_number: "123456789012".into(),
            cultivation_practices: None,
            land_area: 2.5,
            land_unit: Some("acre".into()),
        }
    }

    #[test]
    fn valid_request_converts() {
        let profile = request().into_profile().unwrap();
        assert_eq!(profile.land_unit, Some(LandUnit::Acre));
    }

    #[test]
    fn bad_unit_is_rejected() {
        let mut r = request();
        r.land_unit = Some("bigha".into());
        assert!(r.into_profile().is_err());
    }

    #[test]
    fn non_digit_phone_is_rejected() {
        let mut r = request();
        r.phone_number = "98765abc10".into();
        assert!(r.into_profile().is_err());
    }
}
