//! Farmer entity for database

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Land measurement unit
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum LandUnit {
    #[sea_orm(string_value = "acre")]
    Acre,
    #[sea_orm(string_value = "hectare")]
    Hectare,
}

/// Farmer model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "farmers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub full_name: String,
    /// Raw 10-digit string, no country code.
    #[sea_orm(unique)]
    pub phone_number: String,
    #[sea_orm(unique)]
    pub aadhar_number: String,
    pub cultivation_practices: Option<String>,
    pub land_area: f64,
    pub land_unit: Option<LandUnit>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
