//! Manager entity for database

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Manager model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "managers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    /// Stored lower-cased; lookups normalize before matching.
    #[sea_orm(unique)]
    pub email: String,
    pub phone_number: Option<String>,
    /// Empty string for Google accounts.
    pub password_hash: String,
    pub google_id: Option<String>,
    pub is_google_account: bool,
    pub is_authorized: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
