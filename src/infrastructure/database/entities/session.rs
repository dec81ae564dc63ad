//! Session ledger entity for database

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Principal role recorded on a session row
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum Role {
    #[sea_orm(string_value = "manager")]
    Manager,
    #[sea_orm(string_value = "farmer")]
    Farmer,
}

/// Authentication method recorded on a session row
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum Method {
    #[sea_orm(string_value = "password")]
    Password,
    #[sea_orm(string_value = "google")]
    Google,
    #[sea_orm(string_value = "phone")]
    Phone,
}

/// Session ledger row. Append-only; `logout_time` is stamped at most once.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sessions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub principal_id: String,
    pub role: Role,
    pub method: Method,
    pub login_time: DateTime<Utc>,
    pub logout_time: Option<DateTime<Utc>>,
}

// `principal_id` points at either a manager or a farmer depending on
// `role`, so no foreign key is declared.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
