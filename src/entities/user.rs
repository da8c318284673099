//! User entity - External identity records, consumed read-only.
//!
//! Credential issuance and rotation happen outside this backend; a user row
//! only exists so an opaque bearer token can be resolved to `(user id, role)`
//! and so report ownership can be checked. Nothing here ever writes users
//! except the config-driven seeding on startup.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name
    pub name: String,
    /// Opaque bearer credential issued by the external identity service
    #[sea_orm(unique)]
    #[serde(skip_serializing)]
    pub api_token: String,
    /// Role: "admin" or "user"
    pub role: String,
    /// Inactive users cannot authenticate
    pub active: bool,
    /// When the user record was created
    pub created_at: DateTime,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One user owns many reports
    #[sea_orm(has_many = "super::report::Entity")]
    Reports,
}

impl Related<super::report::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reports.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
