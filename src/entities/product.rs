//! Product entity - Represents catalog entries in the shared product catalog.
//!
//! Products carry the disclosure-relevant facts about an item: its category,
//! brand, ingredient list, and optional free-text disclosures. They are owned
//! by no user; reports and questionnaires reference them by id.

use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Ingredient list stored as a JSON array column. The core layer enforces
/// that it is never empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct IngredientList(pub Vec<String>);

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name of the product (e.g., "Gentle Cleanser")
    pub name: String,
    /// Product category (e.g., "Skincare", "Food & Beverage")
    pub category: String,
    /// Brand the product is sold under
    pub brand: String,
    /// Ordered ingredient list, at least one entry
    pub ingredients: IngredientList,
    /// Optional free-text description
    pub description: Option<String>,
    /// Optional certifications disclosure (e.g., "USDA Organic")
    pub certifications: Option<String>,
    /// Optional packaging disclosure
    pub packaging: Option<String>,
    /// Optional sustainability disclosure
    pub sustainability: Option<String>,
    /// When the product was created
    pub created_at: DateTime,
    /// When the product was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One product has many disclosure questions
    #[sea_orm(has_many = "super::question::Entity")]
    Questions,
    /// One product has many transparency reports
    #[sea_orm(has_many = "super::report::Entity")]
    Reports,
}

impl Related<super::question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Questions.def()
    }
}

impl Related<super::report::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reports.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
