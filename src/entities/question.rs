//! Question entity - Represents one disclosure question asked about a product.
//!
//! Questions are created in ordered batches when a questionnaire is generated
//! for a product. A user later attaches an answer to each question; answered
//! questions are never deleted in the normal flow.

use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Choice list for `select`/`multiselect` questions, stored as a JSON array.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct OptionList(pub Vec<String>);

/// Question database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "questions")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the question
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Product this question belongs to
    pub product_id: i64,
    /// The question text shown to the user
    pub text: String,
    /// Question kind: "text", "select" or "multiselect"
    #[serde(rename = "type")]
    pub kind: String,
    /// Choices for select/multiselect kinds, None for free text
    pub options: Option<OptionList>,
    /// Whether an answer is required for a complete disclosure
    pub required: bool,
    /// Position within the questionnaire, unique per product, starts at 0
    pub order: i32,
    /// The submitted answer, None until the user responds
    pub answer: Option<String>,
    /// When the question was generated
    pub created_at: DateTime,
    /// When the question was last modified (answer attach refreshes this)
    pub updated_at: DateTime,
}

/// Defines relationships between Question and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each question belongs to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
