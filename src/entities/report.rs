//! Report entity - Represents a scored transparency report for a product.
//!
//! One report is written per product-answer submission. Reports are owned by
//! the user who created them; only the owner or an admin may read or mutate
//! a report. A `completed` report always carries a valid transparency score.

use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Structured analysis attached to a report, stored as a JSON object column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct ReportAnalysis {
    /// Disclosure practices worth highlighting
    #[serde(default)]
    pub strengths: Vec<String>,
    /// Gaps the producer should close
    #[serde(default)]
    pub improvements: Vec<String>,
    /// Concrete next steps
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// Report database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reports")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the report
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Product the report covers
    pub product_id: i64,
    /// User who created (and owns) the report
    pub user_id: i64,
    /// Human-readable summary, at most 2000 characters
    pub summary: String,
    /// Final transparency score in [0, 100]
    pub transparency_score: i32,
    /// Strengths/improvements/recommendations lists
    pub analysis: ReportAnalysis,
    /// The submitted answers, an arbitrary-shape JSON mapping
    pub answers: Json,
    /// Optional path to a rendered PDF artifact
    pub pdf_path: Option<String>,
    /// Lifecycle status: "draft", "pending" or "completed"
    pub status: String,
    /// When the report was created
    pub created_at: DateTime,
    /// When the report was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Report and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each report covers one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
    /// Each report is owned by one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
