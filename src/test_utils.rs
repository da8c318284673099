//! Shared test utilities for clearlabel.
//!
//! Provides the in-memory database setup, entity factories with sensible
//! defaults, and fake implementations of the two external-collaborator
//! seams (AI gateway, identity resolver is exercised through real user
//! records instead).

use crate::{
    ai::{AiAnalysis, AiGateway, AnalysisSections, GeneratedQuestion},
    api::AppState,
    api::auth::StoreIdentityResolver,
    core::access::{Identity, Role},
    core::product::{self, NewProduct},
    entities::{self, report, user},
};
use crate::errors::Result;
use async_trait::async_trait;
use sea_orm::{DatabaseConnection, Set, prelude::*};
use serde_json::{Map, Value, json};
use std::sync::Arc;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates an active test user whose token is derived from the name.
pub async fn create_test_user(
    db: &DatabaseConnection,
    name: &str,
    role: &str,
) -> Result<entities::user::Model> {
    insert_user(db, name, role, true).await
}

/// Creates an inactive user, for credential-rejection tests.
pub async fn create_inactive_user(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::user::Model> {
    insert_user(db, name, "user", false).await
}

async fn insert_user(
    db: &DatabaseConnection,
    name: &str,
    role: &str,
    active: bool,
) -> Result<entities::user::Model> {
    let model = user::ActiveModel {
        name: Set(name.to_string()),
        api_token: Set(format!("{name}-token")),
        role: Set(role.to_string()),
        active: Set(active),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Builds the identity a resolver would produce for the given user record.
#[must_use]
pub fn identity_for(user: &entities::user::Model) -> Identity {
    Identity {
        user_id: user.id,
        role: Role::parse(&user.role),
    }
}

/// Creates a test product with sensible defaults (Skincare, one ingredient).
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::product::Model> {
    create_custom_product(db, name, "Skincare", "Acme").await
}

/// Creates a test product with custom category and brand.
pub async fn create_custom_product(
    db: &DatabaseConnection,
    name: &str,
    category: &str,
    brand: &str,
) -> Result<entities::product::Model> {
    product::create_product(
        db,
        NewProduct {
            name: name.to_string(),
            category: category.to_string(),
            brand: brand.to_string(),
            ingredients: vec!["water".to_string()],
            description: None,
            certifications: None,
            packaging: None,
            sustainability: None,
        },
    )
    .await
}

/// Builds a product model without touching a database, for pure-function
/// tests (scoring, fallback generators).
#[must_use]
pub fn product_fixture(name: &str, category: &str) -> entities::product::Model {
    let now = chrono::Utc::now().naive_utc();
    entities::product::Model {
        id: 1,
        name: name.to_string(),
        category: category.to_string(),
        brand: "Acme".to_string(),
        ingredients: entities::product::IngredientList(vec!["water".to_string()]),
        description: None,
        certifications: None,
        packaging: None,
        sustainability: None,
        created_at: now,
        updated_at: now,
    }
}

/// Inserts a completed report row directly, bypassing the creation flow.
/// Use this for listing/statistics tests that need exact scores.
pub async fn create_test_report(
    db: &DatabaseConnection,
    user_id: i64,
    product_id: i64,
    score: i32,
) -> Result<entities::report::Model> {
    let now = chrono::Utc::now().naive_utc();
    let model = report::ActiveModel {
        product_id: Set(product_id),
        user_id: Set(user_id),
        summary: Set(format!("Test report scored {score}")),
        transparency_score: Set(score),
        analysis: Set(report::ReportAnalysis::default()),
        answers: Set(json!({ "ingredients": "water" })),
        pdf_path: Set(None),
        status: Set("completed".to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Fake AI gateway returning canned content, never touching the network.
pub struct FixedAiGateway {
    /// Score the analysis reports; None forces the scorer's baseline path
    pub score: Option<f64>,
    /// Summary text returned verbatim
    pub summary: String,
}

#[async_trait]
impl AiGateway for FixedAiGateway {
    async fn request_analysis(
        &self,
        _product: &entities::product::Model,
        _answers: &Map<String, Value>,
    ) -> AiAnalysis {
        AiAnalysis {
            summary: self.summary.clone(),
            transparency_score: self.score,
            questions: None,
            analysis: AnalysisSections {
                strengths: vec!["canned strength".to_string()],
                improvements: vec!["canned improvement".to_string()],
                recommendations: vec!["canned recommendation".to_string()],
            },
        }
    }

    async fn request_questions(
        &self,
        _product: &entities::product::Model,
    ) -> Vec<GeneratedQuestion> {
        (0..5)
            .map(|i| GeneratedQuestion {
                text: format!("Canned question {i}?"),
                kind: "text".to_string(),
                options: None,
                required: i < 2,
            })
            .collect()
    }
}

/// A gateway with no score, exercising the baseline fallback in the scorer.
#[must_use]
pub fn fixed_gateway() -> FixedAiGateway {
    FixedAiGateway {
        score: None,
        summary: "Canned summary".to_string(),
    }
}

/// A gateway reporting the given AI score.
#[must_use]
pub fn scored_gateway(score: f64) -> FixedAiGateway {
    FixedAiGateway {
        score: Some(score),
        summary: "Canned summary".to_string(),
    }
}

/// A gateway returning the given summary (scored, so output is stable).
#[must_use]
pub fn summary_gateway(summary: String) -> FixedAiGateway {
    FixedAiGateway {
        score: Some(50.0),
        summary,
    }
}

/// Builds a full router over a fresh in-memory database, a canned gateway
/// and the store-backed identity resolver. Returns the connection too so
/// tests can seed users and fixtures.
pub async fn test_router() -> Result<(axum::Router, DatabaseConnection)> {
    let db = setup_test_db().await?;
    let state = AppState::new(
        db.clone(),
        Arc::new(scored_gateway(70.0)),
        Arc::new(StoreIdentityResolver::new(db.clone())),
    );
    Ok((crate::api::router(state), db))
}

/// Sets up a complete test environment with a product.
/// Returns (db, product) for questionnaire tests.
pub async fn setup_with_product() -> Result<(DatabaseConnection, entities::product::Model)> {
    let db = setup_test_db().await?;
    let product = create_test_product(&db, "Test Product").await?;
    Ok((db, product))
}

/// Sets up a complete test environment with a user and a product.
/// Returns (db, user, product) for report tests.
pub async fn setup_with_user_and_product() -> Result<(
    DatabaseConnection,
    entities::user::Model,
    entities::product::Model,
)> {
    let db = setup_test_db().await?;
    let user = create_test_user(&db, "alice", "user").await?;
    let product = create_test_product(&db, "Test Product").await?;
    Ok((db, user, product))
}
