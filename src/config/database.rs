//! Database connection and schema management.
//!
//! Establishes the SeaORM connection and creates all tables from the entity
//! definitions via `Schema::create_table_from_entity`, so the schema always
//! matches the Rust structs without hand-written SQL. Also seeds the user
//! records listed in config.toml so a fresh instance can authenticate
//! requests immediately.

use crate::config::settings::SeedUser;
use crate::entities::{Product, Question, Report, User, user};
use crate::errors::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection, EntityTrait,
    QueryFilter, Schema, Set,
};
use tracing::info;

/// Establishes a connection to the database at the given URL.
///
/// # Errors
/// Returns an error if the connection cannot be established.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all necessary tables from the entity definitions.
///
/// Table creation is idempotent: existing tables are left untouched.
///
/// # Errors
/// Returns an error if a DDL statement fails.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut product_table = schema.create_table_from_entity(Product);
    let mut question_table = schema.create_table_from_entity(Question);
    let mut report_table = schema.create_table_from_entity(Report);
    let mut user_table = schema.create_table_from_entity(User);

    db.execute(builder.build(product_table.if_not_exists()))
        .await?;
    db.execute(builder.build(question_table.if_not_exists()))
        .await?;
    db.execute(builder.build(report_table.if_not_exists()))
        .await?;
    db.execute(builder.build(user_table.if_not_exists())).await?;

    Ok(())
}

/// Seeds the user records from config.toml, skipping tokens already present.
///
/// # Errors
/// Returns an error if a lookup or insert fails.
pub async fn seed_users(db: &DatabaseConnection, users: &[SeedUser]) -> Result<()> {
    for seed in users {
        let existing = User::find()
            .filter(user::Column::ApiToken.eq(seed.token.as_str()))
            .one(db)
            .await?;
        if existing.is_some() {
            continue;
        }

        let record = user::ActiveModel {
            name: Set(seed.name.clone()),
            api_token: Set(seed.token.clone()),
            role: Set(seed.role.clone()),
            active: Set(true),
            created_at: Set(chrono::Utc::now().naive_utc()),
            ..Default::default()
        };
        record.insert(db).await?;
        info!(user = %seed.name, role = %seed.role, "Seeded user record.");
    }
    Ok(())
}
