//! Bearer credential resolution.
//!
//! Credentials are opaque strings issued by an external identity service;
//! this module only resolves them to `(user id, role)` through the
//! `IdentityResolver` seam. The store-backed resolver matches the token
//! against active user records; tests swap in a static resolver instead.

use crate::core::access::{Identity, Role};
use crate::entities::{User, user};
use crate::errors::{Error, Result};
use async_trait::async_trait;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

/// Seam to the external identity collaborator.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolves a bearer credential to an identity, or None when the
    /// credential is unknown or inactive.
    async fn resolve(&self, token: &str) -> Result<Option<Identity>>;
}

/// Resolver backed by the user records in the document store.
pub struct StoreIdentityResolver {
    db: DatabaseConnection,
}

impl StoreIdentityResolver {
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl IdentityResolver for StoreIdentityResolver {
    async fn resolve(&self, token: &str) -> Result<Option<Identity>> {
        let record = User::find()
            .filter(user::Column::ApiToken.eq(token))
            .filter(user::Column::Active.eq(true))
            .one(&self.db)
            .await?;

        Ok(record.map(|u| Identity {
            user_id: u.id,
            role: Role::parse(&u.role),
        }))
    }
}

/// Extracts the bearer token from an Authorization header, if present.
#[must_use]
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Authenticates a request: missing, malformed, unknown or inactive
/// credentials all yield `Unauthorized` before any other work happens.
///
/// # Errors
/// Returns `Unauthorized` or a database error from the resolver.
pub async fn authenticate(
    resolver: &dyn IdentityResolver,
    headers: &HeaderMap,
) -> Result<Identity> {
    let token = bearer_token(headers).ok_or(Error::Unauthorized)?;
    resolver.resolve(token).await?.ok_or(Error::Unauthorized)
}
