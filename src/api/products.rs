//! Product endpoints - catalog CRUD and search.
//!
//! Reads are public catalog access; mutations require a bearer credential.

use crate::api::auth::authenticate;
use crate::api::response::{created, ok};
use crate::api::AppState;
use crate::core::product::{self, NewProduct, ProductChanges, ProductFilter};
use crate::errors::{Error, Result};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::Response;

/// `POST /api/products`
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<NewProduct>,
) -> Result<Response> {
    authenticate(state.identity.as_ref(), &headers).await?;
    let product = product::create_product(&state.db, body).await?;
    Ok(created(product))
}

/// `GET /api/products`
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> Result<Response> {
    let page = product::search_products(&state.db, filter).await?;
    Ok(ok(page))
}

/// `GET /api/products/:id`
pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response> {
    let product = product::get_product_by_id(&state.db, id)
        .await?
        .ok_or(Error::ProductNotFound { id })?;
    Ok(ok(product))
}

/// `PUT /api/products/:id`
pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<ProductChanges>,
) -> Result<Response> {
    authenticate(state.identity.as_ref(), &headers).await?;
    let product = product::update_product(&state.db, id, body).await?;
    Ok(ok(product))
}

/// `DELETE /api/products/:id`
pub async fn remove(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Response> {
    authenticate(state.identity.as_ref(), &headers).await?;
    product::delete_product(&state.db, id).await?;
    Ok(ok(serde_json::json!({ "deleted": id })))
}
