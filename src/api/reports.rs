//! Report endpoints - create, read, update, delete, list and statistics.
//!
//! Handlers stay thin: authenticate, delegate to the core, wrap the result
//! in the response envelope. Every route here requires a bearer credential
//! because reports are always identity-scoped.

use crate::api::auth::authenticate;
use crate::api::response::{created, ok};
use crate::api::AppState;
use crate::core::report::{self, CreateReport, ReportFilter, UpdateReport};
use crate::errors::Result;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::Response;

/// `POST /api/reports`
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CreateReport>,
) -> Result<Response> {
    let actor = authenticate(state.identity.as_ref(), &headers).await?;
    let report = report::create_report(&state.db, state.ai.as_ref(), &actor, body).await?;
    Ok(created(report))
}

/// `GET /api/reports`
pub async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(filter): Query<ReportFilter>,
) -> Result<Response> {
    let actor = authenticate(state.identity.as_ref(), &headers).await?;
    let page = report::list_reports(&state.db, &actor, filter).await?;
    Ok(ok(page))
}

/// `GET /api/reports/:id`
pub async fn get(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Response> {
    let actor = authenticate(state.identity.as_ref(), &headers).await?;
    let report = report::get_report(&state.db, &actor, id).await?;
    Ok(ok(report))
}

/// `PUT /api/reports/:id`
pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<UpdateReport>,
) -> Result<Response> {
    let actor = authenticate(state.identity.as_ref(), &headers).await?;
    let report = report::update_report(&state.db, &actor, id, body).await?;
    Ok(ok(report))
}

/// `DELETE /api/reports/:id`
pub async fn remove(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Response> {
    let actor = authenticate(state.identity.as_ref(), &headers).await?;
    report::delete_report(&state.db, &actor, id).await?;
    Ok(ok(serde_json::json!({ "deleted": id })))
}

/// `GET /api/reports/stats/overview`
pub async fn stats(State(state): State<AppState>, headers: HeaderMap) -> Result<Response> {
    let actor = authenticate(state.identity.as_ref(), &headers).await?;
    let stats = report::report_stats(&state.db, &actor).await?;
    Ok(ok(stats))
}
