//! Question endpoints - questionnaire generation, listing and answering.

use crate::api::auth::authenticate;
use crate::api::response::{created, ok};
use crate::api::AppState;
use crate::core::question::{self, AnswerSubmission};
use crate::errors::Result;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Response;
use serde::Deserialize;

/// Body of an answer submission request.
#[derive(Debug, Deserialize)]
pub struct SubmitAnswers {
    pub answers: Vec<AnswerSubmission>,
}

/// `POST /api/products/:id/questions` - generate (or regenerate) the
/// questionnaire for a product through the AI gateway.
pub async fn generate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(product_id): Path<i64>,
) -> Result<Response> {
    authenticate(state.identity.as_ref(), &headers).await?;
    let questions =
        question::generate_for_product(&state.db, state.ai.as_ref(), product_id).await?;
    Ok(created(questions))
}

/// `GET /api/products/:id/questions`
pub async fn list(State(state): State<AppState>, Path(product_id): Path<i64>) -> Result<Response> {
    let questions = question::list_for_product(&state.db, product_id).await?;
    Ok(ok(questions))
}

/// `PUT /api/products/:id/answers`
pub async fn submit_answers(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(product_id): Path<i64>,
    Json(body): Json<SubmitAnswers>,
) -> Result<Response> {
    authenticate(state.identity.as_ref(), &headers).await?;
    let questions = question::submit_answers(&state.db, product_id, body.answers).await?;
    Ok(ok(questions))
}
