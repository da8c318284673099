//! API layer - HTTP routes, shared state and the serve loop.
//!
//! This layer stays deliberately thin: request parsing and the response
//! envelope live here, every domain decision lives in `core`. The shared
//! state carries the database handle plus the two external-collaborator
//! seams (AI gateway, identity resolver) behind trait objects so tests can
//! swap in fakes.

/// Bearer credential resolution
pub mod auth;
/// Product catalog endpoints
pub mod products;
/// Questionnaire endpoints
pub mod questions;
/// Report endpoints
pub mod reports;
/// Response envelope and error mapping
pub mod response;

use crate::ai::AiGateway;
use crate::api::auth::IdentityResolver;
use crate::errors::Result;
use axum::Router;
use axum::routing::{get, post, put};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

/// Shared state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection for all store operations
    pub db: DatabaseConnection,
    /// Seam to the external AI scoring/question service
    pub ai: Arc<dyn AiGateway>,
    /// Seam to the external identity service
    pub identity: Arc<dyn IdentityResolver>,
}

impl AppState {
    /// Creates the shared state from its three collaborators.
    #[must_use]
    pub fn new(
        db: DatabaseConnection,
        ai: Arc<dyn AiGateway>,
        identity: Arc<dyn IdentityResolver>,
    ) -> Self {
        Self { db, ai, identity }
    }
}

/// Builds the full application router.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/reports", post(reports::create).get(reports::list))
        .route("/api/reports/stats/overview", get(reports::stats))
        .route(
            "/api/reports/:id",
            get(reports::get)
                .put(reports::update)
                .delete(reports::remove),
        )
        .route("/api/products", post(products::create).get(products::list))
        .route(
            "/api/products/:id",
            get(products::get)
                .put(products::update)
                .delete(products::remove),
        )
        .route(
            "/api/products/:id/questions",
            post(questions::generate).get(questions::list),
        )
        .route("/api/products/:id/answers", put(questions::submit_answers))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds the listener and serves requests until the process stops.
///
/// # Errors
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(bind_addr: &str, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!(addr = %bind_addr, "Listening for API requests.");
    axum::serve(listener, router(state)).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_create_report_requires_credentials() -> crate::errors::Result<()> {
        let (router, _db) = test_router().await?;

        let response = router
            .oneshot(post_json(
                "/api/reports",
                None,
                &json!({ "productId": 1, "answers": {} }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["success"], json!(false));

        Ok(())
    }

    #[tokio::test]
    async fn test_report_flow_end_to_end() -> crate::errors::Result<()> {
        let (router, db) = test_router().await?;
        let alice = create_test_user(&db, "alice", "user").await?;
        let product = create_test_product(&db, "Gentle Cleanser").await?;

        let response = router
            .clone()
            .oneshot(post_json(
                "/api/reports",
                Some(&alice.api_token),
                &json!({
                    "productId": product.id,
                    "answers": { "ingredients": "water, glycerin", "sourcing": "EU" }
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"]["status"], json!("completed"));
        let score = body["data"]["transparencyScore"].as_i64().unwrap();
        assert!((0..=100).contains(&score));
        let report_id = body["data"]["id"].as_i64().unwrap();

        // The owner can read it back
        let response = router
            .clone()
            .oneshot(get_request(
                &format!("/api/reports/{report_id}"),
                Some(&alice.api_token),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_product_yields_not_found() -> crate::errors::Result<()> {
        let (router, db) = test_router().await?;
        let alice = create_test_user(&db, "alice", "user").await?;

        let response = router
            .oneshot(post_json(
                "/api/reports",
                Some(&alice.api_token),
                &json!({ "productId": 999, "answers": {} }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["success"], json!(false));

        Ok(())
    }

    #[tokio::test]
    async fn test_foreign_report_forbidden_admin_allowed() -> crate::errors::Result<()> {
        let (router, db) = test_router().await?;
        let alice = create_test_user(&db, "alice", "user").await?;
        let mallory = create_test_user(&db, "mallory", "user").await?;
        let admin = create_test_user(&db, "root", "admin").await?;
        let product = create_test_product(&db, "Gentle Cleanser").await?;
        let report = create_test_report(&db, alice.id, product.id, 70).await?;

        let uri = format!("/api/reports/{}", report.id);

        let response = router
            .clone()
            .oneshot(get_request(&uri, Some(&mallory.api_token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = router
            .clone()
            .oneshot(get_request(&uri, Some(&admin.api_token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        Ok(())
    }

    #[tokio::test]
    async fn test_stats_overview_empty_is_zeroed() -> crate::errors::Result<()> {
        let (router, db) = test_router().await?;
        let alice = create_test_user(&db, "alice", "user").await?;

        let response = router
            .oneshot(get_request(
                "/api/reports/stats/overview",
                Some(&alice.api_token),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"]["count"], json!(0));
        assert_eq!(body["data"]["averageScore"], json!(0.0));
        assert_eq!(body["data"]["scoreRanges"], json!([0, 0, 0, 0, 0]));

        Ok(())
    }

    #[tokio::test]
    async fn test_public_product_reads_need_no_credentials() -> crate::errors::Result<()> {
        let (router, db) = test_router().await?;
        let product = create_test_product(&db, "Gentle Cleanser").await?;

        let response = router
            .clone()
            .oneshot(get_request("/api/products", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(get_request(&format!("/api/products/{}", product.id), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"]["name"], json!("Gentle Cleanser"));

        Ok(())
    }

    #[tokio::test]
    async fn test_questionnaire_flow() -> crate::errors::Result<()> {
        let (router, db) = test_router().await?;
        let alice = create_test_user(&db, "alice", "user").await?;
        let product = create_test_product(&db, "Gentle Cleanser").await?;

        let response = router
            .clone()
            .oneshot(post_json(
                &format!("/api/products/{}/questions", product.id),
                Some(&alice.api_token),
                &json!({}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        let first_id = body["data"][0]["id"].as_i64().unwrap();

        let request = Request::builder()
            .method("PUT")
            .uri(format!("/api/products/{}/answers", product.id))
            .header(header::CONTENT_TYPE, "application/json")
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", alice.api_token),
            );
        let response = router
            .oneshot(
                request
                    .body(Body::from(
                        json!({ "answers": [{ "questionId": first_id, "answer": "water" }] })
                            .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"][0]["answer"], json!("water"));

        Ok(())
    }
}
