//! HTTP implementation of the AI gateway.
//!
//! Posts the product and answers to the configured analysis service with a
//! bounded timeout and a single attempt (no retries). Every failure path
//! lands in the deterministic fallback generators; degradation is logged at
//! `warn` and is otherwise invisible to callers.

use crate::ai::{AiAnalysis, AiGateway, GeneratedQuestion, fallback_analysis, fallback_questions};
use crate::entities::product;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::time::Duration;
use tracing::warn;

/// Gateway backed by a remote HTTP service. A `None` base URL disables the
/// remote call entirely and serves fallback content directly.
pub struct HttpAiGateway {
    base_url: Option<String>,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct QuestionSetResponse {
    #[serde(default)]
    questions: Vec<GeneratedQuestion>,
}

impl HttpAiGateway {
    /// Creates a gateway targeting `base_url` with the given request timeout.
    #[must_use]
    pub fn new(base_url: Option<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { base_url, client }
    }

    async fn post_analysis(
        &self,
        base_url: &str,
        product: &product::Model,
        answers: &Map<String, Value>,
    ) -> Result<AiAnalysis, reqwest::Error> {
        self.client
            .post(format!("{}/analyze", base_url.trim_end_matches('/')))
            .json(&json!({ "product": product, "answers": answers }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    async fn post_questions(
        &self,
        base_url: &str,
        product: &product::Model,
    ) -> Result<QuestionSetResponse, reqwest::Error> {
        self.client
            .post(format!("{}/questions", base_url.trim_end_matches('/')))
            .json(&json!({ "product": product }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

#[async_trait]
impl AiGateway for HttpAiGateway {
    async fn request_analysis(
        &self,
        product: &product::Model,
        answers: &Map<String, Value>,
    ) -> AiAnalysis {
        let Some(base_url) = &self.base_url else {
            return fallback_analysis(product, answers);
        };

        match self.post_analysis(base_url, product, answers).await {
            Ok(analysis) => analysis,
            Err(err) => {
                warn!(error = %err, product = %product.name,
                    "Analysis service unavailable, serving local fallback.");
                fallback_analysis(product, answers)
            }
        }
    }

    async fn request_questions(&self, product: &product::Model) -> Vec<GeneratedQuestion> {
        let Some(base_url) = &self.base_url else {
            return fallback_questions(product);
        };

        match self.post_questions(base_url, product).await {
            Ok(response) if !response.questions.is_empty() => response.questions,
            Ok(_) => {
                warn!(product = %product.name,
                    "Analysis service returned an empty question set, serving local fallback.");
                fallback_questions(product)
            }
            Err(err) => {
                warn!(error = %err, product = %product.name,
                    "Analysis service unavailable, serving local fallback questions.");
                fallback_questions(product)
            }
        }
    }
}
