//! AI gateway - the seam to the external scoring/question/analysis service.
//!
//! The gateway's public operations are infallible by design: any transport,
//! timeout, status or decode failure from the remote service degrades to the
//! deterministic local fallback content in this module. Callers never see an
//! upstream error, and the report-creation flow cannot be broken by the AI
//! collaborator being down.

pub mod http;

use crate::entities::product;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use http::HttpAiGateway;

/// Strengths/improvements/recommendations lists returned by the service
/// (or produced by the fallback generator).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSections {
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// Result of an analysis request. Every field is optional on the wire; the
/// scorer treats a missing or non-finite score as "no AI score available".
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    /// Human-readable report summary
    #[serde(default)]
    pub summary: String,
    /// Score proposed by the service, when it produced one
    #[serde(default, alias = "score")]
    pub transparency_score: Option<f64>,
    /// Question keys the service expected answers for, when it echoes them
    #[serde(default)]
    pub questions: Option<Vec<String>>,
    /// Structured analysis lists
    #[serde(default)]
    pub analysis: AnalysisSections,
}

/// One disclosure question proposed for a product.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestion {
    /// Question text shown to the user
    pub text: String,
    /// "text", "select" or "multiselect"
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    /// Choices for select/multiselect kinds
    #[serde(default)]
    pub options: Option<Vec<String>>,
    /// Whether an answer is required for a complete disclosure
    #[serde(default)]
    pub required: bool,
}

fn default_kind() -> String {
    "text".to_string()
}

/// Seam to the external AI collaborator. Implementations must absorb every
/// upstream failure; both operations always produce usable content.
#[async_trait]
pub trait AiGateway: Send + Sync {
    /// Produces a summary, an optional score and analysis lists for the
    /// given product and submitted answers.
    async fn request_analysis(
        &self,
        product: &product::Model,
        answers: &Map<String, Value>,
    ) -> AiAnalysis;

    /// Produces a disclosure question set for the given product.
    async fn request_questions(&self, product: &product::Model) -> Vec<GeneratedQuestion>;
}

/// Builds the locally generated substitute analysis used when the remote
/// service is unreachable or not configured. Deterministic: a pure function
/// of the product and the submitted answer keys. The score is deliberately
/// omitted so the scorer falls back to its own baseline.
#[must_use]
pub fn fallback_analysis(product: &product::Model, answers: &Map<String, Value>) -> AiAnalysis {
    let mut strengths = vec![format!(
        "Ingredient composition is disclosed ({} listed)",
        product.ingredients.0.len()
    )];
    let mut improvements = Vec::new();

    let has_key = |needle: &str| {
        answers
            .keys()
            .any(|k| k.to_lowercase().contains(needle))
    };

    if has_key("sustain") || has_key("environment") || has_key("recycl") {
        strengths.push("Sustainability practices are addressed in the submitted answers".to_string());
    } else {
        improvements.push("Address sustainability practices in the disclosure".to_string());
    }

    if has_key("cert") || product.certifications.is_some() {
        strengths.push("Certification information is provided".to_string());
    } else {
        improvements.push("Document third-party certifications, if any".to_string());
    }

    if has_key("packag") || product.packaging.is_some() {
        strengths.push("Packaging information is provided".to_string());
    } else {
        improvements.push("Describe packaging materials and their recyclability".to_string());
    }

    if answers.len() < 3 {
        improvements.push("Answer more of the disclosure questionnaire".to_string());
    }

    let recommendations = vec![
        "Publish the full disclosure alongside the product listing".to_string(),
        "Review the questionnaire periodically and keep answers current".to_string(),
    ];

    AiAnalysis {
        summary: format!(
            "Transparency overview for {} by {}: {} disclosure answer(s) on file. \
             Generated locally without the analysis service.",
            product.name,
            product.brand,
            answers.len()
        ),
        transparency_score: None,
        questions: None,
        analysis: AnalysisSections {
            strengths,
            improvements,
            recommendations,
        },
    }
}

/// Builds the locally generated question set used when the remote service is
/// unreachable or not configured: a fixed base questionnaire plus
/// category-specific additions. Deterministic.
#[must_use]
pub fn fallback_questions(product: &product::Model) -> Vec<GeneratedQuestion> {
    let text = |t: &str, required: bool| GeneratedQuestion {
        text: t.to_string(),
        kind: "text".to_string(),
        options: None,
        required,
    };

    let mut questions = vec![
        text(
            "What are the complete ingredients or materials in this product?",
            true,
        ),
        text("Where are the raw materials sourced from?", true),
        GeneratedQuestion {
            text: "How is the product packaged?".to_string(),
            kind: "select".to_string(),
            options: Some(vec![
                "Recyclable".to_string(),
                "Compostable".to_string(),
                "Mixed materials".to_string(),
                "Not disclosed".to_string(),
            ]),
            required: true,
        },
        text("What certifications does this product hold?", false),
        text(
            "What sustainability practices are involved in production?",
            false,
        ),
    ];

    let category = product.category.to_lowercase();
    if category.contains("skincare") || category.contains("personal") {
        questions.push(text(
            "Are any fragrance ingredients or known allergens present?",
            true,
        ));
    } else if category.contains("food") {
        questions.push(text(
            "What additives and preservatives does the product contain?",
            true,
        ));
    } else if category.contains("cleaning") {
        questions.push(text(
            "Are the surfactants used readily biodegradable?",
            true,
        ));
    } else if category.contains("clothing") || category.contains("apparel") {
        questions.push(text(
            "What fibers and dyes are used, and where is the garment made?",
            true,
        ));
    } else if category.contains("electronics") {
        questions.push(text(
            "How is the product repaired and recycled at end of life?",
            true,
        ));
    }

    questions
}
