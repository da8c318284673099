//! Question business logic - Disclosure questionnaire operations.
//!
//! Questionnaires are generated per product through the AI gateway (which
//! itself degrades to a deterministic local set), stored with sequential
//! order values, and answered by user submissions. Answered questions are
//! never deleted; regeneration only replaces the unanswered remainder.

use crate::{
    ai::AiGateway,
    entities::{Question, question},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Deserialize;
use serde_json::json;

/// One submitted answer, keyed by question id.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSubmission {
    pub question_id: i64,
    pub answer: String,
}

/// Lists a product's questionnaire in question order.
///
/// # Errors
/// Returns `ProductNotFound` if the product does not exist, or a database
/// error if the query fails.
pub async fn list_for_product(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Vec<question::Model>> {
    ensure_product_exists(db, product_id).await?;
    Question::find()
        .filter(question::Column::ProductId.eq(product_id))
        .order_by_asc(question::Column::Order)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Generates (or regenerates) the questionnaire for a product.
///
/// The question set comes from the AI gateway; answered questions from a
/// previous generation are kept with their orders, the unanswered remainder
/// is replaced, and new questions are appended with sequential orders.
///
/// # Errors
/// Returns `ProductNotFound` if the product does not exist, or a database
/// error if a write fails.
pub async fn generate_for_product(
    db: &DatabaseConnection,
    gateway: &dyn AiGateway,
    product_id: i64,
) -> Result<Vec<question::Model>> {
    let product = crate::core::product::get_product_by_id(db, product_id)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    let generated = gateway.request_questions(&product).await;

    Question::delete_many()
        .filter(question::Column::ProductId.eq(product_id))
        .filter(question::Column::Answer.is_null())
        .exec(db)
        .await?;

    let kept = Question::find()
        .filter(question::Column::ProductId.eq(product_id))
        .order_by_desc(question::Column::Order)
        .one(db)
        .await?;
    let mut next_order = kept.map_or(0, |q| q.order + 1);

    let now = chrono::Utc::now().naive_utc();
    for proposal in generated {
        let model = question::ActiveModel {
            product_id: Set(product_id),
            text: Set(proposal.text),
            kind: Set(proposal.kind),
            options: Set(proposal.options.map(question::OptionList)),
            required: Set(proposal.required),
            order: Set(next_order),
            answer: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        model.insert(db).await?;
        next_order += 1;
    }

    list_for_product(db, product_id).await
}

/// Attaches answers to a product's questions.
///
/// Every submission must reference a question belonging to the product;
/// otherwise the whole batch is rejected before any write.
///
/// # Errors
/// Returns `ProductNotFound` if the product does not exist, a validation
/// error for a foreign or unknown question id, or a database error if a
/// write fails.
pub async fn submit_answers(
    db: &DatabaseConnection,
    product_id: i64,
    submissions: Vec<AnswerSubmission>,
) -> Result<Vec<question::Model>> {
    ensure_product_exists(db, product_id).await?;

    let mut targets = Vec::with_capacity(submissions.len());
    for submission in &submissions {
        let question = Question::find_by_id(submission.question_id)
            .one(db)
            .await?
            .ok_or(Error::QuestionNotFound {
                id: submission.question_id,
            })?;
        if question.product_id != product_id {
            return Err(Error::Validation {
                message: format!(
                    "question {} does not belong to product {product_id}",
                    submission.question_id
                ),
                details: Some(json!({ "questionId": submission.question_id })),
            });
        }
        targets.push(question);
    }

    let now = chrono::Utc::now().naive_utc();
    for (question, submission) in targets.into_iter().zip(&submissions) {
        let mut model: question::ActiveModel = question.into();
        model.answer = Set(Some(submission.answer.clone()));
        model.updated_at = Set(now);
        model.update(db).await?;
    }

    list_for_product(db, product_id).await
}

async fn ensure_product_exists(db: &DatabaseConnection, product_id: i64) -> Result<()> {
    crate::core::product::get_product_by_id(db, product_id)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;
    Ok(())
}
