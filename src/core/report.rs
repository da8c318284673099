//! Report business logic - lifecycle, listing and statistics.
//!
//! A report is written once per product-answer submission: the product is
//! loaded, the AI gateway is consulted (or falls back locally), the pure
//! scorer produces the final transparency score, and the report is persisted
//! already `completed`. The draft and pending states exist for partial
//! submission flows and stay reachable through the update path. All reads
//! and mutations are ownership-checked; listing and statistics are scoped to
//! the calling identity.

use crate::{
    ai::AiGateway,
    core::access::{Identity, can_access},
    core::scoring::{self, BaselineSampler, RandomBaseline},
    entities::{Report, report},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Maximum length of a report summary, in characters.
pub const SUMMARY_MAX_CHARS: usize = 2000;

/// Report lifecycle status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportStatus {
    Draft,
    Pending,
    Completed,
}

impl ReportStatus {
    /// Parses a stored or submitted status string.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(Self::Draft),
            "pending" => Some(Self::Pending),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

/// Body of a report creation request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReport {
    pub product_id: i64,
    /// Mapping from question key to answer value, arbitrary value shape
    pub answers: Value,
}

/// Partial update for a report; absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReport {
    pub summary: Option<String>,
    pub status: Option<String>,
    pub transparency_score: Option<i32>,
    pub answers: Option<Value>,
    pub analysis: Option<report::ReportAnalysis>,
    pub pdf_path: Option<String>,
}

/// Filter/pagination parameters for listing reports.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFilter {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<String>,
    pub min_score: Option<i32>,
    pub max_score: Option<i32>,
}

/// One page of reports plus pagination metadata.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPage {
    pub reports: Vec<report::Model>,
    pub page: u64,
    pub limit: u64,
    pub total: u64,
}

/// Aggregate statistics over the caller's reports.
#[derive(Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStats {
    pub count: u64,
    pub average_score: f64,
    pub max_score: i32,
    pub min_score: i32,
    pub by_status: StatusCounts,
    /// Score histogram over [0,20) [20,40) [40,60) [60,80) [80,100]
    pub score_ranges: [u64; 5],
}

/// Report counts per lifecycle status.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub draft: u64,
    pub pending: u64,
    pub completed: u64,
}

fn answers_object(value: &Value) -> Result<&Map<String, Value>> {
    value.as_object().ok_or_else(|| Error::Validation {
        message: "answers must be a JSON object".to_string(),
        details: Some(json!({ "field": "answers" })),
    })
}

fn truncate_summary(summary: String) -> String {
    if summary.chars().count() <= SUMMARY_MAX_CHARS {
        summary
    } else {
        summary.chars().take(SUMMARY_MAX_CHARS).collect()
    }
}

/// Creates a transparency report for a product-answer submission.
///
/// Loads the product, requests an analysis from the gateway (which never
/// fails, it degrades to local fallback content), derives the final score
/// through the pure scorer, and persists the report as `completed` owned by
/// the caller.
///
/// # Errors
/// Returns `ProductNotFound` if the product does not exist, a validation
/// error if `answers` is not an object, or a database error if the insert
/// fails. AI-service failures never surface here.
pub async fn create_report(
    db: &DatabaseConnection,
    gateway: &dyn AiGateway,
    actor: &Identity,
    input: CreateReport,
) -> Result<report::Model> {
    create_report_with_baseline(db, gateway, actor, input, &mut RandomBaseline).await
}

/// Same as [`create_report`] with an explicit baseline sampler, so tests can
/// pin the fallback draw.
pub async fn create_report_with_baseline(
    db: &DatabaseConnection,
    gateway: &dyn AiGateway,
    actor: &Identity,
    input: CreateReport,
    baseline: &mut dyn BaselineSampler,
) -> Result<report::Model> {
    let product = crate::core::product::get_product_by_id(db, input.product_id)
        .await?
        .ok_or(Error::ProductNotFound {
            id: input.product_id,
        })?;
    let answers = answers_object(&input.answers)?;

    let ai = gateway.request_analysis(&product, answers).await;
    let score = scoring::transparency_score(Some(&ai), &product.category, answers, baseline);

    let now = chrono::Utc::now().naive_utc();
    let model = report::ActiveModel {
        product_id: Set(product.id),
        user_id: Set(actor.user_id),
        summary: Set(truncate_summary(ai.summary)),
        transparency_score: Set(score),
        analysis: Set(report::ReportAnalysis {
            strengths: ai.analysis.strengths,
            improvements: ai.analysis.improvements,
            recommendations: ai.analysis.recommendations,
        }),
        answers: Set(input.answers),
        pdf_path: Set(None),
        status: Set(ReportStatus::Completed.as_str().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Retrieves a single report, enforcing the owner-or-admin rule.
///
/// # Errors
/// Returns `ReportNotFound` for an unknown id, `Forbidden` when the caller
/// is neither owner nor admin, or a database error if the query fails.
pub async fn get_report(
    db: &DatabaseConnection,
    actor: &Identity,
    report_id: i64,
) -> Result<report::Model> {
    let model = Report::find_by_id(report_id)
        .one(db)
        .await?
        .ok_or(Error::ReportNotFound { id: report_id })?;
    if !can_access(actor, model.user_id) {
        return Err(Error::Forbidden);
    }
    Ok(model)
}

/// Applies a partial update to a report, enforcing ownership and the
/// completed-score invariant.
///
/// # Errors
/// Returns `ReportNotFound`/`Forbidden` per the ownership rule, a validation
/// error for an unknown status, an out-of-range score, a non-object answers
/// value, or a resulting `completed` report without a valid score, and a
/// database error if the update fails.
pub async fn update_report(
    db: &DatabaseConnection,
    actor: &Identity,
    report_id: i64,
    changes: UpdateReport,
) -> Result<report::Model> {
    let current = get_report(db, actor, report_id).await?;

    let status = match changes.status.as_deref() {
        Some(raw) => ReportStatus::parse(raw).ok_or_else(|| Error::Validation {
            message: format!("unknown status {raw:?}"),
            details: Some(json!({ "field": "status", "allowed": ["draft", "pending", "completed"] })),
        })?,
        None => ReportStatus::parse(&current.status).unwrap_or(ReportStatus::Completed),
    };

    if let Some(score) = changes.transparency_score {
        if !(0..=100).contains(&score) {
            return Err(Error::Validation {
                message: format!("transparencyScore must be in [0, 100], got {score}"),
                details: Some(json!({ "field": "transparencyScore" })),
            });
        }
    }
    let resulting_score = changes.transparency_score.unwrap_or(current.transparency_score);
    if status == ReportStatus::Completed && resulting_score < 0 {
        return Err(Error::Validation {
            message: "a completed report requires a non-negative transparency score".to_string(),
            details: Some(json!({ "field": "transparencyScore" })),
        });
    }

    if let Some(answers) = &changes.answers {
        answers_object(answers)?;
    }

    let mut model: report::ActiveModel = current.into();
    if let Some(summary) = changes.summary {
        model.summary = Set(truncate_summary(summary));
    }
    if changes.status.is_some() {
        model.status = Set(status.as_str().to_string());
    }
    if let Some(score) = changes.transparency_score {
        model.transparency_score = Set(score);
    }
    if let Some(answers) = changes.answers {
        model.answers = Set(answers);
    }
    if let Some(analysis) = changes.analysis {
        model.analysis = Set(analysis);
    }
    if let Some(pdf_path) = changes.pdf_path {
        model.pdf_path = Set(Some(pdf_path));
    }
    model.updated_at = Set(chrono::Utc::now().naive_utc());

    model.update(db).await.map_err(Into::into)
}

/// Deletes a report, enforcing the owner-or-admin rule. A second delete of
/// the same id reports `ReportNotFound`.
///
/// # Errors
/// Returns `ReportNotFound`/`Forbidden` per the ownership rule, or a
/// database error if the delete fails.
pub async fn delete_report(
    db: &DatabaseConnection,
    actor: &Identity,
    report_id: i64,
) -> Result<()> {
    let model = get_report(db, actor, report_id).await?;
    model.delete(db).await?;
    Ok(())
}

/// Lists the caller's reports, newest first, with optional status and score
/// filters. Always scoped to the calling identity, admins included.
///
/// # Errors
/// Returns a validation error for an unknown status filter, or a database
/// error if the query fails.
pub async fn list_reports(
    db: &DatabaseConnection,
    actor: &Identity,
    filter: ReportFilter,
) -> Result<ReportPage> {
    let page = filter.page.unwrap_or(1).max(1);
    let limit = filter.limit.unwrap_or(10).clamp(1, 100);

    let mut query = Report::find().filter(report::Column::UserId.eq(actor.user_id));
    if let Some(raw) = filter.status.as_deref() {
        let status = ReportStatus::parse(raw).ok_or_else(|| Error::Validation {
            message: format!("unknown status {raw:?}"),
            details: Some(json!({ "field": "status", "allowed": ["draft", "pending", "completed"] })),
        })?;
        query = query.filter(report::Column::Status.eq(status.as_str()));
    }
    if let Some(min) = filter.min_score {
        query = query.filter(report::Column::TransparencyScore.gte(min));
    }
    if let Some(max) = filter.max_score {
        query = query.filter(report::Column::TransparencyScore.lte(max));
    }

    let paginator = query
        .order_by_desc(report::Column::CreatedAt)
        .paginate(db, limit);
    let total = paginator.num_items().await?;
    let reports = paginator.fetch_page(page - 1).await?;

    Ok(ReportPage {
        reports,
        page,
        limit,
        total,
    })
}

/// Aggregates statistics over the caller's reports: count, average/max/min
/// score, per-status counts and a fixed-boundary score histogram. An empty
/// report set yields zeroed defaults, not an error.
///
/// # Errors
/// Returns a database error if the query fails.
pub async fn report_stats(db: &DatabaseConnection, actor: &Identity) -> Result<ReportStats> {
    let reports = Report::find()
        .filter(report::Column::UserId.eq(actor.user_id))
        .all(db)
        .await?;

    if reports.is_empty() {
        return Ok(ReportStats::default());
    }

    let mut stats = ReportStats {
        count: reports.len() as u64,
        max_score: i32::MIN,
        min_score: i32::MAX,
        ..ReportStats::default()
    };
    let mut score_sum = 0i64;

    for report in &reports {
        let score = report.transparency_score;
        score_sum += i64::from(score);
        stats.max_score = stats.max_score.max(score);
        stats.min_score = stats.min_score.min(score);

        match ReportStatus::parse(&report.status) {
            Some(ReportStatus::Draft) => stats.by_status.draft += 1,
            Some(ReportStatus::Pending) => stats.by_status.pending += 1,
            Some(ReportStatus::Completed) | None => stats.by_status.completed += 1,
        }

        // Bucket width 20; 100 lands in the last bucket
        let bucket = usize::try_from(score / 20).unwrap_or(0).min(4);
        stats.score_ranges[bucket] += 1;
    }

    #[allow(clippy::cast_precision_loss)]
    {
        stats.average_score = score_sum as f64 / reports.len() as f64;
    }

    Ok(stats)
}
