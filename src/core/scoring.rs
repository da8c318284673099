//! Transparency scoring - the pure function at the center of report creation.
//!
//! Blends the AI-proposed score (or a sampled fallback baseline when none is
//! available) with answer completeness and a category-specific adjustment.
//! The arithmetic is a behavioral contract: constants and rounding must not
//! be changed. Output is always an integer in [0, 100], no matter how
//! malformed the AI input is.

use crate::ai::AiAnalysis;
use rand::Rng;
use serde_json::{Map, Value};

/// Source of the fallback baseline drawn when no AI score is available.
/// Injected so tests can pin the draw and keep the scorer deterministic.
pub trait BaselineSampler: Send {
    /// Draws a baseline score; production samples uniformly from [40, 79].
    fn fallback_baseline(&mut self) -> f64;
}

/// Production sampler backed by the thread-local RNG.
pub struct RandomBaseline;

impl BaselineSampler for RandomBaseline {
    fn fallback_baseline(&mut self) -> f64 {
        f64::from(rand::thread_rng().gen_range(40..=79))
    }
}

/// Test sampler returning a fixed baseline.
pub struct FixedBaseline(pub f64);

impl BaselineSampler for FixedBaseline {
    fn fallback_baseline(&mut self) -> f64 {
        self.0
    }
}

/// Per-category bonus rewarding disclosure in high-scrutiny categories.
/// Case-insensitive substring match, first hit wins; skincare is tested
/// before care so "Skincare" never falls through to the generic care row.
#[must_use]
pub fn category_boost(category: &str) -> i32 {
    const TABLE: &[(&str, i32)] = &[
        ("skincare", 5),
        ("food", 4),
        ("personal", 3),
        ("care", 3),
        ("cleaning", 3),
        ("clothing", 2),
        ("apparel", 2),
        ("electronics", 1),
    ];

    let category = category.to_lowercase();
    TABLE
        .iter()
        .find(|(needle, _)| category.contains(needle))
        .map_or(0, |&(_, boost)| boost)
}

/// Computes the final transparency score in [0, 100].
///
/// 1. Base: the AI score when present and finite (clamped to [0, 100]),
///    otherwise a baseline drawn from `baseline`.
/// 2. Completeness: submitted answer count over the expected question count
///    (the AI-declared set when available, else the answer count itself),
///    capped at 1. The expected count never drops below 1.
/// 3. Blend: `round(base * 0.6 + round(ratio * 100) * 0.4)`.
/// 4. Adjust: the category boost when at least half the questions are
///    answered, otherwise a penalty of `floor((1 - ratio) * 5)`.
#[must_use]
pub fn transparency_score(
    ai: Option<&AiAnalysis>,
    category: &str,
    answers: &Map<String, Value>,
    baseline: &mut dyn BaselineSampler,
) -> i32 {
    let ai_score = ai
        .and_then(|a| a.transparency_score)
        .filter(|score| score.is_finite());
    let base = match ai_score {
        Some(score) => score.clamp(0.0, 100.0),
        None => baseline.fallback_baseline(),
    };

    let answered = answers.len();
    let question_count = ai
        .and_then(|a| a.questions.as_ref())
        .map_or_else(|| answered.max(1), |qs| qs.len().max(1));

    #[allow(clippy::cast_precision_loss)]
    let ratio = (answered as f64 / question_count as f64).min(1.0);

    let mut computed = (base * 0.6 + (ratio * 100.0).round() * 0.4).round();
    if ratio >= 0.5 {
        computed += f64::from(category_boost(category));
    } else {
        computed -= ((1.0 - ratio) * 5.0).floor();
    }

    // Cast safety: the clamp bounds the value to [0, 100] before truncation.
    #[allow(clippy::cast_possible_truncation)]
    let score = computed.clamp(0.0, 100.0) as i32;
    score
}
