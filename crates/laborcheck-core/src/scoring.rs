//! Compliance scoring.
//!
//! Everything here is a pure function of the schema and an answer set.
//! Nothing is cached: callers recompute after every answer change.
//!
//! Per-answer contribution: yes 100; partial, unknown and needs-verification
//! 50; no 0. Not-applicable and unanswered slots are left out of both the
//! numerator and the denominator. Rounding is half-up throughout.

use serde::{Deserialize, Serialize};

use crate::answers::AnswerSet;
use crate::error::DiagnosisError;
use crate::grade::Grade;
use crate::model::AnswerValue;
use crate::schema::Schema;

/// How to score a category that has no scorable answers, e.g. when every
/// question in it is not applicable.
///
/// The category keeps contributing its weight to the total either way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyCategoryPolicy {
    /// Score it 100.
    #[default]
    Compliant,
    /// Score it 0.
    NonCompliant,
}

impl EmptyCategoryPolicy {
    fn score(self) -> u8 {
        match self {
            EmptyCategoryPolicy::Compliant => 100,
            EmptyCategoryPolicy::NonCompliant => 0,
        }
    }
}

/// A question whose answer falls short of full compliance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonCompliantItem {
    /// Global question index.
    pub index: usize,
    pub category_id: usize,
    pub answer: AnswerValue,
}

/// Everything derived from one answer set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// 0-100 per category, aligned to category order.
    pub category_scores: Vec<u8>,
    /// Weighted mean of the category scores.
    pub total_score: u8,
    pub grade: Grade,
    /// Non-compliant questions in question order.
    pub non_compliant: Vec<NonCompliantItem>,
}

/// Score contribution of one answer, or `None` if it is excluded.
pub fn contribution(value: AnswerValue) -> Option<u32> {
    match value {
        AnswerValue::Yes => Some(100),
        AnswerValue::Partial | AnswerValue::Unknown | AnswerValue::NeedsVerification => Some(50),
        AnswerValue::No => Some(0),
        AnswerValue::NotApplicable => None,
    }
}

/// Whether an answer belongs on the remediation list.
pub fn is_non_compliant(value: AnswerValue) -> bool {
    matches!(
        value,
        AnswerValue::No
            | AnswerValue::Partial
            | AnswerValue::Unknown
            | AnswerValue::NeedsVerification
    )
}

/// Integer division rounding halves up.
fn round_half_up(numerator: u64, denominator: u64) -> u64 {
    (2 * numerator + denominator) / (2 * denominator)
}

fn check_shape(schema: &Schema, answers: &AnswerSet) -> Result<(), DiagnosisError> {
    if answers.len() != schema.question_count() {
        return Err(DiagnosisError::LengthMismatch {
            expected: schema.question_count(),
            actual: answers.len(),
        });
    }
    Ok(())
}

/// Number of scorable answers in a category.
pub fn scorable_count(schema: &Schema, answers: &AnswerSet, category_id: usize) -> usize {
    schema
        .question_indices(category_id)
        .iter()
        .filter_map(|&i| answers.get(i).and_then(contribution))
        .count()
}

fn category_score(
    schema: &Schema,
    answers: &AnswerSet,
    category_id: usize,
    policy: EmptyCategoryPolicy,
) -> u8 {
    let contributions: Vec<u32> = schema
        .question_indices(category_id)
        .iter()
        .filter_map(|&i| answers.get(i).and_then(contribution))
        .collect();

    if contributions.is_empty() {
        return policy.score();
    }

    let sum: u64 = contributions.iter().map(|&c| u64::from(c)).sum();
    round_half_up(sum, contributions.len() as u64).min(100) as u8
}

/// Score every category, in category order.
pub fn category_scores(
    schema: &Schema,
    answers: &AnswerSet,
    policy: EmptyCategoryPolicy,
) -> Result<Vec<u8>, DiagnosisError> {
    check_shape(schema, answers)?;
    Ok(schema
        .categories()
        .iter()
        .map(|c| category_score(schema, answers, c.id, policy))
        .collect())
}

/// Weighted mean of category scores, rounded half-up.
///
/// `scores` must be aligned to the schema's categories.
pub fn total_score(schema: &Schema, scores: &[u8]) -> u8 {
    let (weighted, weights) = schema
        .categories()
        .iter()
        .zip(scores)
        .fold((0.0f64, 0.0f64), |(weighted, weights), (category, &score)| {
            (
                weighted + f64::from(score) * category.weight,
                weights + category.weight,
            )
        });

    if weights <= 0.0 {
        return 0;
    }
    // f64::round rounds halves away from zero, which is half-up for
    // non-negative values.
    (weighted / weights).round().clamp(0.0, 100.0) as u8
}

/// Every non-compliant question, in question order.
pub fn non_compliant(
    schema: &Schema,
    answers: &AnswerSet,
) -> Result<Vec<NonCompliantItem>, DiagnosisError> {
    check_shape(schema, answers)?;
    Ok(schema
        .questions()
        .iter()
        .filter_map(|q| {
            let answer = answers.get(q.index)?;
            is_non_compliant(answer).then(|| NonCompliantItem {
                index: q.index,
                category_id: q.category_id,
                answer,
            })
        })
        .collect())
}

/// Compute all reporting outputs for an answer set.
///
/// Works on partial answer sets too; the completion gate lives in the
/// navigator.
pub fn evaluate(
    schema: &Schema,
    answers: &AnswerSet,
    policy: EmptyCategoryPolicy,
) -> Result<Evaluation, DiagnosisError> {
    let category_scores = category_scores(schema, answers, policy)?;
    let total_score = total_score(schema, &category_scores);
    Ok(Evaluation {
        grade: Grade::from_score(total_score),
        total_score,
        non_compliant: non_compliant(schema, answers)?,
        category_scores,
    })
}
