//! Diagnosis report types with JSON persistence and markdown output.
//!
//! A report is a snapshot for export: it is assembled from an evaluation at
//! the moment results are requested and is never read back into scoring.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::answers::AnswerSet;
use crate::grade::Grade;
use crate::model::AnswerValue;
use crate::profile::BusinessProfile;
use crate::schema::Schema;
use crate::scoring::{self, Evaluation};

/// A complete diagnosis report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Business the diagnosis was run for, if a profile was saved.
    pub business: Option<BusinessProfile>,
    pub total_score: u8,
    pub grade: Grade,
    /// Per-category results in category order.
    pub categories: Vec<CategoryResult>,
    /// Every question with the answer given.
    pub questions: Vec<QuestionResult>,
    /// Questions needing remediation, in question order.
    pub non_compliant: Vec<NonCompliantEntry>,
    pub answered: usize,
    pub question_count: usize,
}

/// Score and coverage of one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResult {
    pub id: usize,
    pub name: String,
    pub weight: f64,
    pub score: u8,
    /// Band of the category score, used for colouring.
    pub grade: Grade,
    /// Questions with a scorable answer.
    pub scored: usize,
    /// Questions in the category.
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResult {
    pub index: usize,
    pub category_id: usize,
    pub text: String,
    pub answer: Option<AnswerValue>,
}

impl QuestionResult {
    pub fn is_non_compliant(&self) -> bool {
        self.answer.is_some_and(scoring::is_non_compliant)
    }
}

/// A remediation item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NonCompliantEntry {
    pub index: usize,
    pub category: String,
    pub text: String,
    pub answer: AnswerValue,
}

impl DiagnosisReport {
    /// Assemble a report from an evaluation of `answers`.
    pub fn build(
        schema: &Schema,
        answers: &AnswerSet,
        evaluation: &Evaluation,
        business: Option<BusinessProfile>,
    ) -> Self {
        let categories = schema
            .categories()
            .iter()
            .zip(&evaluation.category_scores)
            .map(|(c, &score)| CategoryResult {
                id: c.id,
                name: c.name.clone(),
                weight: c.weight,
                score,
                grade: Grade::from_score(score),
                scored: scoring::scorable_count(schema, answers, c.id),
                total: schema.question_indices(c.id).len(),
            })
            .collect();

        let questions = schema
            .questions()
            .iter()
            .map(|q| QuestionResult {
                index: q.index,
                category_id: q.category_id,
                text: q.text.clone(),
                answer: answers.get(q.index),
            })
            .collect();

        let non_compliant = evaluation
            .non_compliant
            .iter()
            .map(|item| NonCompliantEntry {
                index: item.index,
                category: schema
                    .category(item.category_id)
                    .map(|c| c.name.clone())
                    .unwrap_or_default(),
                text: schema
                    .question(item.index)
                    .map(|q| q.text.clone())
                    .unwrap_or_default(),
                answer: item.answer,
            })
            .collect();

        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            business,
            total_score: evaluation.total_score,
            grade: evaluation.grade,
            categories,
            questions,
            non_compliant,
            answered: answers.answered_count(),
            question_count: schema.question_count(),
        }
    }

    /// The first `limit` remediation items and how many were left out.
    pub fn action_plan(&self, limit: usize) -> (&[NonCompliantEntry], usize) {
        let shown = limit.min(self.non_compliant.len());
        (&self.non_compliant[..shown], self.non_compliant.len() - shown)
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: DiagnosisReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Format the report as markdown, listing at most `limit` action items.
    pub fn to_markdown(&self, limit: usize) -> String {
        let mut md = String::new();

        md.push_str("# 진단 결과\n\n");
        if let Some(business) = &self.business {
            md.push_str(&format!("**사업장:** {}", business.name));
            if let Some(industry) = business.industry {
                md.push_str(&format!(" ({industry})"));
            }
            md.push_str("\n\n");
        }

        md.push_str(&format!(
            "**종합 점수:** {}점 · {} ({}): {}\n\n",
            self.total_score,
            self.grade.label(),
            self.grade,
            self.grade.message()
        ));

        md.push_str("## 카테고리별 점수\n\n");
        md.push_str("| 카테고리 | 점수 | 등급 | 반영 문항 |\n");
        md.push_str("|----------|------|------|-----------|\n");
        for c in &self.categories {
            md.push_str(&format!(
                "| {} | {} | {} | {}/{} |\n",
                c.name,
                c.score,
                c.grade.label(),
                c.scored,
                c.total
            ));
        }
        md.push('\n');

        let (shown, rest) = self.action_plan(limit);
        if !shown.is_empty() {
            md.push_str("## 개선이 필요한 항목\n\n");
            for item in shown {
                md.push_str(&format!(
                    "- [{}] {} ({})\n",
                    item.category, item.text, item.answer
                ));
            }
            if rest > 0 {
                md.push_str(&format!("- 외 {rest}개 항목\n"));
            }
        }

        md
    }
}
