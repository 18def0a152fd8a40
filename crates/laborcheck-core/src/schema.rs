//! The question schema: ordered categories and questions.
//!
//! A `Schema` is validated once at construction and is read-only afterwards.
//! Answer sets are positionally indexed against it, so the question count and
//! order must not change during a diagnosis session.

use std::collections::HashSet;

use crate::catalog;
use crate::error::SchemaError;
use crate::model::{Category, Question};

/// Validated, immutable categories and questions.
#[derive(Debug, Clone)]
pub struct Schema {
    categories: Vec<Category>,
    questions: Vec<Question>,
    /// Question indices per category id, in question order.
    by_category: Vec<Vec<usize>>,
}

impl Schema {
    /// Build a schema, checking every structural invariant.
    pub fn new(categories: Vec<Category>, questions: Vec<Question>) -> Result<Self, SchemaError> {
        if categories.is_empty() || questions.is_empty() {
            return Err(SchemaError::EmptySchema);
        }

        for (position, category) in categories.iter().enumerate() {
            if category.id != position {
                return Err(SchemaError::NonDenseCategory {
                    position,
                    id: category.id,
                });
            }
            if !(category.weight.is_finite() && category.weight > 0.0) {
                return Err(SchemaError::NonPositiveWeight {
                    category: category.id,
                    weight: category.weight,
                });
            }
        }

        let mut by_category = vec![Vec::new(); categories.len()];
        for (position, question) in questions.iter().enumerate() {
            if question.index != position {
                return Err(SchemaError::MisplacedQuestion {
                    position,
                    index: question.index,
                });
            }
            if question.options.is_empty() {
                return Err(SchemaError::NoOptions(position));
            }
            let mut seen = HashSet::new();
            for &value in &question.options {
                if !seen.insert(value) {
                    return Err(SchemaError::DuplicateOption {
                        question: position,
                        value,
                    });
                }
            }
            let Some(members) = by_category.get_mut(question.category_id) else {
                return Err(SchemaError::UnknownCategory {
                    question: position,
                    category: question.category_id,
                });
            };
            members.push(position);
        }

        if let Some(empty) = by_category.iter().position(|members| members.is_empty()) {
            return Err(SchemaError::EmptyCategory(empty));
        }

        Ok(Self {
            categories,
            questions,
            by_category,
        })
    }

    /// The compiled-in labor-inspection catalog.
    pub fn builtin() -> Result<Self, SchemaError> {
        Self::new(catalog::categories(), catalog::questions())
    }

    /// All questions in global order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// All categories in id order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn category(&self, id: usize) -> Option<&Category> {
        self.categories.get(id)
    }

    /// Global indices of the questions in a category, in question order.
    ///
    /// Unknown ids yield an empty slice.
    pub fn question_indices(&self, category_id: usize) -> &[usize] {
        self.by_category
            .get(category_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The questions belonging to a category.
    pub fn questions_in(&self, category_id: usize) -> impl Iterator<Item = &Question> + '_ {
        self.question_indices(category_id)
            .iter()
            .map(move |&i| &self.questions[i])
    }

    /// Index of the first question in a category.
    pub fn first_question_of(&self, category_id: usize) -> Option<usize> {
        self.question_indices(category_id).first().copied()
    }

    /// 1-based ordinal of a question within its category, with the category size.
    pub fn position_in_category(&self, index: usize) -> Option<(usize, usize)> {
        let question = self.questions.get(index)?;
        let members = self.question_indices(question.category_id);
        let ordinal = members.iter().position(|&i| i == index)?;
        Some((ordinal + 1, members.len()))
    }
}
