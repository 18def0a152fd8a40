//! Diagnosis error types.
//!
//! `SchemaError` covers configuration problems in the question schema and is
//! fatal at startup. `DiagnosisError` covers rejected user input and the
//! completion gate; callers can match on it instead of inspecting messages.

use thiserror::Error;

use crate::model::AnswerValue;

/// The question schema violates one of its structural invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// The schema has no categories or no questions.
    #[error("schema must define at least one category and one question")]
    EmptySchema,

    /// Category ids must be 0, 1, 2, ... in declaration order.
    #[error("category at position {position} has id {id}")]
    NonDenseCategory { position: usize, id: usize },

    /// Weights must be finite and strictly positive.
    #[error("category {category} has non-positive weight {weight}")]
    NonPositiveWeight { category: usize, weight: f64 },

    /// A question points at a category that does not exist.
    #[error("question {question} references unknown category {category}")]
    UnknownCategory { question: usize, category: usize },

    /// A category has no questions.
    #[error("category {0} has no questions")]
    EmptyCategory(usize),

    /// A question's `index` differs from its position in the sequence.
    #[error("question at position {position} declares index {index}")]
    MisplacedQuestion { position: usize, index: usize },

    /// A question offers no answer options.
    #[error("question {0} has no answer options")]
    NoOptions(usize),

    /// A question lists the same option twice.
    #[error("question {question} lists option {value} more than once")]
    DuplicateOption { question: usize, value: AnswerValue },
}

/// Errors raised while answering, navigating, or scoring a diagnosis.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagnosisError {
    /// A question index outside `0..question_count`.
    #[error("question index {index} is out of range (0..{len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// The value is not among the question's allowed options.
    #[error("answer {value} is not an option for question {index}")]
    OptionNotAllowed { index: usize, value: AnswerValue },

    /// A category id that the schema does not define.
    #[error("unknown category {0}")]
    UnknownCategory(usize),

    /// The answer set was built for a different schema.
    #[error("answer set has {actual} slots but the schema has {expected} questions")]
    LengthMismatch { expected: usize, actual: usize },

    /// Results were requested before every question was answered.
    #[error("diagnosis incomplete: {answered} of {total} questions answered")]
    Incomplete { answered: usize, total: usize },
}

impl DiagnosisError {
    /// Returns `true` for the completion gate, which callers show as guidance
    /// rather than as a rejected input.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, DiagnosisError::Incomplete { .. })
    }
}
