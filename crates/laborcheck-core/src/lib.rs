//! laborcheck-core: question schema, answer store, navigation, and scoring.
//!
//! This crate defines the diagnosis data model, the persisted answer state,
//! and the pure scoring engine that the CLI and report renderers build on.

pub mod answers;
pub mod catalog;
pub mod config;
pub mod error;
pub mod grade;
pub mod model;
pub mod navigation;
pub mod profile;
pub mod report;
pub mod schema;
pub mod scoring;
pub mod storage;

pub use answers::{AnswerSet, AnswerStore};
pub use error::{DiagnosisError, SchemaError};
pub use grade::Grade;
pub use model::{AnswerValue, Category, Question};
pub use navigation::Navigator;
pub use schema::Schema;
pub use scoring::{evaluate, EmptyCategoryPolicy, Evaluation};
pub use storage::{FileStorage, MemoryStorage, RecordKey, Storage};
