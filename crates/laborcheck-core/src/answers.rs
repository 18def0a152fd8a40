//! Answer sets and the persisted answer store.

use serde::{Deserialize, Serialize};

use crate::error::DiagnosisError;
use crate::model::AnswerValue;
use crate::schema::Schema;
use crate::storage::{RecordKey, Storage};

/// One slot per question, each either unanswered or a single answer.
///
/// Serializes as a JSON array of `null` or answer wire codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    slots: Vec<Option<AnswerValue>>,
}

impl AnswerSet {
    /// An all-unanswered set with `len` slots.
    pub fn fresh(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    pub fn from_slots(slots: Vec<Option<AnswerValue>>) -> Self {
        Self { slots }
    }

    /// Parse a persisted record, accepting it only if it has one slot per
    /// question in `schema` and every answer is one of that question's options.
    pub fn restore(record: &str, schema: &Schema) -> Option<Self> {
        let expected_len = schema.question_count();
        let set: AnswerSet = match serde_json::from_str(record) {
            Ok(set) => set,
            Err(e) => {
                tracing::warn!("discarding malformed answer record: {e}");
                return None;
            }
        };
        if set.len() != expected_len {
            tracing::warn!(
                "discarding answer record with {} slots, schema has {expected_len} questions",
                set.len()
            );
            return None;
        }
        let disallowed = set.slots.iter().enumerate().find_map(|(index, slot)| {
            let value = (*slot)?;
            let allowed = schema.question(index).is_some_and(|q| q.allows(value));
            (!allowed).then_some((index, value))
        });
        if let Some((index, value)) = disallowed {
            tracing::warn!(
                "discarding answer record: {value} is not an option for question {index}"
            );
            return None;
        }
        Some(set)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The answer at `index`, or `None` if unanswered or out of range.
    pub fn get(&self, index: usize) -> Option<AnswerValue> {
        self.slots.get(index).copied().flatten()
    }

    pub fn slots(&self) -> &[Option<AnswerValue>] {
        &self.slots
    }

    /// True iff every slot holds an answer.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn answered_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// A copy with only `index` changed. Out-of-range indices are ignored;
    /// the store validates before calling this.
    fn with_answer(&self, index: usize, value: AnswerValue) -> Self {
        let mut slots = self.slots.clone();
        if let Some(slot) = slots.get_mut(index) {
            *slot = Some(value);
        }
        Self { slots }
    }
}

/// Holds the active session's answers and persists every change.
///
/// Persistence failures never reach the caller: a failed read starts a fresh
/// session and a failed write leaves the in-memory set authoritative.
pub struct AnswerStore<'s, S> {
    schema: &'s Schema,
    storage: S,
    answers: AnswerSet,
}

impl<'s, S: Storage> AnswerStore<'s, S> {
    /// Open the store, restoring any persisted answers that fit the schema.
    pub fn open(schema: &'s Schema, storage: S) -> Self {
        let answers = Self::load(schema, &storage);
        Self {
            schema,
            storage,
            answers,
        }
    }

    /// Restore the persisted answer set, or a fresh one if there is none or
    /// it cannot be used with `schema`.
    pub fn load(schema: &Schema, storage: &S) -> AnswerSet {
        let expected = schema.question_count();
        match storage.read(RecordKey::Answers) {
            Ok(Some(record)) => {
                AnswerSet::restore(&record, schema).unwrap_or_else(|| AnswerSet::fresh(expected))
            }
            Ok(None) => AnswerSet::fresh(expected),
            Err(e) => {
                tracing::warn!("could not read saved answers, starting fresh: {e:#}");
                AnswerSet::fresh(expected)
            }
        }
    }

    pub fn schema(&self) -> &'s Schema {
        self.schema
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    /// Answer question `index` and persist the result before returning.
    pub fn set_answer(
        &mut self,
        index: usize,
        value: AnswerValue,
    ) -> Result<&AnswerSet, DiagnosisError> {
        let question = self
            .schema
            .question(index)
            .ok_or(DiagnosisError::IndexOutOfRange {
                index,
                len: self.schema.question_count(),
            })?;
        if !question.allows(value) {
            return Err(DiagnosisError::OptionNotAllowed { index, value });
        }

        self.answers = self.answers.with_answer(index, value);
        self.persist();
        Ok(&self.answers)
    }

    /// Discard all answers and begin a new session.
    pub fn reset(&mut self) -> &AnswerSet {
        self.answers = AnswerSet::fresh(self.schema.question_count());
        self.persist();
        &self.answers
    }

    fn persist(&self) {
        let record = match serde_json::to_string(&self.answers) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("could not encode answers: {e}");
                return;
            }
        };
        if let Err(e) = self.storage.write(RecordKey::Answers, &record) {
            tracing::warn!("could not save answers, keeping them in memory: {e:#}");
        }
    }
}
