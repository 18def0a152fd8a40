//! Question navigation and the completion gate.
//!
//! The navigator owns the answer store for a session and a pointer to the
//! current question. Moving past either end is a no-op, not an error. The
//! pointer is persisted alongside the answers so a session resumes where it
//! left off.

use serde::{Deserialize, Serialize};

use crate::answers::{AnswerSet, AnswerStore};
use crate::error::DiagnosisError;
use crate::model::{AnswerValue, Question};
use crate::schema::Schema;
use crate::scoring::{self, EmptyCategoryPolicy, Evaluation};
use crate::storage::{RecordKey, Storage};

#[derive(Debug, Serialize, Deserialize)]
struct CursorRecord {
    current_index: usize,
}

/// Sequential and random-access movement over a diagnosis session.
pub struct Navigator<'s, S> {
    store: AnswerStore<'s, S>,
    current: usize,
    policy: EmptyCategoryPolicy,
}

impl<'s, S: Storage> Navigator<'s, S> {
    /// Resume the session held in `storage`, or start a fresh one.
    pub fn open(schema: &'s Schema, storage: S) -> Self {
        let store = AnswerStore::open(schema, storage);
        let current = restore_cursor(store.storage(), schema.question_count());
        Self {
            store,
            current,
            policy: EmptyCategoryPolicy::default(),
        }
    }

    /// Score empty categories with `policy` when finishing.
    pub fn with_policy(mut self, policy: EmptyCategoryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Discard all answers and return to the first question.
    pub fn start_new(&mut self) {
        self.store.reset();
        self.current = 0;
        self.save_cursor();
    }

    pub fn schema(&self) -> &'s Schema {
        self.store.schema()
    }

    pub fn store(&self) -> &AnswerStore<'s, S> {
        &self.store
    }

    pub fn answers(&self) -> &AnswerSet {
        self.store.answers()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> &'s Question {
        &self.schema().questions()[self.current]
    }

    /// The answer already given to the current question, if any.
    pub fn current_answer(&self) -> Option<AnswerValue> {
        self.answers().get(self.current)
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.schema().question_count()
    }

    /// Advance one question; stays put on the last one.
    pub fn next(&mut self) -> usize {
        if !self.is_last() {
            self.current += 1;
            self.save_cursor();
        }
        self.current
    }

    /// Go back one question; stays put on the first one.
    pub fn previous(&mut self) -> usize {
        if !self.is_first() {
            self.current -= 1;
            self.save_cursor();
        }
        self.current
    }

    /// Answer the current question, then advance unless it is the last one.
    pub fn answer_current(&mut self, value: AnswerValue) -> Result<usize, DiagnosisError> {
        self.store.set_answer(self.current, value)?;
        Ok(self.next())
    }

    /// Answer any question without moving the pointer.
    pub fn set_answer(&mut self, index: usize, value: AnswerValue) -> Result<(), DiagnosisError> {
        self.store.set_answer(index, value)?;
        Ok(())
    }

    /// Move directly to a question.
    pub fn jump_to(&mut self, index: usize) -> Result<usize, DiagnosisError> {
        let len = self.schema().question_count();
        if index >= len {
            return Err(DiagnosisError::IndexOutOfRange { index, len });
        }
        self.current = index;
        self.save_cursor();
        Ok(self.current)
    }

    /// Move to the first question of a category.
    pub fn jump_to_category(&mut self, category_id: usize) -> Result<usize, DiagnosisError> {
        let first = self
            .schema()
            .first_question_of(category_id)
            .ok_or(DiagnosisError::UnknownCategory(category_id))?;
        self.jump_to(first)
    }

    pub fn answered_count(&self) -> usize {
        self.answers().answered_count()
    }

    /// Percentage of questions answered, rounded half-up.
    pub fn progress(&self) -> u8 {
        let total = self.schema().question_count();
        if total == 0 {
            return 0;
        }
        ((200 * self.answered_count() + total) / (2 * total)) as u8
    }

    /// Per category: whether every one of its questions is answered.
    pub fn category_completion(&self) -> Vec<bool> {
        let schema = self.schema();
        schema
            .categories()
            .iter()
            .map(|c| {
                schema
                    .question_indices(c.id)
                    .iter()
                    .all(|&i| self.answers().get(i).is_some())
            })
            .collect()
    }

    /// 1-based position of the current question within its category, with
    /// the category size.
    pub fn position_in_category(&self) -> (usize, usize) {
        self.schema()
            .position_in_category(self.current)
            .unwrap_or((1, 1))
    }

    /// Whether every question has been answered.
    pub fn can_finish(&self) -> bool {
        self.answers().is_complete()
    }

    /// Score the session. Rejected until every question is answered.
    pub fn finish(&self) -> Result<Evaluation, DiagnosisError> {
        if !self.can_finish() {
            return Err(DiagnosisError::Incomplete {
                answered: self.answered_count(),
                total: self.schema().question_count(),
            });
        }
        scoring::evaluate(self.schema(), self.answers(), self.policy)
    }

    fn save_cursor(&self) {
        let record = CursorRecord {
            current_index: self.current,
        };
        let result = serde_json::to_string(&record)
            .map_err(anyhow::Error::from)
            .and_then(|json| self.store.storage().write(RecordKey::Cursor, &json));
        if let Err(e) = result {
            tracing::warn!("could not save question position: {e:#}");
        }
    }
}

fn restore_cursor<S: Storage>(storage: &S, question_count: usize) -> usize {
    let record = match storage.read(RecordKey::Cursor) {
        Ok(Some(record)) => record,
        Ok(None) => return 0,
        Err(e) => {
            tracing::warn!("could not read question position: {e:#}");
            return 0;
        }
    };
    match serde_json::from_str::<CursorRecord>(&record) {
        Ok(cursor) if cursor.current_index < question_count => cursor.current_index,
        Ok(cursor) => {
            tracing::warn!(
                "saved position {} is outside 0..{question_count}, starting at 0",
                cursor.current_index
            );
            0
        }
        Err(e) => {
            tracing::warn!("discarding malformed position record: {e}");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grade::Grade;
    use crate::model::Category;
    use crate::storage::MemoryStorage;

    /// Two categories: questions 0-1 in the first, 2-4 in the second.
    fn schema() -> Schema {
        let categories = (0..2)
            .map(|id| Category {
                id,
                name: format!("c{id}"),
                weight: 1.0,
            })
            .collect();
        let questions = (0..5)
            .map(|index| Question {
                index,
                category_id: usize::from(index >= 2),
                text: format!("q{index}"),
                options: vec![AnswerValue::Yes, AnswerValue::No, AnswerValue::NotApplicable],
            })
            .collect();
        Schema::new(categories, questions).unwrap()
    }

    #[test]
    fn starts_at_first_question() {
        let schema = schema();
        let nav = Navigator::open(&schema, MemoryStorage::new());
        assert_eq!(nav.current_index(), 0);
        assert_eq!(nav.progress(), 0);
        assert!(nav.is_first());
    }

    #[test]
    fn next_and_previous_stop_at_boundaries() {
        let schema = schema();
        let mut nav = Navigator::open(&schema, MemoryStorage::new());

        assert_eq!(nav.previous(), 0);
        for _ in 0..10 {
            nav.next();
        }
        assert_eq!(nav.current_index(), 4);
        assert!(nav.is_last());
        assert_eq!(nav.previous(), 3);
    }

    #[test]
    fn answering_advances_except_on_last_question() {
        let schema = schema();
        let mut nav = Navigator::open(&schema, MemoryStorage::new());

        assert_eq!(nav.answer_current(AnswerValue::Yes).unwrap(), 1);
        nav.jump_to(4).unwrap();
        assert_eq!(nav.answer_current(AnswerValue::No).unwrap(), 4);
        assert_eq!(nav.current_answer(), Some(AnswerValue::No));
    }

    #[test]
    fn rejected_answer_does_not_move() {
        let schema = schema();
        let mut nav = Navigator::open(&schema, MemoryStorage::new());
        let err = nav.answer_current(AnswerValue::Partial).unwrap_err();
        assert!(matches!(err, DiagnosisError::OptionNotAllowed { index: 0, .. }));
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn jumps_validate_range() {
        let schema = schema();
        let mut nav = Navigator::open(&schema, MemoryStorage::new());

        assert_eq!(nav.jump_to(3).unwrap(), 3);
        assert_eq!(
            nav.jump_to(5).unwrap_err(),
            DiagnosisError::IndexOutOfRange { index: 5, len: 5 }
        );
        assert_eq!(nav.current_index(), 3);

        assert_eq!(nav.jump_to_category(1).unwrap(), 2);
        assert_eq!(nav.position_in_category(), (1, 3));
        assert_eq!(
            nav.jump_to_category(2).unwrap_err(),
            DiagnosisError::UnknownCategory(2)
        );
    }

    #[test]
    fn progress_rounds_half_up() {
        let schema = schema();
        let mut nav = Navigator::open(&schema, MemoryStorage::new());
        nav.set_answer(0, AnswerValue::Yes).unwrap();
        assert_eq!(nav.progress(), 20);
        nav.set_answer(1, AnswerValue::Yes).unwrap();
        nav.set_answer(2, AnswerValue::Yes).unwrap();
        assert_eq!(nav.progress(), 60);
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn category_completion_marks() {
        let schema = schema();
        let mut nav = Navigator::open(&schema, MemoryStorage::new());
        nav.set_answer(0, AnswerValue::Yes).unwrap();
        nav.set_answer(1, AnswerValue::NotApplicable).unwrap();
        nav.set_answer(2, AnswerValue::No).unwrap();
        assert_eq!(nav.category_completion(), vec![true, false]);
    }

    #[test]
    fn finish_requires_every_answer() {
        let schema = schema();
        let mut nav = Navigator::open(&schema, MemoryStorage::new());
        for _ in 0..4 {
            nav.answer_current(AnswerValue::Yes).unwrap();
        }
        let err = nav.finish().unwrap_err();
        assert_eq!(
            err,
            DiagnosisError::Incomplete {
                answered: 4,
                total: 5
            }
        );
        assert!(err.is_incomplete());

        nav.answer_current(AnswerValue::No).unwrap();
        let eval = nav.finish().unwrap();
        assert_eq!(eval.category_scores, vec![100, 67]);
        assert_eq!(eval.total_score, 84);
        assert_eq!(eval.grade, Grade::Caution);
    }

    #[test]
    fn finish_uses_configured_policy() {
        let schema = schema();
        let mut nav =
            Navigator::open(&schema, MemoryStorage::new()).with_policy(EmptyCategoryPolicy::NonCompliant);
        nav.set_answer(0, AnswerValue::NotApplicable).unwrap();
        nav.set_answer(1, AnswerValue::NotApplicable).unwrap();
        for i in 2..5 {
            nav.set_answer(i, AnswerValue::Yes).unwrap();
        }
        assert_eq!(nav.finish().unwrap().category_scores, vec![0, 100]);
    }

    #[test]
    fn session_resumes_position_and_answers() {
        let schema = schema();
        let storage = MemoryStorage::new();
        {
            let mut nav = Navigator::open(&schema, &storage);
            nav.answer_current(AnswerValue::Yes).unwrap();
            nav.answer_current(AnswerValue::No).unwrap();
        }
        let nav = Navigator::open(&schema, &storage);
        assert_eq!(nav.current_index(), 2);
        assert_eq!(nav.answered_count(), 2);
    }

    #[test]
    fn out_of_range_cursor_resets_to_start() {
        let schema = schema();
        let storage = MemoryStorage::new().with_record(RecordKey::Cursor, r#"{"current_index":9}"#);
        assert_eq!(Navigator::open(&schema, &storage).current_index(), 0);

        let storage = MemoryStorage::new().with_record(RecordKey::Cursor, "garbage");
        assert_eq!(Navigator::open(&schema, &storage).current_index(), 0);
    }

    #[test]
    fn start_new_clears_session() {
        let schema = schema();
        let storage = MemoryStorage::new();
        let mut nav = Navigator::open(&schema, &storage);
        nav.answer_current(AnswerValue::Yes).unwrap();
        nav.start_new();
        assert_eq!(nav.current_index(), 0);
        assert_eq!(nav.answered_count(), 0);
        assert_eq!(
            storage.get(RecordKey::Cursor).as_deref(),
            Some(r#"{"current_index":0}"#)
        );
    }

    #[test]
    fn failing_storage_keeps_session_usable() {
        let schema = schema();
        let mut nav = Navigator::open(&schema, MemoryStorage::failing_writes());
        nav.answer_current(AnswerValue::Yes).unwrap();
        assert_eq!(nav.current_index(), 1);
        assert_eq!(nav.answered_count(), 1);
    }
}
