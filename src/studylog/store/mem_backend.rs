use super::backend::StorageBackend;
use crate::error::{Result, StudyError};
use crate::model::{QuestionRecord, ScoreRecord};
use std::cell::{Cell, RefCell};

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since studylog is single-threaded.
/// This keeps the `StorageBackend` trait on `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    questions: RefCell<Vec<QuestionRecord>>,
    scores: RefCell<Vec<ScoreRecord>>,
    simulate_read_error: Cell<bool>,
    simulate_write_error: Cell<bool>,
    question_writes: Cell<usize>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-populated with question records.
    pub fn with_questions(records: Vec<QuestionRecord>) -> Self {
        let backend = Self::default();
        *backend.questions.borrow_mut() = records;
        backend
    }

    /// Enable read error simulation (corrupt or unreadable storage).
    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.set(simulate);
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Number of successful question-collection writes so far.
    pub fn question_writes(&self) -> usize {
        self.question_writes.get()
    }

    /// Snapshot of what is currently persisted.
    pub fn stored_questions(&self) -> Vec<QuestionRecord> {
        self.questions.borrow().clone()
    }

    fn check_read(&self) -> Result<()> {
        if self.simulate_read_error.get() {
            return Err(StudyError::Store("Simulated read error".to_string()));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(StudyError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl StorageBackend for MemBackend {
    fn read_question_records(&self) -> Result<Vec<QuestionRecord>> {
        self.check_read()?;
        Ok(self.questions.borrow().clone())
    }

    fn write_question_records(&self, records: &[QuestionRecord]) -> Result<()> {
        self.check_write()?;
        *self.questions.borrow_mut() = records.to_vec();
        self.question_writes.set(self.question_writes.get() + 1);
        Ok(())
    }

    fn read_score_records(&self) -> Result<Vec<ScoreRecord>> {
        self.check_read()?;
        Ok(self.scores.borrow().clone())
    }

    fn write_score_records(&self, records: &[ScoreRecord]) -> Result<()> {
        self.check_write()?;
        *self.scores.borrow_mut() = records.to_vec();
        Ok(())
    }

    fn describe(&self) -> String {
        "memory://studylog".to_string()
    }
}
