use crate::error::Result;
use crate::model::{QuestionRecord, ScoreRecord};

/// Abstract interface for durable record storage.
///
/// This trait handles the "how" of storage (filesystem vs memory), while
/// [`QuestionStore`](super::question_store::QuestionStore) handles the "what"
/// (current collection, fail-soft loading, edit state).
///
/// Every call completes before returning, so reads and writes against one
/// backend are applied in call order and a read observes the last
/// successful write.
pub trait StorageBackend {
    // --- Question records ---

    /// Read the full question collection in storage order.
    /// Missing storage reads as an empty collection; unreadable or corrupt
    /// storage is an error.
    fn read_question_records(&self) -> Result<Vec<QuestionRecord>>;

    /// Replace the stored question collection.
    fn write_question_records(&self, records: &[QuestionRecord]) -> Result<()>;

    // --- Score records ---

    fn read_score_records(&self) -> Result<Vec<ScoreRecord>>;

    fn write_score_records(&self, records: &[ScoreRecord]) -> Result<()>;

    /// Human-readable location of the storage, used in messages.
    fn describe(&self) -> String;
}
