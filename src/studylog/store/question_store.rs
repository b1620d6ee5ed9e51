use super::backend::StorageBackend;
use crate::error::StudyError;
use crate::model::QuestionRecord;
use crate::records;
use tracing::{debug, warn};
use uuid::Uuid;

/// Outcome of persisting a mutation.
///
/// A failed write does not roll back the in-memory change; the store keeps
/// it and retries on the next mutation or on [`QuestionStore::flush`].
#[derive(Debug)]
pub enum Persisted {
    /// The collection did not change, nothing was written.
    Unchanged,
    /// The new collection was written.
    Saved,
    /// The collection changed in memory but the write failed.
    Failed(StudyError),
}

impl Persisted {
    pub fn changed(&self) -> bool {
        !matches!(self, Persisted::Unchanged)
    }

    pub fn error(&self) -> Option<&StudyError> {
        match self {
            Persisted::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// A tag edit in progress: the record being edited and the current draft text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEdit {
    pub id: Uuid,
    pub draft: String,
}

/// Owns the authoritative question collection.
///
/// The collection is loaded once from the backend and every mutation writes
/// the whole collection back. At most one record is in tag-edit mode at a
/// time.
pub struct QuestionStore<B: StorageBackend> {
    backend: B,
    records: Vec<QuestionRecord>,
    editing: Option<TagEdit>,
    unsaved: bool,
}

impl<B: StorageBackend> QuestionStore<B> {
    /// Loads the collection from `backend`.
    ///
    /// Never fails: unreadable or corrupt storage yields an empty collection.
    /// Records with an id already seen earlier are dropped.
    pub fn load(backend: B) -> Self {
        let records = match backend.read_question_records() {
            Ok(loaded) => sanitize_loaded(loaded),
            Err(e) => {
                warn!(
                    error = %e,
                    location = %backend.describe(),
                    "could not read question records, starting with an empty collection"
                );
                Vec::new()
            }
        };
        debug!(count = records.len(), "question store loaded");

        Self {
            backend,
            records,
            editing: None,
            unsaved: false,
        }
    }

    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    pub fn get(&self, id: &Uuid) -> Option<&QuestionRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// True when the last write failed and memory is ahead of storage.
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    /// Appends a new record. A colliding id is replaced with a fresh one.
    pub fn add(&mut self, mut record: QuestionRecord) -> (Uuid, Persisted) {
        record.normalize();
        while self.get(&record.id).is_some() {
            record.id = Uuid::new_v4();
        }
        let id = record.id;

        let mut next = self.records.clone();
        next.push(record);
        (id, self.replace(next))
    }

    pub fn set_reviewed(&mut self, id: &Uuid, value: bool) -> Persisted {
        let next = records::set_reviewed(&self.records, id, value);
        self.replace(next)
    }

    pub fn toggle_reviewed(&mut self, id: &Uuid) -> Persisted {
        let next = records::toggle_reviewed(&self.records, id);
        self.replace(next)
    }

    pub fn set_tags(&mut self, id: &Uuid, raw: &str) -> Persisted {
        let next = records::set_tags(&self.records, id, raw);
        self.replace(next)
    }

    // --- Tag edit session ---

    pub fn editing(&self) -> Option<&TagEdit> {
        self.editing.as_ref()
    }

    /// Puts `id` into tag-edit mode with its current tags as the draft.
    ///
    /// A pending edit on another record is committed first. Unknown ids leave
    /// the session untouched. Returns the outcome of that commit.
    pub fn begin_tag_edit(&mut self, id: &Uuid) -> Persisted {
        let draft = match self.get(id) {
            Some(record) => record.tags_draft(),
            None => return Persisted::Unchanged,
        };
        if self.editing.as_ref().is_some_and(|edit| &edit.id == id) {
            return Persisted::Unchanged;
        }

        let committed = self.commit_tag_edit();
        self.editing = Some(TagEdit { id: *id, draft });
        committed
    }

    /// Replaces the draft text. Returns false when no edit is in progress.
    pub fn update_tag_draft(&mut self, text: impl Into<String>) -> bool {
        match self.editing.as_mut() {
            Some(edit) => {
                edit.draft = text.into();
                true
            }
            None => false,
        }
    }

    /// Applies the draft through [`set_tags`](Self::set_tags) and leaves edit mode.
    pub fn commit_tag_edit(&mut self) -> Persisted {
        match self.editing.take() {
            Some(edit) => self.set_tags(&edit.id, &edit.draft),
            None => Persisted::Unchanged,
        }
    }

    /// Leaves edit mode without touching the record.
    pub fn cancel_tag_edit(&mut self) -> Option<TagEdit> {
        self.editing.take()
    }

    /// Retries a previously failed write.
    pub fn flush(&mut self) -> Persisted {
        if !self.unsaved {
            return Persisted::Unchanged;
        }
        self.persist()
    }

    fn replace(&mut self, next: Vec<QuestionRecord>) -> Persisted {
        if next == self.records {
            return Persisted::Unchanged;
        }
        self.records = next;
        self.persist()
    }

    fn persist(&mut self) -> Persisted {
        match self.backend.write_question_records(&self.records) {
            Ok(()) => {
                self.unsaved = false;
                Persisted::Saved
            }
            Err(e) => {
                warn!(
                    error = %e,
                    location = %self.backend.describe(),
                    "could not save question records, keeping changes in memory"
                );
                self.unsaved = true;
                Persisted::Failed(e)
            }
        }
    }
}

fn sanitize_loaded(loaded: Vec<QuestionRecord>) -> Vec<QuestionRecord> {
    let (mut kept, dropped) = records::dedupe_ids(loaded);
    for id in dropped {
        warn!(%id, "dropping question record with duplicate id");
    }
    for record in &mut kept {
        record.normalize();
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewQuestion, QuestionKind};
    use crate::store::fs_backend::{FsBackend, QUESTIONS_FILE};
    use crate::store::mem_backend::MemBackend;

    fn record(question: &str) -> QuestionRecord {
        QuestionRecord::new(NewQuestion {
            test_name: "Test A".into(),
            section: "Math".into(),
            kind: QuestionKind::MultipleChoice,
            question: question.into(),
            choices: vec!["1".into(), "2".into()],
            ..Default::default()
        })
    }

    fn store_with(records: Vec<QuestionRecord>) -> QuestionStore<MemBackend> {
        QuestionStore::load(MemBackend::with_questions(records))
    }

    #[test]
    fn load_failure_yields_empty_collection() {
        let backend = MemBackend::with_questions(vec![record("q")]);
        backend.set_simulate_read_error(true);

        let store = QuestionStore::load(backend);
        assert!(store.records().is_empty());
    }

    #[test]
    fn load_corrupt_file_yields_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(QUESTIONS_FILE), "{ not json").unwrap();

        let store = QuestionStore::load(FsBackend::new(dir.path().to_path_buf()));
        assert!(store.records().is_empty());
    }

    #[test]
    fn load_drops_duplicate_ids_and_normalizes() {
        let first = record("first");
        let mut dup = record("dup");
        dup.id = first.id;
        let mut fill = record("fill");
        fill.kind = QuestionKind::FillInTheBlank;
        fill.choices = vec!["stale".into()];
        fill.tags = vec![" a ".into(), "a".into(), "".into()];

        let store = store_with(vec![first.clone(), dup, fill]);
        assert_eq!(store.records().len(), 2);
        assert_eq!(store.records()[0].question, "first");
        assert!(store.records()[1].choices.is_empty());
        assert_eq!(store.records()[1].tags, vec!["a"]);
    }

    #[test]
    fn mutation_persists_full_collection() {
        let records = vec![record("a"), record("b")];
        let id = records[1].id;
        let mut store = store_with(records);

        let outcome = store.set_reviewed(&id, true);
        assert!(matches!(outcome, Persisted::Saved));

        let stored = store.backend().stored_questions();
        assert_eq!(stored.len(), 2);
        assert!(stored[1].reviewed);
        assert_eq!(store.backend().question_writes(), 1);
    }

    #[test]
    fn unknown_id_does_not_write() {
        let mut store = store_with(vec![record("a")]);
        let before = store.records().to_vec();

        let outcome = store.set_tags(&Uuid::new_v4(), "x");
        assert!(matches!(outcome, Persisted::Unchanged));
        assert_eq!(store.records(), before.as_slice());
        assert_eq!(store.backend().question_writes(), 0);
    }

    #[test]
    fn write_failure_keeps_change_and_retries() {
        let records = vec![record("a")];
        let id = records[0].id;
        let mut store = store_with(records);
        store.backend().set_simulate_write_error(true);

        let outcome = store.set_reviewed(&id, true);
        assert!(outcome.error().is_some());
        assert!(store.records()[0].reviewed);
        assert!(store.has_unsaved_changes());
        assert!(!store.backend().stored_questions()[0].reviewed);

        store.backend().set_simulate_write_error(false);
        assert!(matches!(store.flush(), Persisted::Saved));
        assert!(!store.has_unsaved_changes());
        assert!(store.backend().stored_questions()[0].reviewed);
    }

    #[test]
    fn next_mutation_carries_earlier_failed_change() {
        let records = vec![record("a"), record("b")];
        let (a, b) = (records[0].id, records[1].id);
        let mut store = store_with(records);

        store.backend().set_simulate_write_error(true);
        store.set_reviewed(&a, true);
        store.backend().set_simulate_write_error(false);
        store.set_tags(&b, "later");

        let stored = store.backend().stored_questions();
        assert!(stored[0].reviewed);
        assert_eq!(stored[1].tags, vec!["later"]);
    }

    #[test]
    fn add_appends_and_keeps_ids_unique() {
        let existing = record("a");
        let mut store = store_with(vec![existing.clone()]);

        let mut clash = record("b");
        clash.id = existing.id;
        let (id, outcome) = store.add(clash);

        assert!(matches!(outcome, Persisted::Saved));
        assert_ne!(id, existing.id);
        assert_eq!(store.records().len(), 2);
        assert_eq!(store.records()[1].id, id);
    }

    #[test]
    fn tag_edit_commit_applies_draft() {
        let records = vec![record("a")];
        let id = records[0].id;
        let mut store = store_with(records);

        store.begin_tag_edit(&id);
        assert_eq!(store.editing().map(|e| e.draft.as_str()), Some(""));
        assert!(store.update_tag_draft("algebra, , algebra, ratios"));
        store.commit_tag_edit();

        assert!(store.editing().is_none());
        assert_eq!(store.records()[0].tags, vec!["algebra", "ratios"]);
    }

    #[test]
    fn tag_edit_cancel_discards_draft() {
        let mut records = vec![record("a")];
        records[0].tags = vec!["keep".into()];
        let id = records[0].id;
        let mut store = store_with(records);

        store.begin_tag_edit(&id);
        store.update_tag_draft("replaced");
        let cancelled = store.cancel_tag_edit();

        assert_eq!(cancelled.map(|e| e.draft), Some("replaced".to_string()));
        assert_eq!(store.records()[0].tags, vec!["keep"]);
        assert_eq!(store.backend().question_writes(), 0);
    }

    #[test]
    fn switching_edit_target_commits_pending_edit() {
        let records = vec![record("a"), record("b")];
        let (a, b) = (records[0].id, records[1].id);
        let mut store = store_with(records);

        store.begin_tag_edit(&a);
        store.update_tag_draft("first");
        let outcome = store.begin_tag_edit(&b);

        assert!(matches!(outcome, Persisted::Saved));
        assert_eq!(store.records()[0].tags, vec!["first"]);
        assert_eq!(store.editing().map(|e| e.id), Some(b));
    }

    #[test]
    fn begin_edit_on_unknown_id_keeps_session() {
        let records = vec![record("a")];
        let a = records[0].id;
        let mut store = store_with(records);

        store.begin_tag_edit(&a);
        store.update_tag_draft("draft");
        store.begin_tag_edit(&Uuid::new_v4());

        assert_eq!(store.editing().map(|e| e.draft.as_str()), Some("draft"));
    }

    #[test]
    fn update_draft_without_session_is_rejected() {
        let mut store = store_with(vec![record("a")]);
        assert!(!store.update_tag_draft("x"));
    }

    #[test]
    fn fs_store_reads_back_last_write() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_path_buf();

        let mut store = QuestionStore::load(FsBackend::new(root.clone()));
        let (id, _) = store.add(record("persisted"));
        store.set_tags(&id, "x, y");

        let reloaded = QuestionStore::load(FsBackend::new(root));
        assert_eq!(reloaded.records().len(), 1);
        assert_eq!(reloaded.records()[0].tags, vec!["x", "y"]);
    }
}
