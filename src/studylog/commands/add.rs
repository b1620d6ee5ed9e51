use crate::commands::helpers::{report_persisted, summary};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, StudyError};
use crate::model::{NewQuestion, QuestionKind, QuestionRecord};
use crate::store::backend::StorageBackend;
use crate::store::question_store::QuestionStore;

/// Adds one missed question to the end of the collection.
pub fn run<B: StorageBackend>(
    store: &mut QuestionStore<B>,
    input: NewQuestion,
) -> Result<CmdResult> {
    if input.section.trim().is_empty() {
        return Err(StudyError::Api("A section is required".to_string()));
    }
    if input.question.trim().is_empty() {
        return Err(StudyError::Api("Question text cannot be empty".to_string()));
    }

    let mut result = CmdResult::default();
    if input.kind == QuestionKind::FillInTheBlank && !input.choices.is_empty() {
        result.add_message(CmdMessage::info(
            "Choices are ignored for fill-in-the-blank questions",
        ));
    }

    let (id, persisted) = store.add(QuestionRecord::new(input));
    report_persisted(&mut result, &persisted);

    if let Some(record) = store.get(&id) {
        result.add_message(CmdMessage::success(format!(
            "Question added (1): {}",
            summary(record)
        )));
        result.affected_records.push(record.clone());
    }
    Ok(result)
}
