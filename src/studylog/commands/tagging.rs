use crate::commands::helpers::{report_persisted, resolve_selectors};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::{DisplayRecord, RecordSelector};
use crate::model::QuestionRecord;
use crate::store::backend::StorageBackend;
use crate::store::question_store::QuestionStore;

/// Replaces the tags of every selected record with the tags parsed from `raw`.
pub fn set<B: StorageBackend>(
    store: &mut QuestionStore<B>,
    selectors: &[RecordSelector],
    raw: &str,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let targets = resolve_selectors(store.records(), selectors, &mut result);

    for target in targets {
        let persisted = store.set_tags(&target.record.id, raw);
        report_persisted(&mut result, &persisted);
        if let Some(updated) = store.get(&target.record.id) {
            result.add_message(tags_message(target.index, updated));
            result.affected_records.push(updated.clone());
        }
    }

    Ok(result)
}

/// Puts one record into tag-edit mode.
///
/// The record is returned in `listed_records` so the caller knows which index
/// is being edited. A pending edit on another record is committed first.
pub fn begin_edit<B: StorageBackend>(
    store: &mut QuestionStore<B>,
    selector: &RecordSelector,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let resolved = resolve_selectors(store.records(), std::slice::from_ref(selector), &mut result);
    let Some(target) = resolved.into_iter().next() else {
        return Ok(result);
    };

    let previous = store.editing().map(|edit| edit.id);
    let persisted = store.begin_tag_edit(&target.record.id);
    report_persisted(&mut result, &persisted);

    if let Some(prev_id) = previous.filter(|id| id != &target.record.id) {
        if let Some(prev) = store.get(&prev_id) {
            result.add_message(CmdMessage::info(format!(
                "Saved pending tag edit: {}",
                display_tags(prev)
            )));
            result.affected_records.push(prev.clone());
        }
    }

    result.listed_records.push(DisplayRecord {
        index: target.index,
        record: target.record,
    });
    Ok(result)
}

/// Commits the current edit, optionally replacing the draft first.
pub fn commit_edit<B: StorageBackend>(
    store: &mut QuestionStore<B>,
    draft: Option<String>,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let id = match store.editing() {
        Some(edit) => edit.id,
        None => {
            result.add_message(CmdMessage::warning("No tag edit in progress"));
            return Ok(result);
        }
    };

    if let Some(draft) = draft {
        store.update_tag_draft(draft);
    }
    let persisted = store.commit_tag_edit();
    report_persisted(&mut result, &persisted);

    if let Some(updated) = store.get(&id) {
        let message = if persisted.changed() {
            CmdMessage::success(format!("Tags updated: {}", display_tags(updated)))
        } else {
            CmdMessage::info(format!("Tags unchanged: {}", display_tags(updated)))
        };
        result.add_message(message);
        result.affected_records.push(updated.clone());
    }
    Ok(result)
}

/// Drops the current draft without touching the record.
pub fn cancel_edit<B: StorageBackend>(store: &mut QuestionStore<B>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if store.cancel_tag_edit().is_some() {
        result.add_message(CmdMessage::info("Tag edit discarded"));
    }
    Ok(result)
}

fn tags_message(index: usize, record: &QuestionRecord) -> CmdMessage {
    CmdMessage::success(format!("Tags set ({}): {}", index, display_tags(record)))
}

fn display_tags(record: &QuestionRecord) -> String {
    if record.tags.is_empty() {
        "(none)".to_string()
    } else {
        record.tags.join(", ")
    }
}
