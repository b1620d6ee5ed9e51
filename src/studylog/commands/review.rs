use crate::commands::helpers::{report_persisted, resolve_selectors, summary};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::RecordSelector;
use crate::store::backend::StorageBackend;
use crate::store::question_store::QuestionStore;

pub fn mark<B: StorageBackend>(
    store: &mut QuestionStore<B>,
    selectors: &[RecordSelector],
    reviewed: bool,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let targets = resolve_selectors(store.records(), selectors, &mut result);

    for target in targets {
        let persisted = store.set_reviewed(&target.record.id, reviewed);
        report_persisted(&mut result, &persisted);

        let label = if reviewed { "reviewed" } else { "unreviewed" };
        let message = if persisted.changed() {
            CmdMessage::success(format!(
                "Marked {} ({}): {}",
                label,
                target.index,
                summary(&target.record)
            ))
        } else {
            CmdMessage::info(format!(
                "Already {} ({}): {}",
                label,
                target.index,
                summary(&target.record)
            ))
        };
        result.add_message(message);

        if let Some(updated) = store.get(&target.record.id) {
            result.affected_records.push(updated.clone());
        }
    }

    Ok(result)
}

pub fn toggle<B: StorageBackend>(
    store: &mut QuestionStore<B>,
    selectors: &[RecordSelector],
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let targets = resolve_selectors(store.records(), selectors, &mut result);

    for target in targets {
        let persisted = store.toggle_reviewed(&target.record.id);
        report_persisted(&mut result, &persisted);

        if let Some(updated) = store.get(&target.record.id) {
            let label = if updated.reviewed { "reviewed" } else { "unreviewed" };
            result.add_message(CmdMessage::success(format!(
                "Marked {} ({}): {}",
                label,
                target.index,
                summary(updated)
            )));
            result.affected_records.push(updated.clone());
        }
    }

    Ok(result)
}
