use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::RecordSelector;
use crate::store::backend::StorageBackend;
use crate::store::question_store::QuestionStore;

use super::helpers::resolve_selectors;

pub fn run<B: StorageBackend>(
    store: &QuestionStore<B>,
    selectors: &[RecordSelector],
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let records = resolve_selectors(store.records(), selectors, &mut result);
    result.listed_records = records;
    Ok(result)
}
