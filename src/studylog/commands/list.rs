use crate::commands::filter::ReviewFilter;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::{index_records, DisplayRecord};
use crate::model::QuestionRecord;
use crate::store::backend::StorageBackend;
use crate::store::question_store::QuestionStore;

/// The filtered view in display order, each record carrying its stable index.
pub fn filtered_view(records: &[QuestionRecord], filter: &ReviewFilter) -> Vec<DisplayRecord> {
    index_records(records)
        .into_iter()
        .filter(|entry| filter.matches(&entry.record))
        .collect()
}

pub fn run<B: StorageBackend>(
    store: &QuestionStore<B>,
    filter: &ReviewFilter,
) -> Result<CmdResult> {
    Ok(CmdResult::default().with_listed_records(filtered_view(store.records(), filter)))
}
