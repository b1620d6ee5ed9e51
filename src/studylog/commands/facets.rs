use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::QuestionRecord;
use crate::store::backend::StorageBackend;
use crate::store::question_store::QuestionStore;
use std::collections::BTreeSet;

/// Distinct values usable as filter dimensions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    pub tags: BTreeSet<String>,
    pub test_names: BTreeSet<String>,
    pub sections: BTreeSet<String>,
}

/// Derives facets from scratch. Empty test names and sections are left out.
pub fn derive_facets(records: &[QuestionRecord]) -> Facets {
    let mut facets = Facets::default();
    for record in records {
        facets.tags.extend(record.tags.iter().cloned());
        if !record.test_name.is_empty() {
            facets.test_names.insert(record.test_name.clone());
        }
        if !record.section.is_empty() {
            facets.sections.insert(record.section.clone());
        }
    }
    facets
}

pub fn run<B: StorageBackend>(store: &QuestionStore<B>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_facets(derive_facets(store.records())))
}
