use crate::commands::{CmdMessage, CmdResult};
use crate::index::{index_records, DisplayRecord, RecordSelector};
use crate::model::QuestionRecord;
use crate::store::question_store::Persisted;

const SUMMARY_CHARS: usize = 60;

/// Resolves selectors against the indexed collection.
///
/// Selectors that match nothing, or a prefix that matches several records,
/// add a warning to `result` and are skipped.
pub fn resolve_selectors(
    records: &[QuestionRecord],
    selectors: &[RecordSelector],
    result: &mut CmdResult,
) -> Vec<DisplayRecord> {
    let indexed = index_records(records);
    let mut resolved: Vec<DisplayRecord> = Vec::new();

    for selector in selectors {
        let hits: Vec<&DisplayRecord> = indexed.iter().filter(|d| selector.matches(d)).collect();
        match hits.as_slice() {
            [] => result.add_message(CmdMessage::warning(format!(
                "No question matches {}",
                selector
            ))),
            [hit] => {
                if !resolved.iter().any(|d| d.record.id == hit.record.id) {
                    resolved.push((*hit).clone());
                }
            }
            many => result.add_message(CmdMessage::warning(format!(
                "{} matches {} questions, use a longer id prefix",
                selector,
                many.len()
            ))),
        }
    }

    resolved
}

/// First line of the question, shortened for messages.
pub fn summary(record: &QuestionRecord) -> String {
    let first_line = record.question.lines().next().unwrap_or("").trim();
    if first_line.chars().count() > SUMMARY_CHARS {
        let cut: String = first_line.chars().take(SUMMARY_CHARS - 1).collect();
        format!("{}…", cut)
    } else {
        first_line.to_string()
    }
}

/// Turns a failed write into a warning. Saved and unchanged outcomes add nothing.
pub fn report_persisted(result: &mut CmdResult, persisted: &Persisted) {
    if let Some(e) = persisted.error() {
        result.add_message(CmdMessage::warning(format!(
            "Could not save changes ({}). They are kept for this session and will be retried.",
            e
        )));
    }
}
