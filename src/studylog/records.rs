//! # Collection Transforms
//!
//! Pure functions over a question collection. Each takes the current
//! collection by reference and returns the next one; the input is never
//! modified. [`QuestionStore`](crate::store::question_store::QuestionStore)
//! uses these to produce its next state and then persists it.
//!
//! An id that is not in the collection is never an error: the returned
//! collection is equal to the input.

use crate::model::QuestionRecord;
use std::collections::HashSet;
use uuid::Uuid;

/// Returns a copy of `records` with the `reviewed` flag of `id` set to `value`.
pub fn set_reviewed(records: &[QuestionRecord], id: &Uuid, value: bool) -> Vec<QuestionRecord> {
    update(records, id, |record| record.reviewed = value)
}

/// Returns a copy of `records` with the `reviewed` flag of `id` flipped.
pub fn toggle_reviewed(records: &[QuestionRecord], id: &Uuid) -> Vec<QuestionRecord> {
    update(records, id, |record| record.reviewed = !record.reviewed)
}

/// Returns a copy of `records` with the tags of `id` replaced by the tags
/// parsed from a comma-separated string.
pub fn set_tags(records: &[QuestionRecord], id: &Uuid, raw: &str) -> Vec<QuestionRecord> {
    let tags = parse_tags(raw);
    update(records, id, move |record| record.tags = tags.clone())
}

/// Splits a comma-separated tag string into clean tags.
///
/// Pieces are trimmed, blanks dropped, and duplicates removed keeping the
/// first occurrence. Any input is accepted.
pub fn parse_tags(raw: &str) -> Vec<String> {
    sanitize_tags(raw.split(','))
}

pub fn sanitize_tags<'a, I>(pieces: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    pieces
        .into_iter()
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .filter(|tag| seen.insert(tag.to_string()))
        .map(str::to_string)
        .collect()
}

/// Drops every record whose id already appeared earlier in the collection.
///
/// Returns the surviving records and the ids that were dropped.
pub fn dedupe_ids(records: Vec<QuestionRecord>) -> (Vec<QuestionRecord>, Vec<Uuid>) {
    let mut seen = HashSet::new();
    let mut dropped = Vec::new();
    let kept = records
        .into_iter()
        .filter(|record| {
            if seen.insert(record.id) {
                true
            } else {
                dropped.push(record.id);
                false
            }
        })
        .collect();
    (kept, dropped)
}

fn update<F>(records: &[QuestionRecord], id: &Uuid, mut apply: F) -> Vec<QuestionRecord>
where
    F: FnMut(&mut QuestionRecord),
{
    records
        .iter()
        .map(|record| {
            let mut next = record.clone();
            if &next.id == id {
                apply(&mut next);
            }
            next
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewQuestion, QuestionKind};

    fn record(question: &str) -> QuestionRecord {
        QuestionRecord::new(NewQuestion {
            section: "Math".into(),
            kind: QuestionKind::MultipleChoice,
            question: question.into(),
            ..Default::default()
        })
    }

    fn collection() -> Vec<QuestionRecord> {
        vec![record("one"), record("two"), record("three")]
    }

    #[test]
    fn unknown_id_leaves_collection_unchanged() {
        let records = collection();
        let missing = Uuid::new_v4();

        assert_eq!(set_reviewed(&records, &missing, true), records);
        assert_eq!(toggle_reviewed(&records, &missing), records);
        assert_eq!(set_tags(&records, &missing, "a, b"), records);
    }

    #[test]
    fn set_reviewed_touches_only_target() {
        let records = collection();
        let id = records[1].id;

        let updated = set_reviewed(&records, &id, true);
        assert!(updated[1].reviewed);
        assert!(!updated[0].reviewed);
        assert!(!updated[2].reviewed);
        // input untouched
        assert!(!records[1].reviewed);
    }

    #[test]
    fn set_reviewed_is_idempotent() {
        let records = collection();
        let id = records[0].id;

        let once = set_reviewed(&records, &id, true);
        let twice = set_reviewed(&once, &id, true);
        assert_eq!(once, twice);
    }

    #[test]
    fn toggle_flips_back_and_forth() {
        let records = collection();
        let id = records[2].id;

        let on = toggle_reviewed(&records, &id);
        assert!(on[2].reviewed);
        let off = toggle_reviewed(&on, &id);
        assert_eq!(off, records);
    }

    #[test]
    fn set_tags_trims_drops_blanks_and_dedupes() {
        let records = collection();
        let id = records[0].id;

        let updated = set_tags(&records, &id, "a, b ,  b, ");
        assert_eq!(updated[0].tags, vec!["a", "b"]);
    }

    #[test]
    fn set_tags_with_blank_string_clears() {
        let mut records = collection();
        records[0].tags = vec!["old".into()];
        let id = records[0].id;

        let updated = set_tags(&records, &id, " , ,");
        assert!(updated[0].tags.is_empty());
    }

    #[test]
    fn parse_tags_keeps_first_seen_order_and_case() {
        assert_eq!(
            parse_tags("geometry, Algebra,algebra, geometry"),
            vec!["geometry", "Algebra", "algebra"]
        );
        assert!(parse_tags("").is_empty());
    }

    #[test]
    fn dedupe_ids_keeps_first_occurrence() {
        let first = record("first");
        let mut clash = record("clash");
        clash.id = first.id;
        let other = record("other");

        let (kept, dropped) = dedupe_ids(vec![first.clone(), clash, other.clone()]);
        assert_eq!(kept, vec![first.clone(), other]);
        assert_eq!(dropped, vec![first.id]);
    }
}
