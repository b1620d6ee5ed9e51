//! # Display Indexes
//!
//! Records are addressed on the command line by a short 1-based index rather
//! than their UUID. Index `1` is the most recently added record, so indexes
//! run in reverse storage order (storage order is append order).
//!
//! Indexes are assigned over the **whole** collection, before any filter is
//! applied. A record shows the same index in every filtered listing, so
//! `studylog list --tag algebra` followed by `studylog review 7` always hits
//! the record that was shown as `7`.
//!
//! A selector can also be a UUID prefix, which never changes as records are
//! added. A prefix made only of digits reads as an index unless written as
//! `id:<prefix>`.

use crate::model::QuestionRecord;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRecord {
    pub index: usize,
    pub record: QuestionRecord,
}

/// A user input that picks a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSelector {
    Index(usize),
    /// Full UUID or a prefix of one.
    Id(String),
}

impl fmt::Display for RecordSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordSelector::Index(i) => write!(f, "{}", i),
            RecordSelector::Id(prefix) => write!(f, "{}", prefix),
        }
    }
}

impl FromStr for RecordSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty selector".to_string());
        }
        if let Some(prefix) = s.strip_prefix(ID_MARKER) {
            let prefix = prefix.trim();
            if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_hexdigit() || c == '-') {
                return Err(format!("Invalid id prefix: {}", s));
            }
            return Ok(RecordSelector::Id(prefix.to_lowercase()));
        }
        if s.chars().all(|c| c.is_ascii_digit()) {
            return match s.parse::<usize>() {
                Ok(0) => Err("Indexes start at 1".to_string()),
                Ok(n) => Ok(RecordSelector::Index(n)),
                Err(_) => Err(format!("Invalid index: {}", s)),
            };
        }
        if s.chars().all(|c| c.is_ascii_hexdigit() || c == '-') {
            return Ok(RecordSelector::Id(s.to_lowercase()));
        }
        Err(format!("Invalid selector: {}", s))
    }
}

impl RecordSelector {
    pub fn matches(&self, entry: &DisplayRecord) -> bool {
        match self {
            RecordSelector::Index(i) => entry.index == *i,
            RecordSelector::Id(prefix) => entry.record.id.to_string().starts_with(prefix.as_str()),
        }
    }
}

/// Numbers the collection newest first. The result is in display order.
pub fn index_records(records: &[QuestionRecord]) -> Vec<DisplayRecord> {
    records
        .iter()
        .rev()
        .enumerate()
        .map(|(i, record)| DisplayRecord {
            index: i + 1,
            record: record.clone(),
        })
        .collect()
}

/// Forces an id prefix, for prefixes made only of digits (`id:12345678`).
pub const ID_MARKER: &str = "id:";

/// Parses an input that must name exactly one record. Ranges are rejected.
pub fn parse_single_selector(s: &str) -> Result<RecordSelector, String> {
    if is_index_range(s.trim()) {
        return Err(format!("Expected one index or id prefix, got range {}", s.trim()));
    }
    RecordSelector::from_str(s)
}

fn is_index_range(s: &str) -> bool {
    let numeric = |part: &str| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit());
    s.split_once('-')
        .is_some_and(|(start, end)| numeric(start) && numeric(end))
}

/// Parses one input that is an index, an index range (`3-5`) or a UUID prefix.
///
/// A string is only treated as a range when both sides are plain numbers, so
/// UUID prefixes containing dashes pass through as ids.
pub fn parse_selector_or_range(s: &str) -> Result<Vec<RecordSelector>, String> {
    let s = s.trim();
    if let Some((start, end)) = s.split_once('-').filter(|_| is_index_range(s)) {
        let start = parse_index(start)?;
        let end = parse_index(end)?;
        if start > end {
            return Err(format!(
                "Invalid range: start ({}) must be <= end ({})",
                start, end
            ));
        }
        return Ok((start..=end).map(RecordSelector::Index).collect());
    }
    RecordSelector::from_str(s).map(|sel| vec![sel])
}

/// Parses every input, expanding ranges. Duplicates are dropped, first one wins.
pub fn parse_selectors<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<RecordSelector>, String> {
    let mut selectors: Vec<RecordSelector> = Vec::new();
    for input in inputs {
        for sel in parse_selector_or_range(input.as_ref())? {
            if !selectors.contains(&sel) {
                selectors.push(sel);
            }
        }
    }
    Ok(selectors)
}

fn parse_index(s: &str) -> Result<usize, String> {
    match RecordSelector::from_str(s)? {
        RecordSelector::Index(n) => Ok(n),
        RecordSelector::Id(_) => Err(format!("Invalid index: {}", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewQuestion;

    fn record(question: &str) -> QuestionRecord {
        QuestionRecord::new(NewQuestion {
            section: "Math".into(),
            question: question.into(),
            ..Default::default()
        })
    }

    #[test]
    fn newest_record_gets_index_one() {
        let records = vec![record("oldest"), record("middle"), record("newest")];
        let indexed = index_records(&records);

        assert_eq!(indexed[0].index, 1);
        assert_eq!(indexed[0].record.question, "newest");
        assert_eq!(indexed[2].index, 3);
        assert_eq!(indexed[2].record.question, "oldest");
    }

    #[test]
    fn parses_indexes_and_prefixes() {
        assert_eq!("3".parse::<RecordSelector>(), Ok(RecordSelector::Index(3)));
        assert_eq!("6F1C".parse::<RecordSelector>(), Ok(RecordSelector::Id("6f1c".into())));
        assert_eq!(
            "6f1c2a4e-8f5b".parse::<RecordSelector>(),
            Ok(RecordSelector::Id("6f1c2a4e-8f5b".into()))
        );

        assert!("0".parse::<RecordSelector>().is_err());
        assert!("".parse::<RecordSelector>().is_err());
        assert!("hello".parse::<RecordSelector>().is_err());
    }

    #[test]
    fn expands_ranges() {
        assert_eq!(
            parse_selector_or_range("3-5"),
            Ok(vec![
                RecordSelector::Index(3),
                RecordSelector::Index(4),
                RecordSelector::Index(5)
            ])
        );
        assert_eq!(
            parse_selector_or_range("2-2"),
            Ok(vec![RecordSelector::Index(2)])
        );

        let err = parse_selector_or_range("5-3").unwrap_err();
        assert!(err.contains("must be <= end"));
    }

    #[test]
    fn id_marker_forces_a_prefix() {
        assert_eq!(
            "id:12345678".parse::<RecordSelector>(),
            Ok(RecordSelector::Id("12345678".into()))
        );
        assert_eq!(
            parse_selector_or_range("id:12-34"),
            Ok(vec![RecordSelector::Id("12-34".into())])
        );
        assert!("id:".parse::<RecordSelector>().is_err());
        assert!("id:xyz".parse::<RecordSelector>().is_err());
    }

    #[test]
    fn digit_only_prefix_selects_by_id() {
        let mut only = record("only");
        only.id = uuid::Uuid::parse_str("12345678-9abc-4def-8123-456789abcdef").unwrap();
        let indexed = index_records(&[only]);

        let by_id: RecordSelector = "id:1234".parse().unwrap();
        assert!(by_id.matches(&indexed[0]));
        let by_index: RecordSelector = "1234".parse().unwrap();
        assert!(!by_index.matches(&indexed[0]));
    }

    #[test]
    fn single_selector_rejects_ranges() {
        assert_eq!(parse_single_selector("4"), Ok(RecordSelector::Index(4)));
        assert_eq!(
            parse_single_selector("6f1c"),
            Ok(RecordSelector::Id("6f1c".into()))
        );
        let err = parse_single_selector("3-5").unwrap_err();
        assert!(err.contains("got range 3-5"));
    }

    #[test]
    fn dashed_prefix_is_not_a_range() {
        assert_eq!(
            parse_selector_or_range("abcd-12"),
            Ok(vec![RecordSelector::Id("abcd-12".into())])
        );
    }

    #[test]
    fn parse_selectors_drops_duplicates() {
        let parsed = parse_selectors(&["1-3", "2", "4"]).unwrap();
        assert_eq!(
            parsed,
            vec![
                RecordSelector::Index(1),
                RecordSelector::Index(2),
                RecordSelector::Index(3),
                RecordSelector::Index(4)
            ]
        );
    }

    #[test]
    fn selector_matches_index_or_prefix() {
        let records = vec![record("a")];
        let indexed = index_records(&records);
        let prefix = records[0].id.to_string()[..8].to_string();

        assert!(RecordSelector::Index(1).matches(&indexed[0]));
        assert!(!RecordSelector::Index(2).matches(&indexed[0]));
        assert!(RecordSelector::Id(prefix).matches(&indexed[0]));
    }
}
