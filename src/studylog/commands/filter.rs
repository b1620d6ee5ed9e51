//! # Filter Engine
//!
//! A [`ReviewFilter`] has five independent dimensions. A record is in the
//! view when it passes every dimension that is set; `None` and empty strings
//! match everything. Because the result is a plain conjunction of per-record
//! predicates, the order in which dimensions are applied never changes the
//! outcome, and the output keeps the relative order of the input.
//!
//! | Dimension         | Keeps records where                                      |
//! |-------------------|----------------------------------------------------------|
//! | `only_unreviewed` | `reviewed` is false                                      |
//! | `tag`             | `tags` contains the tag (exact, case-sensitive)          |
//! | `test_name`       | `test_name` equals it                                    |
//! | `section`         | `section` equals it                                      |
//! | `search_term`     | question or any choice contains it, ignoring case        |

use crate::model::QuestionRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewFilter {
    pub only_unreviewed: bool,
    pub tag: Option<String>,
    pub test_name: Option<String>,
    pub section: Option<String>,
    pub search_term: Option<String>,
}

impl ReviewFilter {
    pub fn matches(&self, record: &QuestionRecord) -> bool {
        if self.only_unreviewed && record.reviewed {
            return false;
        }
        if let Some(tag) = active(&self.tag) {
            if !record.has_tag(tag) {
                return false;
            }
        }
        if let Some(test_name) = active(&self.test_name) {
            if record.test_name != test_name {
                return false;
            }
        }
        if let Some(section) = active(&self.section) {
            if record.section != section {
                return false;
            }
        }
        if let Some(term) = active(&self.search_term) {
            let needle = term.to_lowercase();
            let found = record.question.to_lowercase().contains(&needle)
                || record
                    .choices
                    .iter()
                    .any(|choice| choice.to_lowercase().contains(&needle));
            if !found {
                return false;
            }
        }
        true
    }

    /// True when no dimension is set.
    pub fn is_empty(&self) -> bool {
        !self.only_unreviewed
            && active(&self.tag).is_none()
            && active(&self.test_name).is_none()
            && active(&self.section).is_none()
            && active(&self.search_term).is_none()
    }
}

/// Returns the records that pass `filter`, in input order.
pub fn apply(records: &[QuestionRecord], filter: &ReviewFilter) -> Vec<QuestionRecord> {
    records
        .iter()
        .filter(|record| filter.matches(record))
        .cloned()
        .collect()
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewQuestion, QuestionKind};

    fn record(test: &str, section: &str, question: &str, tags: &[&str]) -> QuestionRecord {
        QuestionRecord::new(NewQuestion {
            test_name: test.into(),
            section: section.into(),
            kind: QuestionKind::MultipleChoice,
            question: question.into(),
            choices: vec!["Parabola".into(), "Line".into()],
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        })
    }

    fn collection() -> Vec<QuestionRecord> {
        let mut records = vec![
            record("Test A", "Math", "Solve for x", &["algebra"]),
            record("Test A", "Reading", "Main idea of passage", &[]),
            record("Test B", "Math", "Area of triangle", &["geometry", "algebra"]),
            record("", "Writing", "Comma usage", &["Algebra"]),
        ];
        records[2].reviewed = true;
        records
    }

    fn questions(records: &[QuestionRecord]) -> Vec<&str> {
        records.iter().map(|r| r.question.as_str()).collect()
    }

    #[test]
    fn unset_filter_is_identity() {
        let records = collection();
        let filter = ReviewFilter::default();
        assert!(filter.is_empty());
        assert_eq!(apply(&records, &filter), records);
    }

    #[test]
    fn empty_strings_count_as_unset() {
        let records = collection();
        let filter = ReviewFilter {
            tag: Some(String::new()),
            test_name: Some(String::new()),
            section: Some(String::new()),
            search_term: Some(String::new()),
            ..Default::default()
        };
        assert!(filter.is_empty());
        assert_eq!(apply(&records, &filter), records);
    }

    #[test]
    fn only_unreviewed_drops_reviewed() {
        let filter = ReviewFilter {
            only_unreviewed: true,
            ..Default::default()
        };
        let view = apply(&collection(), &filter);
        assert_eq!(view.len(), 3);
        assert!(view.iter().all(|r| !r.reviewed));
    }

    #[test]
    fn tag_match_is_exact_and_case_sensitive() {
        let filter = ReviewFilter {
            tag: Some("algebra".into()),
            ..Default::default()
        };
        assert_eq!(
            questions(&apply(&collection(), &filter)),
            vec!["Solve for x", "Area of triangle"]
        );

        let partial = ReviewFilter {
            tag: Some("alg".into()),
            ..Default::default()
        };
        assert!(apply(&collection(), &partial).is_empty());
    }

    #[test]
    fn test_name_and_section_are_exact() {
        let filter = ReviewFilter {
            test_name: Some("Test A".into()),
            section: Some("Math".into()),
            ..Default::default()
        };
        assert_eq!(questions(&apply(&collection(), &filter)), vec!["Solve for x"]);

        let lower = ReviewFilter {
            section: Some("math".into()),
            ..Default::default()
        };
        assert!(apply(&collection(), &lower).is_empty());
    }

    #[test]
    fn search_ignores_case_and_looks_at_choices() {
        let in_question = ReviewFilter {
            search_term: Some("TRIANGLE".into()),
            ..Default::default()
        };
        assert_eq!(
            questions(&apply(&collection(), &in_question)),
            vec!["Area of triangle"]
        );

        let in_choice = ReviewFilter {
            search_term: Some("parab".into()),
            ..Default::default()
        };
        assert_eq!(apply(&collection(), &in_choice).len(), 4);
    }

    #[test]
    fn search_skips_choices_of_fill_in_questions() {
        let mut records = collection();
        records[1].kind = QuestionKind::FillInTheBlank;
        records[1].normalize();

        let filter = ReviewFilter {
            search_term: Some("line".into()),
            ..Default::default()
        };
        assert_eq!(apply(&records, &filter).len(), 3);
    }

    #[test]
    fn composition_order_does_not_matter() {
        let records = collection();
        let dims = [
            ReviewFilter {
                only_unreviewed: true,
                ..Default::default()
            },
            ReviewFilter {
                tag: Some("algebra".into()),
                ..Default::default()
            },
            ReviewFilter {
                section: Some("Math".into()),
                ..Default::default()
            },
        ];

        let forward = dims.iter().fold(records.clone(), |acc, f| apply(&acc, f));
        let backward = dims.iter().rev().fold(records.clone(), |acc, f| apply(&acc, f));
        let combined = apply(
            &records,
            &ReviewFilter {
                only_unreviewed: true,
                tag: Some("algebra".into()),
                section: Some("Math".into()),
                ..Default::default()
            },
        );

        assert_eq!(forward, backward);
        assert_eq!(forward, combined);
        assert_eq!(questions(&combined), vec!["Solve for x"]);
    }

    #[test]
    fn no_match_is_an_empty_view() {
        let filter = ReviewFilter {
            test_name: Some("Nope".into()),
            ..Default::default()
        };
        assert!(apply(&collection(), &filter).is_empty());
    }
}
