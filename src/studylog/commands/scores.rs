//! Score log. Scores are created and deleted, never edited.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, StudyError};
use crate::model::{NewScore, ScoreRecord};
use crate::store::backend::StorageBackend;

pub fn add<B: StorageBackend>(backend: &B, input: NewScore) -> Result<CmdResult> {
    if input.section.trim().is_empty() {
        return Err(StudyError::Api("A section is required".to_string()));
    }

    let mut scores = backend.read_score_records()?;
    let score = ScoreRecord::new(input);
    scores.push(score.clone());
    backend.write_score_records(&scores)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Score logged: {} {} on {}",
        score.section, score.score, score.date
    )));
    Ok(result.with_scores(vec![score]))
}

/// Newest date first. Scores on the same date list the most recently added first.
pub fn list<B: StorageBackend>(backend: &B) -> Result<CmdResult> {
    let mut scores = backend.read_score_records()?;
    scores.reverse();
    scores.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(CmdResult::default().with_scores(scores))
}

/// Deletes the score whose id starts with `id_prefix`.
pub fn delete<B: StorageBackend>(backend: &B, id_prefix: &str) -> Result<CmdResult> {
    let prefix = id_prefix.trim().to_lowercase();
    let mut result = CmdResult::default();
    if prefix.is_empty() {
        result.add_message(CmdMessage::warning("No score id given"));
        return Ok(result);
    }

    let scores = backend.read_score_records()?;
    let (matching, kept): (Vec<ScoreRecord>, Vec<ScoreRecord>) = scores
        .into_iter()
        .partition(|s| s.id.to_string().starts_with(&prefix));

    match matching.len() {
        0 => result.add_message(CmdMessage::warning(format!(
            "No score matches {}",
            id_prefix
        ))),
        1 => {
            backend.write_score_records(&kept)?;
            let removed = &matching[0];
            result.add_message(CmdMessage::success(format!(
                "Score deleted: {} {} on {}",
                removed.section, removed.score, removed.date
            )));
            result.scores = matching;
        }
        n => result.add_message(CmdMessage::warning(format!(
            "{} matches {} scores, use a longer id prefix",
            id_prefix, n
        ))),
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::model::SectionScores;
    use crate::store::mem_backend::MemBackend;
    use chrono::NaiveDate;

    fn score(day: u32, section: &str, value: u32) -> NewScore {
        NewScore {
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            test_name: String::new(),
            section: section.into(),
            score: value,
            sub_scores: None,
        }
    }

    #[test]
    fn lists_newest_date_first() {
        let backend = MemBackend::new();
        add(&backend, score(1, "Math", 600)).unwrap();
        add(&backend, score(9, "Reading", 650)).unwrap();
        add(&backend, score(1, "Writing", 610)).unwrap();

        let listed: Vec<_> = list(&backend)
            .unwrap()
            .scores
            .iter()
            .map(|s| s.section.clone())
            .collect();
        assert_eq!(listed, vec!["Reading", "Writing", "Math"]);
    }

    #[test]
    fn full_test_keeps_sub_scores() {
        let backend = MemBackend::new();
        let mut input = score(2, "Full Test", 1300);
        input.sub_scores = Some(SectionScores {
            math: Some(650),
            english: Some(650),
        });

        let result = add(&backend, input).unwrap();
        assert!(result.scores[0].sub_scores.is_some());
    }

    #[test]
    fn rejects_blank_section() {
        let backend = MemBackend::new();
        assert!(add(&backend, score(2, " ", 500)).is_err());
    }

    #[test]
    fn delete_by_prefix() {
        let backend = MemBackend::new();
        let added = add(&backend, score(1, "Math", 600)).unwrap().scores[0].clone();
        add(&backend, score(2, "Math", 610)).unwrap();

        let prefix = &added.id.to_string()[..8];
        let result = delete(&backend, prefix).unwrap();
        assert!(result.has_level(MessageLevel::Success));

        let remaining = list(&backend).unwrap().scores;
        assert_eq!(remaining.len(), 1);
        assert_ne!(remaining[0].id, added.id);
    }

    #[test]
    fn delete_unknown_is_warning() {
        let backend = MemBackend::new();
        add(&backend, score(1, "Math", 600)).unwrap();

        let result = delete(&backend, "zzzz").unwrap();
        assert!(result.has_level(MessageLevel::Warning));
        assert_eq!(list(&backend).unwrap().scores.len(), 1);
    }

    #[test]
    fn unreadable_store_is_an_error() {
        let backend = MemBackend::new();
        backend.set_simulate_read_error(true);
        assert!(list(&backend).is_err());
        assert!(add(&backend, score(1, "Math", 600)).is_err());
    }
}
