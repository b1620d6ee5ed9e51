use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Section name that carries per-section sub-scores.
pub const FULL_TEST_SECTION: &str = "Full Test";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum QuestionKind {
    #[default]
    #[serde(rename = "mc", alias = "multiple-choice")]
    MultipleChoice,
    #[serde(rename = "fill", alias = "fill-in-the-blank")]
    FillInTheBlank,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::MultipleChoice => write!(f, "multiple-choice"),
            QuestionKind::FillInTheBlank => write!(f, "fill-in-the-blank"),
        }
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mc" | "multiple-choice" | "multiple_choice" => Ok(QuestionKind::MultipleChoice),
            "fill" | "fill-in-the-blank" | "fill_in_the_blank" => Ok(QuestionKind::FillInTheBlank),
            other => Err(format!(
                "Unknown question type '{}' (expected mc or fill)",
                other
            )),
        }
    }
}

/// A missed question kept for later review.
///
/// Field names serialize in camelCase so a dump of the browser-local
/// `wrongQuestions` list loads without conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    pub id: Uuid,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub test_name: String,
    #[serde(default)]
    pub section: String,
    #[serde(rename = "type", default)]
    pub kind: QuestionKind,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub choices: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub user_answer: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub correct_answer: String,
    #[serde(default)]
    pub reviewed: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    // Absent on records imported from the browser store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<DateTime<Utc>>,
}

/// Input for a new question, as collected by the submission workflow.
#[derive(Debug, Clone, Default)]
pub struct NewQuestion {
    pub test_name: String,
    pub section: String,
    pub kind: QuestionKind,
    pub question: String,
    pub choices: Vec<String>,
    pub user_answer: String,
    pub correct_answer: String,
    pub tags: Vec<String>,
}

impl QuestionRecord {
    pub fn new(input: NewQuestion) -> Self {
        let mut record = Self {
            id: Uuid::new_v4(),
            test_name: input.test_name.trim().to_string(),
            section: input.section.trim().to_string(),
            kind: input.kind,
            question: input.question,
            choices: input.choices,
            user_answer: input.user_answer,
            correct_answer: input.correct_answer,
            reviewed: false,
            tags: input.tags,
            added_at: Some(Utc::now()),
        };
        record.normalize();
        record
    }

    /// Re-establishes the record invariants: choices only on multiple-choice
    /// questions, tags trimmed, non-empty and unique.
    pub fn normalize(&mut self) {
        if self.kind == QuestionKind::FillInTheBlank {
            self.choices.clear();
        }
        self.tags = crate::records::sanitize_tags(self.tags.iter().map(String::as_str));
    }

    /// Tags formatted as an editable draft (`"a, b"`).
    pub fn tags_draft(&self) -> String {
        self.tags.join(", ")
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SectionScores {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub math: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub english: Option<u32>,
}

/// A logged test score. Created once, never mutated, deletable by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub id: Uuid,
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub test_name: String,
    pub section: String,
    pub score: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_scores: Option<SectionScores>,
}

#[derive(Debug, Clone)]
pub struct NewScore {
    pub date: NaiveDate,
    pub test_name: String,
    pub section: String,
    pub score: u32,
    pub sub_scores: Option<SectionScores>,
}

impl ScoreRecord {
    pub fn new(input: NewScore) -> Self {
        let section = input.section.trim().to_string();
        // Sub-scores only make sense for a full test
        let sub_scores = if section == FULL_TEST_SECTION {
            input.sub_scores
        } else {
            None
        };
        Self {
            id: Uuid::new_v4(),
            date: input.date,
            test_name: input.test_name.trim().to_string(),
            section,
            score: input.score,
            sub_scores,
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
