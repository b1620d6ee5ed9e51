use crate::commands::facets::Facets;
use crate::config::StudyConfig;
use crate::index::DisplayRecord;
use crate::model::{QuestionRecord, ScoreRecord};
use std::path::PathBuf;

pub mod add;
pub mod config;
pub mod export;
pub mod facets;
pub mod filter;
pub mod helpers;
pub mod list;
pub mod review;
pub mod scores;
pub mod tagging;
pub mod view;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Everything a command produced. Never printed from inside the library.
#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_records: Vec<QuestionRecord>,
    pub listed_records: Vec<DisplayRecord>,
    pub facets: Option<Facets>,
    pub scores: Vec<ScoreRecord>,
    pub config: Option<StudyConfig>,
    pub export_path: Option<PathBuf>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_records(mut self, records: Vec<DisplayRecord>) -> Self {
        self.listed_records = records;
        self
    }

    pub fn with_facets(mut self, facets: Facets) -> Self {
        self.facets = Some(facets);
        self
    }

    pub fn with_scores(mut self, scores: Vec<ScoreRecord>) -> Self {
        self.scores = scores;
        self
    }

    pub fn with_config(mut self, config: StudyConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_level(&self, level: MessageLevel) -> bool {
        self.messages.iter().any(|m| m.level == level)
    }
}
