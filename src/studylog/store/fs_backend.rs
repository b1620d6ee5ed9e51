use super::backend::StorageBackend;
use crate::error::{Result, StudyError};
use crate::model::{QuestionRecord, ScoreRecord};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

pub const QUESTIONS_FILE: &str = "questions.json";
pub const SCORES_FILE: &str = "scores.json";

/// JSON-file storage rooted at a data directory.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(StudyError::Io)?;
        }
        Ok(())
    }

    fn read_list<T: DeserializeOwned>(&self, file_name: &str) -> Result<Vec<T>> {
        let path = self.root.join(file_name);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path).map_err(StudyError::Io)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let items: Vec<T> = serde_json::from_str(&content).map_err(StudyError::Serialization)?;
        debug!(path = %path.display(), count = items.len(), "read records");
        Ok(items)
    }

    fn write_list<T: Serialize>(&self, file_name: &str, items: &[T]) -> Result<()> {
        self.ensure_dir()?;

        let path = self.root.join(file_name);
        let content = serde_json::to_string_pretty(items).map_err(StudyError::Serialization)?;

        // Atomic write: temp file then rename over the target
        let tmp_file = self.root.join(format!(".{}-{}.tmp", file_name, Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(StudyError::Io)?;
        fs::rename(&tmp_file, &path).map_err(StudyError::Io)?;

        debug!(path = %path.display(), count = items.len(), "wrote records");
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn read_question_records(&self) -> Result<Vec<QuestionRecord>> {
        self.read_list(QUESTIONS_FILE)
    }

    fn write_question_records(&self, records: &[QuestionRecord]) -> Result<()> {
        self.write_list(QUESTIONS_FILE, records)
    }

    fn read_score_records(&self) -> Result<Vec<ScoreRecord>> {
        self.read_list(SCORES_FILE)
    }

    fn write_score_records(&self, records: &[ScoreRecord]) -> Result<()> {
        self.write_list(SCORES_FILE, records)
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}
