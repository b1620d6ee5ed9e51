//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It serves as the single
//! entry point for all studylog operations, regardless of the UI being used.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns** the [`QuestionStore`] for the session
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (e.g., parsing index ranges and id prefixes into selectors)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **I/O operations**: No stdout, stderr, or terminal formatting
//!
//! ## Generic Over StorageBackend
//!
//! `StudyApi<B: StorageBackend>` is generic over the storage backend:
//! - Production: `StudyApi<FsBackend>`
//! - Testing: `StudyApi<MemBackend>`

use crate::commands;
use crate::commands::export::ExportFormat;
use crate::commands::filter::ReviewFilter;
use crate::config::StudyConfig;
use crate::error::{Result, StudyError};
use crate::index::{self, RecordSelector};
use crate::model::{NewQuestion, NewScore, QuestionRecord};
use crate::store::backend::StorageBackend;
use crate::store::question_store::{QuestionStore, TagEdit};
use std::path::{Path, PathBuf};

/// The main API facade for studylog operations.
pub struct StudyApi<B: StorageBackend> {
    store: QuestionStore<B>,
    data_dir: PathBuf,
}

impl<B: StorageBackend> StudyApi<B> {
    /// Loads the question collection from `backend`. Never fails.
    pub fn new(backend: B, data_dir: PathBuf) -> Self {
        Self {
            store: QuestionStore::load(backend),
            data_dir,
        }
    }

    pub fn records(&self) -> &[QuestionRecord] {
        self.store.records()
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn add_question(&mut self, input: NewQuestion) -> Result<commands::CmdResult> {
        commands::add::run(&mut self.store, input)
    }

    pub fn list(&self, filter: &ReviewFilter) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, filter)
    }

    pub fn view<I: AsRef<str>>(&self, inputs: &[I]) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(inputs)?;
        commands::view::run(&self.store, &selectors)
    }

    pub fn mark_reviewed<I: AsRef<str>>(
        &mut self,
        inputs: &[I],
        reviewed: bool,
    ) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(inputs)?;
        commands::review::mark(&mut self.store, &selectors, reviewed)
    }

    pub fn toggle_reviewed<I: AsRef<str>>(&mut self, inputs: &[I]) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(inputs)?;
        commands::review::toggle(&mut self.store, &selectors)
    }

    /// Replaces the tags of one record. `input` must not be a range.
    pub fn set_tags(&mut self, input: &str, raw: &str) -> Result<commands::CmdResult> {
        let selector = parse_single_selector(input)?;
        commands::tagging::set(&mut self.store, std::slice::from_ref(&selector), raw)
    }

    pub fn begin_tag_edit(&mut self, input: &str) -> Result<commands::CmdResult> {
        let selector = parse_single_selector(input)?;
        commands::tagging::begin_edit(&mut self.store, &selector)
    }

    pub fn tag_edit(&self) -> Option<&TagEdit> {
        self.store.editing()
    }

    pub fn commit_tag_edit(&mut self, draft: Option<String>) -> Result<commands::CmdResult> {
        commands::tagging::commit_edit(&mut self.store, draft)
    }

    pub fn cancel_tag_edit(&mut self) -> Result<commands::CmdResult> {
        commands::tagging::cancel_edit(&mut self.store)
    }

    pub fn facets(&self) -> Result<commands::CmdResult> {
        commands::facets::run(&self.store)
    }

    pub fn export(
        &self,
        filter: &ReviewFilter,
        format: ExportFormat,
        path: &Path,
        config: &StudyConfig,
    ) -> Result<commands::CmdResult> {
        commands::export::run(&self.store, filter, format, path, config)
    }

    pub fn add_score(&self, input: NewScore) -> Result<commands::CmdResult> {
        commands::scores::add(self.store.backend(), input)
    }

    pub fn list_scores(&self) -> Result<commands::CmdResult> {
        commands::scores::list(self.store.backend())
    }

    pub fn delete_score(&self, id_prefix: &str) -> Result<commands::CmdResult> {
        commands::scores::delete(self.store.backend(), id_prefix)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.data_dir, action)
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.store.has_unsaved_changes()
    }

    /// Retries a failed write. Adds a warning when it fails again.
    pub fn flush(&mut self) -> commands::CmdResult {
        let persisted = self.store.flush();
        let mut result = commands::CmdResult::default();
        commands::helpers::report_persisted(&mut result, &persisted);
        result
    }
}

fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<RecordSelector>> {
    index::parse_selectors(inputs).map_err(StudyError::Api)
}

fn parse_single_selector(input: &str) -> Result<RecordSelector> {
    index::parse_single_selector(input).map_err(StudyError::Api)
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel};
