use crate::api::StudyApi;
use crate::config::StudyConfig;
use crate::error::{Result, StudyError};
use crate::store::fs_backend::FsBackend;
use directories::ProjectDirs;
use std::env;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Overrides the platform data directory.
pub const DATA_DIR_ENV: &str = "STUDYLOG_HOME";

pub struct StudyContext {
    pub api: StudyApi<FsBackend>,
    pub config: StudyConfig,
}

/// Picks the data directory: explicit flag, then `$STUDYLOG_HOME`, then the
/// platform data dir.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    if let Ok(dir) = env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    ProjectDirs::from("com", "studylog", "studylog")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| StudyError::Config("Could not determine data directory".to_string()))
}

pub fn initialize(data_dir: Option<PathBuf>) -> Result<StudyContext> {
    let data_dir = resolve_data_dir(data_dir)?;
    debug!(data_dir = %data_dir.display(), "initializing");

    let config = StudyConfig::load(&data_dir).unwrap_or_else(|e| {
        warn!(error = %e, "could not read config, using defaults");
        StudyConfig::default()
    });

    let backend = FsBackend::new(data_dir.clone());
    let api = StudyApi::new(backend, data_dir);

    Ok(StudyContext { api, config })
}
