use crate::commands::export::ExportFormat;
use crate::error::{Result, StudyError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_PDF_TITLE: &str = "Review Questions";

/// Settings stored in `<data dir>/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct StudyConfig {
    /// Export formats that are switched on.
    #[serde(default = "default_export_formats")]
    pub export_formats: Vec<ExportFormat>,

    /// Heading printed on the first page of PDF exports.
    #[serde(default = "default_pdf_title")]
    pub pdf_title: String,

    /// Default for the unreviewed-only filter in `list` and `export`.
    #[serde(default)]
    pub only_unreviewed: bool,
}

fn default_export_formats() -> Vec<ExportFormat> {
    vec![ExportFormat::Csv, ExportFormat::Pdf]
}

fn default_pdf_title() -> String {
    DEFAULT_PDF_TITLE.to_string()
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            export_formats: default_export_formats(),
            pdf_title: default_pdf_title(),
            only_unreviewed: false,
        }
    }
}

impl StudyConfig {
    pub const KEYS: [&'static str; 3] = ["export-formats", "pdf-title", "only-unreviewed"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let path = dir.as_ref().join(CONFIG_FILENAME);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(StudyError::Io)?;
        let config: StudyConfig =
            serde_json::from_str(&content).map_err(StudyError::Serialization)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(StudyError::Io)?;
        }

        let content = serde_json::to_string_pretty(self).map_err(StudyError::Serialization)?;
        fs::write(dir.join(CONFIG_FILENAME), content).map_err(StudyError::Io)?;
        Ok(())
    }

    pub fn export_enabled(&self, format: ExportFormat) -> bool {
        self.export_formats.contains(&format)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "export-formats" => Some(
                self.export_formats
                    .iter()
                    .map(ExportFormat::to_string)
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            "pdf-title" => Some(self.pdf_title.clone()),
            "only-unreviewed" => Some(self.only_unreviewed.to_string()),
            _ => None,
        }
    }

    /// Validates and applies one setting. The error is a user-facing message.
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "export-formats" => {
                let mut formats = Vec::new();
                for piece in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                    let format: ExportFormat = piece.parse()?;
                    if !formats.contains(&format) {
                        formats.push(format);
                    }
                }
                self.export_formats = formats;
                Ok(())
            }
            "pdf-title" => {
                let title = value.trim();
                if title.is_empty() {
                    return Err("pdf-title cannot be empty".to_string());
                }
                self.pdf_title = title.to_string();
                Ok(())
            }
            "only-unreviewed" => {
                self.only_unreviewed = match value.trim().to_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    other => return Err(format!("Expected true or false, got '{}'", other)),
                };
                Ok(())
            }
            _ => Err(format!("Unknown config key: {}", key)),
        }
    }
}
