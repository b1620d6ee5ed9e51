use crate::error::{Result, StudyError};
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;
use uuid::Uuid;

const COMMENT_PREFIX: char = '#';

/// The editor buffer used for interactive tag editing.
///
/// The buffer holds the draft on its own line under a few `#` comment lines.
/// Reading it back drops comments and joins the remaining lines with commas,
/// so tags may be written one per line as well.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagBuffer {
    pub draft: String,
}

impl TagBuffer {
    pub fn new(draft: impl Into<String>) -> Self {
        Self {
            draft: draft.into(),
        }
    }

    /// Every line of `question` is commented out so none of it reads back as a tag.
    pub fn to_buffer(&self, question: &str) -> String {
        let mut buffer = format!("{}\n\n# Tags for:\n", self.draft);
        for line in question.lines() {
            buffer.push_str(&format!("{} {}\n", COMMENT_PREFIX, line));
        }
        buffer.push_str("#\n");
        buffer.push_str("# Separate tags with commas. Lines starting with '#' are ignored.\n");
        buffer.push_str("# Leave empty to clear all tags.\n");
        buffer
    }

    pub fn from_buffer(buffer: &str) -> Self {
        let draft = buffer
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_PREFIX))
            .collect::<Vec<_>>()
            .join(", ");
        Self { draft }
    }
}

/// Gets the editor command from environment.
/// Checks $EDITOR, then $VISUAL, then falls back to common editors.
pub fn get_editor() -> Result<String> {
    for var in ["EDITOR", "VISUAL"] {
        if let Ok(editor) = env::var(var) {
            if !editor.trim().is_empty() {
                return Ok(editor);
            }
        }
    }

    for fallback in ["vim", "vi", "nano"] {
        if Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok(fallback.to_string());
        }
    }

    Err(StudyError::Api(
        "No editor found. Set $EDITOR environment variable.".to_string(),
    ))
}

/// Opens a file in the user's editor and waits for it to close.
/// Returns the contents of the file after editing.
///
/// `$EDITOR` may carry arguments (`code --wait`); they are split on whitespace.
pub fn open_in_editor<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let editor = get_editor()?;
    let path = file_path.as_ref();

    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| StudyError::Api("Editor command is empty".to_string()))?;

    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| StudyError::Api(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(StudyError::Api(format!(
            "Editor '{}' exited with non-zero status",
            editor
        )));
    }

    fs::read_to_string(path).map_err(StudyError::Io)
}

/// Opens the editor on a tag draft and returns the edited draft.
pub fn edit_tags(initial: &TagBuffer, question: &str) -> Result<TagBuffer> {
    let temp_file = env::temp_dir().join(format!("studylog-tags-{}.txt", Uuid::new_v4()));
    fs::write(&temp_file, initial.to_buffer(question)).map_err(StudyError::Io)?;

    let result = open_in_editor(&temp_file);
    let _ = fs::remove_file(&temp_file);

    Ok(TagBuffer::from_buffer(&result?))
}
