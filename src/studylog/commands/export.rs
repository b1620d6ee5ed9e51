use crate::commands::filter::ReviewFilter;
use crate::commands::list::filtered_view;
use crate::commands::{CmdMessage, CmdResult};
use crate::config::StudyConfig;
use crate::error::{Result, StudyError};
use crate::model::QuestionRecord;
use crate::pdf::render_pdf;
use crate::store::backend::StorageBackend;
use crate::store::question_store::QuestionStore;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

pub const CSV_HEADER: [&str; 7] = [
    "Test Name",
    "Section",
    "Question",
    "Your Answer",
    "Correct Answer",
    "Reviewed",
    "Tags",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// Infers the format from a file extension, ignoring case.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(format!("Unknown export format '{}' (expected csv or pdf)", other)),
        }
    }
}

/// `studylog-questions-<date>.<ext>`
pub fn default_file_name(format: ExportFormat, date: NaiveDate) -> String {
    format!(
        "studylog-questions-{}.{}",
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Serializes records as CSV with every field quoted.
///
/// An empty slice produces just the header row.
pub fn to_csv(records: &[QuestionRecord]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for record in records {
        let reviewed = if record.reviewed { "Yes" } else { "No" };
        let tags = record.tags.join(";");
        writer.write_record([
            record.test_name.as_str(),
            record.section.as_str(),
            record.question.as_str(),
            record.user_answer.as_str(),
            record.correct_answer.as_str(),
            reviewed,
            tags.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| StudyError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| StudyError::Export(e.to_string()))
}

pub fn render(
    records: &[QuestionRecord],
    format: ExportFormat,
    config: &StudyConfig,
) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Csv => Ok(to_csv(records)?.into_bytes()),
        ExportFormat::Pdf => Ok(render_pdf(records, &config.pdf_title)),
    }
}

/// Writes the current filtered view to `path`.
///
/// The view is taken in display order (newest first), exactly as `list`
/// shows it with the same filter. The collection itself is never touched.
pub fn run<B: StorageBackend>(
    store: &QuestionStore<B>,
    filter: &ReviewFilter,
    format: ExportFormat,
    path: &Path,
    config: &StudyConfig,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if !config.export_enabled(format) {
        result.add_message(CmdMessage::error(format!(
            "{} export is turned off (see `studylog config export-formats`)",
            format.extension().to_uppercase()
        )));
        return Ok(result);
    }

    let view: Vec<QuestionRecord> = filtered_view(store.records(), filter)
        .into_iter()
        .map(|entry| entry.record)
        .collect();

    let bytes = render(&view, format, config)?;
    fs::write(path, bytes).map_err(StudyError::Io)?;
    info!(path = %path.display(), %format, count = view.len(), "exported questions");

    if view.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No questions to show. Wrote an empty {} to {}",
            format.extension().to_uppercase(),
            path.display()
        )));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Exported {} question(s) to {}",
            view.len(),
            path.display()
        )));
    }
    result.export_path = Some(path.to_path_buf());
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::model::NewQuestion;
    use crate::store::mem_backend::MemBackend;

    fn record(question: &str, tags: &[&str]) -> QuestionRecord {
        QuestionRecord::new(NewQuestion {
            test_name: "Test A".into(),
            section: "Math".into(),
            question: question.into(),
            user_answer: "3".into(),
            correct_answer: "4".into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        })
    }

    #[test]
    fn csv_quotes_every_field() {
        let mut reviewed = record("2 + 2?", &["arith", "easy"]);
        reviewed.reviewed = true;

        let csv = to_csv(&[reviewed]).unwrap();
        let mut lines = csv.lines();
        let header = CSV_HEADER.map(|h| format!("\"{}\"", h)).join(",");
        assert_eq!(lines.next(), Some(header.as_str()));
        assert!(header.starts_with(r#""Test Name","Section","Question","#));
        assert_eq!(
            lines.next(),
            Some(r#""Test A","Math","2 + 2?","3","4","Yes","arith;easy""#)
        );
    }

    #[test]
    fn csv_doubles_embedded_quotes_and_reparses() {
        let tricky = record(r#"He said "go", then left"#, &[]);
        let out = to_csv(&[tricky.clone()]).unwrap();
        assert!(out.contains(r#""He said ""go"", then left""#));

        let mut reader = csv::Reader::from_reader(out.as_bytes());
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[2], tricky.question);
        assert_eq!(&row[5], "No");
        assert_eq!(row.len(), 7);
    }

    #[test]
    fn csv_of_empty_view_is_header_only() {
        let csv = to_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn format_from_name_and_path() {
        assert_eq!("PDF".parse::<ExportFormat>(), Ok(ExportFormat::Pdf));
        assert!("xlsx".parse::<ExportFormat>().is_err());
        assert_eq!(
            ExportFormat::from_path(Path::new("out/review.CSV")),
            Some(ExportFormat::Csv)
        );
        assert_eq!(ExportFormat::from_path(Path::new("review")), None);
    }

    #[test]
    fn default_name_uses_date_and_extension() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(
            default_file_name(ExportFormat::Pdf, date),
            "studylog-questions-2024-05-01.pdf"
        );
    }

    #[test]
    fn run_exports_only_the_filtered_view() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let mut done = record("done", &[]);
        done.reviewed = true;
        let store = QuestionStore::load(MemBackend::with_questions(vec![
            record("open", &[]),
            done,
        ]));
        let before = store.records().to_vec();

        let filter = ReviewFilter {
            only_unreviewed: true,
            ..Default::default()
        };
        let config = StudyConfig::default();
        let result = run(&store, &filter, ExportFormat::Csv, &path, &config).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 2);
        assert!(written.contains("open"));
        assert!(!written.contains("done"));
        assert_eq!(result.export_path.as_deref(), Some(path.as_path()));
        assert_eq!(store.records(), before.as_slice());
    }

    #[test]
    fn run_refuses_disabled_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        let store = QuestionStore::load(MemBackend::new());
        let mut config = StudyConfig::default();
        config.set("export-formats", "csv").unwrap();

        let filter = ReviewFilter::default();
        let result = run(&store, &filter, ExportFormat::Pdf, &path, &config).unwrap();
        assert!(result.has_level(MessageLevel::Error));
        assert!(!path.exists());
    }

    #[test]
    fn run_with_empty_view_still_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.pdf");
        let store = QuestionStore::load(MemBackend::new());

        let result = run(
            &store,
            &ReviewFilter::default(),
            ExportFormat::Pdf,
            &path,
            &StudyConfig::default(),
        )
        .unwrap();
        assert!(fs::read(&path).unwrap().starts_with(b"%PDF"));
        assert!(result.messages[0].content.starts_with("No questions to show."));
    }
}
