//! Print-style PDF rendering of a question list.
//!
//! Pages are A4 with the standard Helvetica fonts, so no font data is
//! embedded. Those fonts only cover the standard encoding, so anything
//! outside printable ASCII is written as `?`.

use crate::model::{QuestionKind, QuestionRecord};
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 50.0;
const TITLE_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 10.0;
const LINE_HEIGHT: f32 = 14.0;
const WRAP_COLUMNS: usize = 90;

pub const EMPTY_VIEW_TEXT: &str = "No questions to show.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Title,
    Heading,
    Body,
}

#[derive(Debug, Clone, PartialEq)]
struct PlacedLine {
    text: String,
    style: Style,
    indent: f32,
    y: f32,
}

/// Renders `records` in the given order, one block per question.
pub fn render_pdf(records: &[QuestionRecord], title: &str) -> Vec<u8> {
    let pages = layout(records, title);

    let mut next_id = 1;
    let mut alloc = || {
        let id = Ref::new(next_id);
        next_id += 1;
        id
    };
    let catalog_id = alloc();
    let tree_id = alloc();
    let regular_id = alloc();
    let bold_id = alloc();
    let page_ids: Vec<(Ref, Ref)> = pages.iter().map(|_| (alloc(), alloc())).collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(tree_id);
    pdf.pages(tree_id)
        .kids(page_ids.iter().map(|(page, _)| *page))
        .count(page_ids.len() as i32);
    pdf.type1_font(regular_id).base_font(Name(b"Helvetica"));
    pdf.type1_font(bold_id).base_font(Name(b"Helvetica-Bold"));

    for (lines, (page_id, content_id)) in pages.iter().zip(page_ids.iter().copied()) {
        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT));
        page.parent(tree_id);
        page.contents(content_id);
        page.resources()
            .fonts()
            .pair(Name(b"F1"), regular_id)
            .pair(Name(b"F2"), bold_id);
        page.finish();

        let mut content = Content::new();
        for line in lines {
            let (font, size) = match line.style {
                Style::Title => (Name(b"F2"), TITLE_SIZE),
                Style::Heading => (Name(b"F2"), BODY_SIZE),
                Style::Body => (Name(b"F1"), BODY_SIZE),
            };
            content.begin_text();
            content.set_font(font, size);
            content.next_line(MARGIN + line.indent, line.y);
            content.show(Str(line.text.as_bytes()));
            content.end_text();
        }
        pdf.stream(content_id, &content.finish());
    }

    pdf.finish()
}

/// Splits the document into pages of positioned lines.
fn layout(records: &[QuestionRecord], title: &str) -> Vec<Vec<PlacedLine>> {
    let mut pages: Vec<Vec<PlacedLine>> = vec![Vec::new()];
    let mut y = PAGE_HEIGHT - MARGIN;

    let mut place = |text: String, style: Style, indent: f32| {
        if y < MARGIN {
            pages.push(Vec::new());
            y = PAGE_HEIGHT - MARGIN;
        }
        if let Some(page) = pages.last_mut() {
            page.push(PlacedLine {
                text,
                style,
                indent,
                y,
            });
        }
        y -= if style == Style::Title {
            LINE_HEIGHT * 2.0
        } else {
            LINE_HEIGHT
        };
    };

    place(ascii(title), Style::Title, 0.0);

    if records.is_empty() {
        place(EMPTY_VIEW_TEXT.to_string(), Style::Body, 0.0);
    }

    for (n, record) in records.iter().enumerate() {
        let mut heading = format!("{}. {}", n + 1, record.section);
        if !record.test_name.is_empty() {
            heading.push_str(&format!(" - {}", record.test_name));
        }
        place(ascii(&heading), Style::Heading, 0.0);

        for line in wrap(&record.question, WRAP_COLUMNS) {
            place(line, Style::Body, 0.0);
        }
        if record.kind == QuestionKind::MultipleChoice {
            for (label, choice) in ('A'..='Z').zip(record.choices.iter()) {
                for line in wrap(&format!("{}. {}", label, choice), WRAP_COLUMNS - 4) {
                    place(line, Style::Body, 16.0);
                }
            }
        }
        for line in wrap(&format!("Your answer: {}", record.user_answer), WRAP_COLUMNS) {
            place(line, Style::Body, 0.0);
        }
        for line in wrap(&format!("Correct answer: {}", record.correct_answer), WRAP_COLUMNS) {
            place(line, Style::Body, 0.0);
        }

        let mut status = format!("Reviewed: {}", if record.reviewed { "Yes" } else { "No" });
        if !record.tags.is_empty() {
            status.push_str(&format!("    Tags: {}", record.tags.join(", ")));
        }
        for line in wrap(&status, WRAP_COLUMNS) {
            place(line, Style::Body, 0.0);
        }
        place(String::new(), Style::Body, 0.0);
    }

    pages
}

/// Greedy word wrap. Words longer than a line are split.
fn wrap(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in ascii(text).lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let mut word = word.to_string();
            while word.len() > columns {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let rest = word.split_off(columns);
                lines.push(word);
                word = rest;
            }
            if current.is_empty() {
                current = word;
            } else if current.len() + 1 + word.len() <= columns {
                current.push(' ');
                current.push_str(&word);
            } else {
                lines.push(std::mem::replace(&mut current, word));
            }
        }
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn ascii(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\t' | '\r' => ' ',
            '\n' => '\n',
            ' '..='~' => c,
            _ => '?',
        })
        .collect()
}
