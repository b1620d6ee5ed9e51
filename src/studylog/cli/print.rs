use chrono::{DateTime, Utc};
use colored::Colorize;
use studylog::api::{CmdMessage, MessageLevel};
use studylog::commands::facets::Facets;
use studylog::config::StudyConfig;
use studylog::index::DisplayRecord;
use studylog::model::{QuestionKind, ScoreRecord};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const REVIEWED_MARKER: &str = "✓";
pub(super) const EMPTY_LIST: &str = "No questions to show.";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_records(records: &[DisplayRecord]) {
    if records.is_empty() {
        println!("{}", EMPTY_LIST);
        return;
    }

    for dr in records {
        let record = &dr.record;
        let idx_str = format!("{:>3}. ", dr.index);
        let section = format!("[{}] ", record.section);

        let right_suffix = if record.reviewed {
            format!(" {} ", REVIEWED_MARKER)
        } else {
            "   ".to_string()
        };

        let tags = if record.tags.is_empty() {
            String::new()
        } else {
            format!(" #{}", record.tags.join(" #"))
        };

        let time_ago = record
            .added_at
            .map(format_time_ago)
            .unwrap_or_else(|| " ".repeat(TIME_WIDTH));

        let question: String = record
            .question
            .chars()
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();

        let fixed_width = idx_str.width() + section.width() + right_suffix.width() + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let body = truncate_to_width(&format!("{}{}", question, tags), available);
        let padding = available.saturating_sub(body.width());

        let idx_colored = if record.reviewed {
            idx_str.dimmed()
        } else {
            idx_str.yellow()
        };

        println!(
            "{}{}{}{}{}{}",
            idx_colored,
            section.cyan(),
            body,
            " ".repeat(padding),
            right_suffix.green(),
            time_ago.dimmed()
        );
    }
}

pub(super) fn print_full_records(records: &[DisplayRecord]) {
    for (i, dr) in records.iter().enumerate() {
        if i > 0 {
            println!("\n================================\n");
        }
        let record = &dr.record;
        let heading = if record.test_name.is_empty() {
            record.section.clone()
        } else {
            format!("{} / {}", record.test_name, record.section)
        };
        println!("{} {}", dr.index.to_string().yellow(), heading.bold());
        println!("--------------------------------");
        println!("{}", record.question);

        if record.kind == QuestionKind::MultipleChoice && !record.choices.is_empty() {
            println!();
            for (n, choice) in record.choices.iter().enumerate() {
                println!("  {}. {}", choice_label(n), choice);
            }
        }

        println!();
        println!("Your answer:    {}", record.user_answer.red());
        println!("Correct answer: {}", record.correct_answer.green());
        println!(
            "Reviewed:       {}",
            if record.reviewed { "yes" } else { "no" }
        );
        if !record.tags.is_empty() {
            println!("Tags:           {}", record.tags.join(", "));
        }
        println!("{}", format!("id {}", record.id).dimmed());
    }
}

pub(super) fn print_facets(facets: &Facets) {
    print_facet("Tags", facets.tags.iter());
    print_facet("Tests", facets.test_names.iter());
    print_facet("Sections", facets.sections.iter());
}

fn print_facet<'a>(label: &str, values: impl Iterator<Item = &'a String>) {
    let values: Vec<_> = values.map(String::as_str).collect();
    if values.is_empty() {
        println!("{}: {}", label.bold(), "(none)".dimmed());
    } else {
        println!("{}: {}", label.bold(), values.join(", "));
    }
}

pub(super) fn print_scores(scores: &[ScoreRecord]) {
    if scores.is_empty() {
        println!("No scores logged.");
        return;
    }

    for score in scores {
        let short_id: String = score.id.to_string().chars().take(8).collect();
        let mut line = format!(
            "{}  {:<12} {:<28} {:>5}",
            score.date,
            truncate_to_width(&score.section, 12),
            truncate_to_width(&score.test_name, 28),
            score.score
        );
        if let Some(sub) = &score.sub_scores {
            if let Some(math) = sub.math {
                line.push_str(&format!("  math {}", math));
            }
            if let Some(english) = sub.english {
                line.push_str(&format!("  english {}", english));
            }
        }
        println!("{}  {}", line, short_id.dimmed());
    }
}

pub(super) fn print_config(config: &StudyConfig) {
    for key in StudyConfig::KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
}

fn choice_label(n: usize) -> String {
    // A..Z, then numbers for the unlikely overflow
    if n < 26 {
        char::from(b'A' + n as u8).to_string()
    } else {
        (n + 1).to_string()
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    if s.width() <= max_width {
        return s.to_string();
    }

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(timestamp);

    let formatter = Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_not_truncated() {
        assert_eq!(truncate_to_width("abc", 10), "abc");
    }

    #[test]
    fn long_text_ends_with_ellipsis() {
        let out = truncate_to_width("abcdefghij", 5);
        assert_eq!(out, "abcd…");
        assert_eq!(out.width(), 5);
    }

    #[test]
    fn choice_labels() {
        assert_eq!(choice_label(0), "A");
        assert_eq!(choice_label(3), "D");
        assert_eq!(choice_label(26), "27");
    }

    #[test]
    fn time_ago_is_right_aligned() {
        let s = format_time_ago(Utc::now());
        assert_eq!(s.len(), TIME_WIDTH);
    }
}
