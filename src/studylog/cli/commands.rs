use super::print::{
    print_config, print_facets, print_full_records, print_messages, print_records, print_scores,
};
use super::setup::{
    print_grouped_help, print_help_for_command, Cli, Commands, CoreCommands, FilterArgs,
    MiscCommands, QuestionCommands, ScoreCommands, ScoreGroup,
};
use chrono::{Local, NaiveDate};
use clap::Parser;
use std::path::PathBuf;
use studylog::api::{CmdResult, ConfigAction, StudyApi};
use studylog::commands::export::{default_file_name, ExportFormat};
use studylog::commands::filter::ReviewFilter;
use studylog::config::StudyConfig;
use studylog::editor::{edit_tags, TagBuffer};
use studylog::error::{Result, StudyError};
use studylog::init::{initialize, StudyContext};
use studylog::model::{NewQuestion, NewScore, QuestionKind, SectionScores};
use studylog::records::parse_tags;
use studylog::store::fs_backend::FsBackend;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let command = match cli.command {
        Some(Commands::Misc(MiscCommands::Help { command })) => {
            match command {
                Some(name) => print_help_for_command(&name),
                None => print_grouped_help(),
            }
            return Ok(());
        }
        Some(command) => command,
        None => Commands::Core(CoreCommands::List {
            filter: FilterArgs::default(),
        }),
    };

    let StudyContext { mut api, config } = initialize(cli.data_dir)?;
    debug!(records = api.records().len(), "loaded questions");

    match command {
        Commands::Core(cmd) => match cmd {
            CoreCommands::Add {
                question,
                section,
                test_name,
                kind,
                choices,
                user_answer,
                correct_answer,
                tags,
            } => handle_add(
                &mut api,
                NewQuestion {
                    test_name: test_name.unwrap_or_default(),
                    section,
                    kind: kind.parse::<QuestionKind>().map_err(StudyError::Api)?,
                    question,
                    choices,
                    user_answer,
                    correct_answer,
                    tags: tags.as_deref().map(parse_tags).unwrap_or_default(),
                },
            ),
            CoreCommands::List { filter } => handle_list(&api, &filter, &config),
            CoreCommands::Facets => handle_facets(&api),
            CoreCommands::Export {
                filter,
                output,
                format,
            } => handle_export(&api, &filter, output, format, &config),
        },
        Commands::Question(cmd) => match cmd {
            QuestionCommands::View { indexes } => handle_view(&api, &indexes),
            QuestionCommands::Review { indexes } => {
                handle_result(api.mark_reviewed(&indexes, true)?)
            }
            QuestionCommands::Unreview { indexes } => {
                handle_result(api.mark_reviewed(&indexes, false)?)
            }
            QuestionCommands::Toggle { indexes } => handle_result(api.toggle_reviewed(&indexes)?),
            QuestionCommands::Tag { index, tags } => handle_tag(&mut api, &index, tags),
        },
        Commands::Score(ScoreGroup::Score { action }) => handle_score(&api, action),
        Commands::Misc(cmd) => match cmd {
            MiscCommands::Config { key, value } => handle_config(&api, key, value),
            MiscCommands::Help { .. } => Ok(()),
        },
    }?;

    if api.has_unsaved_changes() {
        let result = api.flush();
        print_messages(&result.messages);
    }

    Ok(())
}

/// Logs go to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .try_init();
}

fn handle_result(result: CmdResult) -> Result<()> {
    print_messages(&result.messages);
    Ok(())
}

fn handle_add(api: &mut StudyApi<FsBackend>, input: NewQuestion) -> Result<()> {
    handle_result(api.add_question(input)?)
}

/// `--all` beats the configured default; `--unreviewed` turns the filter on.
fn review_filter(args: &FilterArgs, config: &StudyConfig) -> ReviewFilter {
    ReviewFilter {
        only_unreviewed: !args.all && (args.unreviewed || config.only_unreviewed),
        tag: args.tag.clone(),
        test_name: args.test_name.clone(),
        section: args.section.clone(),
        search_term: args.search.clone(),
    }
}

fn handle_list(api: &StudyApi<FsBackend>, args: &FilterArgs, config: &StudyConfig) -> Result<()> {
    let result = api.list(&review_filter(args, config))?;
    print_records(&result.listed_records);
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(api: &StudyApi<FsBackend>, indexes: &[String]) -> Result<()> {
    let result = api.view(indexes)?;
    print_full_records(&result.listed_records);
    print_messages(&result.messages);
    Ok(())
}

fn handle_facets(api: &StudyApi<FsBackend>) -> Result<()> {
    let result = api.facets()?;
    if let Some(facets) = &result.facets {
        print_facets(facets);
    }
    print_messages(&result.messages);
    Ok(())
}

fn resolve_export_format(format: Option<String>, output: Option<&PathBuf>) -> Result<ExportFormat> {
    match format {
        Some(f) => f.parse::<ExportFormat>().map_err(StudyError::Api),
        None => Ok(output
            .and_then(|p| ExportFormat::from_path(p.as_path()))
            .unwrap_or(ExportFormat::Csv)),
    }
}

fn handle_export(
    api: &StudyApi<FsBackend>,
    args: &FilterArgs,
    output: Option<PathBuf>,
    format: Option<String>,
    config: &StudyConfig,
) -> Result<()> {
    let format = resolve_export_format(format, output.as_ref())?;
    let path = output
        .unwrap_or_else(|| PathBuf::from(default_file_name(format, Local::now().date_naive())));
    let result = api.export(&review_filter(args, config), format, &path, config)?;
    print_messages(&result.messages);
    Ok(())
}

/// With tags: replace them. Without: edit the current tags in `$EDITOR`.
fn handle_tag(api: &mut StudyApi<FsBackend>, index: &str, tags: Option<String>) -> Result<()> {
    if let Some(raw) = tags {
        return handle_result(api.set_tags(index, &raw)?);
    }

    let begun = api.begin_tag_edit(index)?;
    print_messages(&begun.messages);
    let Some(target) = begun.listed_records.first() else {
        return Ok(());
    };
    let Some(draft) = api.tag_edit().map(|edit| edit.draft.clone()) else {
        return Ok(());
    };

    match edit_tags(&TagBuffer::new(draft), &target.record.question) {
        Ok(edited) => handle_result(api.commit_tag_edit(Some(edited.draft))?),
        Err(e) => {
            api.cancel_tag_edit()?;
            Err(e)
        }
    }
}

fn parse_date(raw: Option<String>) -> Result<NaiveDate> {
    match raw {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|e| {
            StudyError::Api(format!(
                "Invalid date '{}': {} (expected YYYY-MM-DD)",
                s, e
            ))
        }),
        None => Ok(Local::now().date_naive()),
    }
}

fn handle_score(api: &StudyApi<FsBackend>, action: ScoreCommands) -> Result<()> {
    match action {
        ScoreCommands::Add {
            score,
            section,
            date,
            test_name,
            math,
            english,
        } => {
            let sub_scores = if math.is_some() || english.is_some() {
                Some(SectionScores { math, english })
            } else {
                None
            };
            let result = api.add_score(NewScore {
                date: parse_date(date)?,
                test_name: test_name.unwrap_or_default(),
                section,
                score,
                sub_scores,
            })?;
            handle_result(result)
        }
        ScoreCommands::List => {
            let result = api.list_scores()?;
            print_scores(&result.scores);
            print_messages(&result.messages);
            Ok(())
        }
        ScoreCommands::Delete { id } => handle_result(api.delete_score(&id)?),
    }
}

fn handle_config(
    api: &StudyApi<FsBackend>,
    key: Option<String>,
    value: Option<String>,
) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = api.config(action)?;
    if let Some(config) = &result.config {
        if result.messages.is_empty() {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}
