use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "studylog",
    bin_name = "studylog",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Track test scores and review missed questions", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $STUDYLOG_HOME, then the platform data dir)
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

/// Command group definitions for help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Core,
    Question,
    Score,
    Misc,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Core => "Core Commands:",
            CommandGroup::Question => "Per-Question Commands:",
            CommandGroup::Score => "Score Commands:",
            CommandGroup::Misc => "Miscellaneous:",
        }
    }

    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "add" | "list" | "facets" | "export" => Some(CommandGroup::Core),
            "view" | "review" | "unreview" | "toggle" | "tag" => Some(CommandGroup::Question),
            "score" => Some(CommandGroup::Score),
            "config" | "help" => Some(CommandGroup::Misc),
            _ => None,
        }
    }

    pub fn all() -> &'static [CommandGroup] {
        &[
            CommandGroup::Core,
            CommandGroup::Question,
            CommandGroup::Score,
            CommandGroup::Misc,
        ]
    }
}

/// Returns the custom grouped help output as a string
pub fn get_grouped_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");

    let mut output = String::new();
    output.push_str(&format!("studylog {version}\n"));
    output.push_str("Track test scores and review missed questions\n");
    output.push('\n');
    output.push_str("Usage: studylog [OPTIONS] [COMMAND]\n");

    let subcommands: Vec<_> = cmd.get_subcommands().collect();
    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| {
                !sc.is_hide_set() && CommandGroup::for_command(sc.get_name()) == Some(*group)
            })
            .collect();

        if !group_cmds.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", group.heading()));
            for sc in group_cmds {
                let name = sc.get_name();
                let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
                output.push_str(&format!("  {:<12} {}\n", name, about));
            }
        }
    }

    output.push('\n');
    output.push_str("Options:\n");
    output.push_str("      --data-dir <PATH>  Data directory\n");
    output.push_str("  -v, --verbose          Verbose output\n");
    output.push_str("  -h, --help             Print help\n");
    output.push_str("  -V, --version          Print version\n");

    output
}

pub fn print_grouped_help() {
    print!("{}", get_grouped_help());
}

/// Prints help for a command by name
pub fn print_help_for_command(name: &str) {
    let mut cmd = Cli::command();
    for subcmd in cmd.get_subcommands_mut() {
        if subcmd.get_name() == name {
            print!("{}", subcmd.render_help());
            return;
        }
    }

    eprintln!("Unknown command: {}", name);
    eprintln!();
    print_grouped_help();
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Core(CoreCommands),

    #[command(flatten)]
    Question(QuestionCommands),

    #[command(flatten)]
    Score(ScoreGroup),

    #[command(flatten)]
    Misc(MiscCommands),
}

/// Filters shared by `list` and `export`
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Only questions not yet reviewed
    #[arg(short, long)]
    pub unreviewed: bool,

    /// Include reviewed questions even when `only-unreviewed` is set
    #[arg(long, conflicts_with = "unreviewed")]
    pub all: bool,

    /// Only questions with this tag (exact match)
    #[arg(long)]
    pub tag: Option<String>,

    /// Only questions from this test
    #[arg(long = "test", value_name = "TEST_NAME")]
    pub test_name: Option<String>,

    /// Only questions from this section
    #[arg(long)]
    pub section: Option<String>,

    /// Search question text and choices (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum CoreCommands {
    /// Add a missed question
    #[command(alias = "n", display_order = 1)]
    Add {
        /// Question text
        question: String,

        /// Subject area (e.g. Math, Reading, Writing)
        #[arg(short, long)]
        section: String,

        /// Test the question came from
        #[arg(short = 't', long = "test", value_name = "TEST_NAME")]
        test_name: Option<String>,

        /// Question type: mc or fill
        #[arg(long = "type", value_name = "TYPE", default_value = "mc")]
        kind: String,

        /// Answer choice, in order (repeat for each choice)
        #[arg(short, long = "choice", value_name = "CHOICE")]
        choices: Vec<String>,

        /// The answer you gave
        #[arg(short = 'a', long = "answer", default_value = "")]
        user_answer: String,

        /// The correct answer
        #[arg(short = 'k', long = "correct", default_value = "")]
        correct_answer: String,

        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },

    /// List questions, newest first
    #[command(alias = "ls", display_order = 2)]
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show the tags, tests and sections in use
    #[command(display_order = 3)]
    Facets,

    /// Export the filtered question list to CSV or PDF
    #[command(display_order = 4)]
    Export {
        #[command(flatten)]
        filter: FilterArgs,

        /// Output file (defaults to studylog-questions-<date>.<ext>)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// csv or pdf (defaults to the output extension, then csv)
        #[arg(short, long)]
        format: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum QuestionCommands {
    /// Show questions in full
    #[command(alias = "v", display_order = 10)]
    View {
        /// Indexes, ranges or id prefixes (e.g. 1 3-5 6f1c id:1234)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Mark questions as reviewed
    #[command(alias = "r", display_order = 11)]
    Review {
        /// Indexes, ranges or id prefixes (e.g. 1 3-5 6f1c id:1234)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Mark questions as not reviewed
    #[command(display_order = 12)]
    Unreview {
        /// Indexes, ranges or id prefixes (e.g. 1 3-5 6f1c id:1234)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Flip the reviewed flag
    #[command(alias = "t", display_order = 13)]
    Toggle {
        /// Indexes, ranges or id prefixes (e.g. 1 3-5 6f1c id:1234)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Set tags, or edit them in $EDITOR when no tags are given
    #[command(display_order = 14)]
    Tag {
        /// Index or id prefix (write id:1234 for a prefix of digits)
        index: String,

        /// Comma-separated tags ("" clears)
        tags: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ScoreGroup {
    /// Log, list and delete test scores
    #[command(display_order = 20)]
    Score {
        #[command(subcommand)]
        action: ScoreCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ScoreCommands {
    /// Log a score
    Add {
        /// Numeric score
        score: u32,

        /// Section (Math, Reading, Writing, Full Test)
        #[arg(short, long, default_value = "Full Test")]
        section: String,

        /// Date taken, YYYY-MM-DD (defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Test name
        #[arg(short = 't', long = "test", value_name = "TEST_NAME")]
        test_name: Option<String>,

        /// Math sub-score (full tests only)
        #[arg(long)]
        math: Option<u32>,

        /// English sub-score (full tests only)
        #[arg(long)]
        english: Option<u32>,
    },

    /// List scores, newest first
    #[command(alias = "ls")]
    List,

    /// Delete a score by id prefix
    #[command(alias = "rm")]
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Get or set configuration
    #[command(display_order = 30)]
    Config {
        /// Configuration key (export-formats, pdf-title, only-unreviewed)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Print help for studylog or a subcommand
    #[command(display_order = 31)]
    Help {
        /// Subcommand to get help for
        command: Option<String>,
    },
}
