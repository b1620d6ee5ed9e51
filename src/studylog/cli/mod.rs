//! # CLI Layer
//!
//! This module is **one possible UI client** for studylog. It is not the application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs the tracing subscriber
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: Convert shell arguments into typed commands via clap
//! 2. **Context Setup**: Resolve the data directory and load the config via `init::initialize`
//! 3. **API Dispatch**: Call the appropriate `StudyApi` method
//! 4. **Output Formatting**: Convert `CmdResult` into terminal output
//! 5. **Flushing**: Retry a failed save before exiting
//!
//! ## Structure
//!
//! - `setup`: clap definitions and grouped help
//! - `commands`: `run()` and the per-command `handle_*()` functions
//! - `print`: `print_*()` output formatting

mod commands;
mod print;
mod setup;

pub use commands::run;
