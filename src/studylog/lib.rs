//! # Studylog Architecture
//!
//! Studylog keeps a log of practice test scores and the questions you missed, and
//! helps you work through those questions until they are reviewed. The library is
//! UI-agnostic; the `studylog` binary is one client of it.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (indexes, ranges, id prefixes)         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Filtering, review, tagging, facets, export, scores       │
//! │  - Returns `CmdResult`, never prints                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - QuestionStore: in-memory collection + tag edit session   │
//! │  - StorageBackend trait: FsBackend, MemBackend              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular Rust arguments, returns
//! `Result<CmdResult>`, and never writes to stdout or stderr. Diagnostics go
//! through `tracing`; the binary decides where they end up.
//!
//! ## Failure Model
//!
//! Reads never fail the session: a missing or corrupt questions file loads as an
//! empty collection. Writes that fail keep the in-memory change and surface a
//! warning; `StudyApi::flush` retries them.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic for each command
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: `QuestionRecord`, `ScoreRecord` and their inputs
//! - [`records`]: Pure record updates and tag sanitizing
//! - [`index`]: Display indexes and selectors
//! - [`config`]: Configuration management
//! - [`pdf`]: PDF rendering for exports
//! - [`editor`]: External editor integration for tags
//! - [`init`]: Data directory resolution and startup
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod index;
pub mod init;
pub mod model;
pub mod pdf;
pub mod records;
pub mod store;
