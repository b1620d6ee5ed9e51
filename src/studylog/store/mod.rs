//! # Storage Layer
//!
//! Persistence is split in two:
//!
//! 1. [`StorageBackend`](backend::StorageBackend): the narrow read/write
//!    contract for whole collections. Knows nothing about edits or filters.
//! 2. [`QuestionStore`](question_store::QuestionStore): the record store.
//!    Owns the in-memory question collection, the tag-edit session and the
//!    dirty flag, and pushes the full collection to its backend after every
//!    mutation.
//!
//! ## Failure Model
//!
//! - **Read**: a missing file is an empty collection. A corrupt or unreadable
//!   file is an error at the backend, which `QuestionStore::load` turns into an
//!   empty collection plus a warning log.
//! - **Write**: the error is returned to the caller as
//!   [`Persisted::Failed`](question_store::Persisted::Failed). The in-memory
//!   change stays; the next mutation or `flush` writes it again.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── questions.json   # question records, storage order
//! ├── scores.json      # score records, storage order
//! └── config.json      # settings
//! ```
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: JSON files with atomic replace.
//! - [`mem_backend::MemBackend`]: in-memory, with switchable read/write
//!   failures for tests.

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod question_store;
