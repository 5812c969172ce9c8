// Copyright (c) 2024-2025 dbshell Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! dbshell - an interactive SQL shell
//!
//! The crate holds everything between a line of user input and a rendered
//! result: statement splitting, dot-commands, sensitive-column masking and
//! the five output encodings.
//!
//! # Usage
//!
//! ```bash
//! # Start an interactive session against a SQLite file
//! dbshell shell --db ./app.db
//!
//! # Run a single statement or a whole script
//! dbshell query --db ./app.db "SELECT * FROM users;" --mode json
//! dbshell query --db ./app.db migrations/001_init.sql
//! ```
//!
//! # Architecture
//!
//! ```text
//! LineSource ──► Repl ──► commands (dot-commands) ──► Database
//!                 │                                      │
//!                 ├──► splitter (files)                  ▼
//!                 └──► render + masking ◄──────────── ResultSet
//! ```

pub mod batch;
pub mod commands;
pub mod database;
pub mod error;
pub mod history;
pub mod input;
pub mod masking;
pub mod render;
pub mod repl;
pub mod session;
pub mod splitter;

pub use batch::{run_file, run_statement, run_statements};
pub use commands::{dispatch, CommandContext, DispatchOutcome};
pub use database::{Database, DatabaseError, ResultSet, Value};
pub use error::{Result, ShellError};
pub use history::{HistoryLog, HistoryStore, MAX_HISTORY_ENTRIES};
pub use input::{LineSource, NoInput, ReadOutcome};
pub use masking::{classify, MaskType};
pub use render::render;
pub use repl::{run_one_shot, OneShot, Repl};
pub use session::{OutputMode, SessionState};
pub use splitter::split;

#[cfg(feature = "sqlite-backend")]
pub use database::sqlite::SqliteDatabase;

/// dbshell version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
