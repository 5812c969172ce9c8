// Copyright (c) 2024-2025 dbshell Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Shell error types

use crate::database::DatabaseError;
use thiserror::Error;

/// Errors that escape a component of the shell
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Error in statement {index} ({statement}): {source}")]
    Batch {
        index: usize,
        statement: String,
        #[source]
        source: DatabaseError,
    },

    #[error("Cannot read {path}: {source}")]
    ScriptFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("No terminal attached: pass a query or a .sql file to run non-interactively")]
    NoTerminal,

    #[error("Line editor error: {0}")]
    Readline(String),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ShellError>;

/// Shorten a statement for error messages, collapsing whitespace runs
pub fn truncate_statement(sql: &str, max_len: usize) -> String {
    let flat = sql.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_len {
        flat
    } else {
        let head: String = flat.chars().take(max_len).collect();
        format!("{}...", head)
    }
}
