// Copyright (c) 2024-2025 dbshell Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Statement execution shared by the REPL, `.read` and one-shot mode

use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use colored::Colorize;

use crate::database::Database;
use crate::error::{truncate_statement, Result, ShellError};
use crate::render::render;
use crate::session::SessionState;
use crate::splitter::split;

/// Longest statement excerpt shown in error messages
pub const STATEMENT_EXCERPT_LEN: usize = 60;

/// Execute one statement and render its result with the session's settings.
///
/// Driver failures come back as [`ShellError::Database`]; nothing is
/// rendered for them.
pub fn run_statement(
    sql: &str,
    db: &mut dyn Database,
    state: &SessionState,
    out: &mut dyn Write,
) -> Result<()> {
    log::debug!("Executing: {}", sql);
    let started = Instant::now();
    let result = db.execute(sql)?;
    let elapsed = started.elapsed();

    render(&result, state.mode, state.masked, out)?;

    if state.timing {
        let millis = elapsed.as_secs_f64() * 1000.0;
        writeln!(out, "{}", format!("Run Time: {:.3} ms", millis).dimmed())?;
    }
    Ok(())
}

/// Execute statements in order, stopping at the first failure.
///
/// Returns how many statements ran. A failure is reported as
/// [`ShellError::Batch`] carrying the 1-based index and an excerpt of the
/// failing statement; later statements are never sent.
pub fn run_statements(
    statements: &[String],
    db: &mut dyn Database,
    state: &SessionState,
    out: &mut dyn Write,
) -> Result<usize> {
    for (i, statement) in statements.iter().enumerate() {
        match run_statement(statement, db, state, out) {
            Ok(()) => {}
            Err(ShellError::Database(source)) => {
                return Err(ShellError::Batch {
                    index: i + 1,
                    statement: truncate_statement(statement, STATEMENT_EXCERPT_LEN),
                    source,
                });
            }
            Err(other) => return Err(other),
        }
    }
    Ok(statements.len())
}

/// Read a SQL file, split it into statements and run them in file order
pub fn run_file(
    path: &Path,
    db: &mut dyn Database,
    state: &SessionState,
    out: &mut dyn Write,
) -> Result<usize> {
    let text = fs::read_to_string(path).map_err(|source| ShellError::ScriptFile {
        path: path.display().to_string(),
        source,
    })?;

    let statements = split(&text);
    log::debug!(
        "Running {} statements from {}",
        statements.len(),
        path.display()
    );
    run_statements(&statements, db, state, out)
}
