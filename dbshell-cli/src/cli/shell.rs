// Copyright (c) 2024-2025 dbshell Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! CLI command handlers for dbshell

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use colored::Colorize;
use dbshell::{
    run_one_shot, HistoryStore, NoInput, OneShot, Repl, ShellError, SqliteDatabase,
};

use super::commands::SessionArgs;
use super::editor::EditorSource;

/// Handle the shell (REPL) command
pub fn handle_shell(args: SessionArgs) -> Result<(), Box<dyn std::error::Error>> {
    // Without a terminal the loop would wait on input nobody can type.
    if !io::stdin().is_terminal() {
        return Err(ShellError::NoTerminal.into());
    }

    let mut db = open_database(&args.database)?;
    let state = args.initial_state();

    println!("{}", "dbshell".bold().green());
    println!("Type '.help' for commands, '.quit' or '.exit' to exit");
    println!("Multi-line statements supported - use ';' to terminate\n");
    println!("{}", format!("Connected to: {}", args.database).cyan());
    println!(
        "Output mode: {}, masking: {}\n",
        state.mode,
        if state.masked { "on" } else { "off" }
    );

    let mut editor = EditorSource::new()?;
    let mut stdout = io::stdout();
    let history = HistoryStore::from_env();
    log::debug!("History file: {}", history.path().display());

    Repl::new(&mut db, &mut editor, &mut stdout, state)
        .with_history(history)
        .run()?;

    Ok(())
}

/// Handle the query command (one-off statement, dot-command or script)
pub fn handle_query(
    args: SessionArgs,
    sql: Option<String>,
    file: Option<PathBuf>,
    yes: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let job = match (file, sql) {
        (Some(path), _) => OneShot::File(path),
        (None, Some(sql)) => OneShot::detect(&sql),
        (None, None) => return Err("Nothing to run: pass a statement or --file".into()),
    };

    let mut db = open_database(&args.database)?;
    let mut state = args.initial_state();
    let mut stdout = io::stdout();

    run_one_shot(
        &job,
        &mut db,
        &mut state,
        &mut NoInput::new(yes),
        &mut stdout,
    )?;
    Ok(())
}

/// Open the database named on the command line
fn open_database(path: &str) -> Result<SqliteDatabase, Box<dyn std::error::Error>> {
    let db = SqliteDatabase::open(path)
        .map_err(|e| -> Box<dyn std::error::Error> { e.into() })?;
    Ok(db)
}
