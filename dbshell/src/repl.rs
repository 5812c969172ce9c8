// Copyright (c) 2024-2025 dbshell Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! The interactive loop and one-shot execution
//!
//! The loop pulls one line at a time from a [`LineSource`]. While the
//! statement buffer is empty a line may be a dot-command; otherwise lines
//! accumulate until the buffer ends with `;`, and the whole buffer is sent
//! to the database as one statement.

use std::io::Write;
use std::path::PathBuf;

use colored::Colorize;

use crate::batch::{run_file, run_statement, run_statements, STATEMENT_EXCERPT_LEN};
use crate::commands::{dispatch, CommandContext, DispatchOutcome};
use crate::database::Database;
use crate::error::{truncate_statement, Result, ShellError};
use crate::history::{HistoryLog, HistoryStore};
use crate::input::{LineSource, ReadOutcome};
use crate::session::SessionState;

/// Prompt shown while waiting for a new statement
pub const PROMPT: &str = "dbshell> ";

/// Prompt shown while a statement is being continued
pub const CONTINUATION_PROMPT: &str = "   ...> ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Close,
}

/// One interactive session
pub struct Repl<'a> {
    db: &'a mut dyn Database,
    input: &'a mut dyn LineSource,
    out: &'a mut dyn Write,
    state: SessionState,
    history: HistoryLog,
    store: Option<HistoryStore>,
    buffer: Vec<String>,
}

impl<'a> Repl<'a> {
    pub fn new(
        db: &'a mut dyn Database,
        input: &'a mut dyn LineSource,
        out: &'a mut dyn Write,
        state: SessionState,
    ) -> Self {
        Self {
            db,
            input,
            out,
            state,
            history: HistoryLog::new(),
            store: None,
            buffer: Vec::new(),
        }
    }

    /// Load history from `store` when the session starts and write it back
    /// when it closes
    pub fn with_history(mut self, store: HistoryStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Run until `.quit`, end of input, or an interrupt on an empty buffer.
    ///
    /// History is saved however the session ends.
    pub fn run(&mut self) -> Result<()> {
        if let Some(store) = &self.store {
            self.history = store.load();
            for entry in self.history.iter() {
                self.input.add_history(entry);
            }
        }

        let outcome = self.run_loop();

        if let Some(store) = &self.store {
            if let Err(e) = store.save(&self.history) {
                log::warn!(
                    "Failed to save history to {}: {}",
                    store.path().display(),
                    e
                );
            }
        }

        outcome
    }

    fn run_loop(&mut self) -> Result<()> {
        loop {
            let prompt = if self.buffer.is_empty() {
                PROMPT
            } else {
                CONTINUATION_PROMPT
            };

            let step = match self.input.read_line(prompt)? {
                ReadOutcome::Line(line) => self.handle_line(&line)?,
                ReadOutcome::Interrupted => self.interrupt()?,
                ReadOutcome::Eof => {
                    writeln!(self.out, "{}", "Goodbye!".green())?;
                    Step::Close
                }
            };

            if step == Step::Close {
                return Ok(());
            }
        }
    }

    fn interrupt(&mut self) -> Result<Step> {
        if self.buffer.is_empty() {
            return Ok(Step::Close);
        }
        self.buffer.clear();
        writeln!(self.out, "{}", "Statement buffer cleared".yellow())?;
        Ok(Step::Continue)
    }

    fn handle_line(&mut self, line: &str) -> Result<Step> {
        let trimmed = line.trim();

        if self.buffer.is_empty() {
            if trimmed.is_empty() {
                return Ok(Step::Continue);
            }
            self.remember(line);
            if trimmed.starts_with('.') {
                return self.dot_command(trimmed);
            }
        } else if !trimmed.is_empty() {
            self.remember(line);
        }

        self.buffer.push(line.to_string());
        let joined = self.buffer.join("\n");
        let statement = joined.trim();
        if !statement.ends_with(';') {
            return Ok(Step::Continue);
        }

        let statement = statement.to_string();
        self.buffer.clear();
        self.execute(&statement)?;
        Ok(Step::Continue)
    }

    fn remember(&mut self, line: &str) {
        let entry = line.trim_end();
        self.history.push(entry);
        self.input.add_history(entry);
    }

    fn dot_command(&mut self, line: &str) -> Result<Step> {
        let mut ctx = CommandContext {
            db: &mut *self.db,
            state: &mut self.state,
            input: &mut *self.input,
            out: &mut *self.out,
        };

        match dispatch(line, &mut ctx)? {
            DispatchOutcome::Handled => Ok(Step::Continue),
            DispatchOutcome::Quit => {
                writeln!(self.out, "{}", "Goodbye!".green())?;
                Ok(Step::Close)
            }
            DispatchOutcome::Unknown => {
                let name = line.split_whitespace().next().unwrap_or(line);
                writeln!(
                    self.out,
                    "{}",
                    format!("Unknown command: {}. Type .help for a list of commands.", name)
                        .yellow()
                )?;
                Ok(Step::Continue)
            }
        }
    }

    fn execute(&mut self, statement: &str) -> Result<()> {
        match run_statement(statement, &mut *self.db, &self.state, &mut *self.out) {
            Ok(()) => Ok(()),
            Err(ShellError::Database(e)) => {
                writeln!(
                    self.out,
                    "{}",
                    format!(
                        "Error in statement ({}): {}",
                        truncate_statement(statement, STATEMENT_EXCERPT_LEN),
                        e
                    )
                    .red()
                )?;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

/// Work supplied on the command line instead of an interactive session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OneShot {
    /// A SQL statement, or a dot-command when it starts with `.`
    Statement(String),
    /// A `.sql` script run statement by statement
    File(PathBuf),
}

impl OneShot {
    /// Treat arguments ending in `.sql` as script paths
    pub fn detect(arg: &str) -> Self {
        let trimmed = arg.trim();
        if trimmed.to_lowercase().ends_with(".sql") && !trimmed.contains(char::is_whitespace) {
            OneShot::File(PathBuf::from(trimmed))
        } else {
            OneShot::Statement(arg.to_string())
        }
    }
}

/// Run one statement, dot-command or script and return; any failure is the
/// caller's failure.
pub fn run_one_shot(
    job: &OneShot,
    db: &mut dyn Database,
    state: &mut SessionState,
    input: &mut dyn LineSource,
    out: &mut dyn Write,
) -> Result<()> {
    match job {
        OneShot::File(path) => {
            run_file(path, db, state, out)?;
        }
        OneShot::Statement(text) if text.trim_start().starts_with('.') => {
            let mut ctx = CommandContext {
                db,
                state,
                input,
                out,
            };
            let line = text.trim();
            if dispatch(line, &mut ctx)? == DispatchOutcome::Unknown {
                return Err(ShellError::UnknownCommand(line.to_string()));
            }
        }
        OneShot::Statement(text) => {
            run_statements(&[text.trim().to_string()], db, state, out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_file() {
        assert_eq!(
            OneShot::detect("migrations/001.sql"),
            OneShot::File(PathBuf::from("migrations/001.sql"))
        );
        assert_eq!(
            OneShot::detect("seed.SQL"),
            OneShot::File(PathBuf::from("seed.SQL"))
        );
    }

    #[test]
    fn test_detect_statement() {
        assert_eq!(
            OneShot::detect("SELECT 1;"),
            OneShot::Statement("SELECT 1;".to_string())
        );
        assert_eq!(
            OneShot::detect("SELECT 'x.sql'"),
            OneShot::Statement("SELECT 'x.sql'".to_string())
        );
    }
}
