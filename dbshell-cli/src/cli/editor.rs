// Copyright (c) 2024-2025 dbshell Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! rustyline-backed line source

use dbshell::{LineSource, ReadOutcome, ShellError};
use rustyline::history::DefaultHistory;
use rustyline::{error::ReadlineError, CompletionType, Config, EditMode, Editor};

/// Terminal line editor. History recall is in-memory only; the shell's own
/// history store owns the file on disk.
pub struct EditorSource {
    editor: Editor<(), DefaultHistory>,
}

impl EditorSource {
    pub fn new() -> Result<Self, ReadlineError> {
        let config = Config::builder()
            .edit_mode(EditMode::Emacs)
            .history_ignore_space(true)
            .completion_type(CompletionType::List)
            .auto_add_history(false)
            .build();

        let editor = Editor::<(), _>::with_config(config)?;
        Ok(Self { editor })
    }
}

impl LineSource for EditorSource {
    fn read_line(&mut self, prompt: &str) -> dbshell::Result<ReadOutcome> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadOutcome::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(err) => Err(ShellError::Readline(err.to_string())),
        }
    }

    fn add_history(&mut self, line: &str) {
        if let Err(e) = self.editor.add_history_entry(line) {
            log::debug!("Could not add history entry: {}", e);
        }
    }
}
