// Copyright (c) 2024-2025 dbshell Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Pull-based input for the shell
//!
//! The REPL asks for one line at a time. Interrupts arrive as a
//! [`ReadOutcome::Interrupted`] value from the read that was in progress,
//! so the loop handles them at a single, well-defined point.

use crate::error::Result;

/// Result of asking the line source for input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    /// The user pressed Ctrl-C
    Interrupted,
    /// Input is exhausted (Ctrl-D or end of a pipe)
    Eof,
}

/// Something the shell can read lines from
pub trait LineSource {
    /// Show `prompt` and wait for the next line
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome>;

    /// Ask a yes/no question. Only an explicit `y`/`yes` counts as consent.
    fn confirm(&mut self, question: &str) -> Result<bool> {
        match self.read_line(&format!("{} [y/N] ", question))? {
            ReadOutcome::Line(answer) => Ok(is_yes(&answer)),
            ReadOutcome::Interrupted | ReadOutcome::Eof => Ok(false),
        }
    }

    /// Record an entered line for in-session recall
    fn add_history(&mut self, _line: &str) {}
}

/// `true` for `y` or `yes`, any case
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Non-interactive source used by one-shot execution: there is never a
/// line to read, and confirmations are answered by a fixed policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput {
    pub assume_yes: bool,
}

impl NoInput {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl LineSource for NoInput {
    fn read_line(&mut self, _prompt: &str) -> Result<ReadOutcome> {
        Ok(ReadOutcome::Eof)
    }

    fn confirm(&mut self, question: &str) -> Result<bool> {
        log::debug!("Auto-answering '{}' with {}", question, self.assume_yes);
        Ok(self.assume_yes)
    }
}
