//! Line source that replays a script

use std::collections::VecDeque;

use dbshell::{LineSource, ReadOutcome};

/// Replays queued outcomes, then reports EOF forever
#[derive(Default)]
pub struct ScriptedInput {
    queue: VecDeque<ReadOutcome>,
    pub prompts: Vec<String>,
    pub recalled: Vec<String>,
}

impl ScriptedInput {
    pub fn lines(lines: &[&str]) -> Self {
        Self {
            queue: lines
                .iter()
                .map(|l| ReadOutcome::Line(l.to_string()))
                .collect(),
            ..Self::default()
        }
    }

    pub fn outcomes(outcomes: Vec<ReadOutcome>) -> Self {
        Self {
            queue: outcomes.into(),
            ..Self::default()
        }
    }

    /// Number of reads that were never consumed
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl LineSource for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> dbshell::Result<ReadOutcome> {
        self.prompts.push(prompt.to_string());
        Ok(self.queue.pop_front().unwrap_or(ReadOutcome::Eof))
    }

    fn add_history(&mut self, line: &str) {
        self.recalled.push(line.to_string());
    }
}

pub fn line(text: &str) -> ReadOutcome {
    ReadOutcome::Line(text.to_string())
}
